//! Durable `DocumentStore`: one pretty-printed JSON file per collection.
//!
//! All reads are served from memory. A write is applied to a copy of the
//! touched collection, the copy is written to a staging file and renamed into
//! place, and only then does memory switch to it. A failed flush leaves both
//! memory and disk as they were.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gf_core::document::{Document, FieldWrite, Query};
use gf_core::error::{FeedError, Result};
use gf_core::traits::DocumentStore;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::memory::{insert_document, update_document_in, MemoryDocumentStore};

pub struct JsonDocumentStore {
    memory: MemoryDocumentStore,
    dir: PathBuf,
    /// Held from copy to install, so writes never race on a collection.
    flush: Mutex<()>,
}

impl JsonDocumentStore {
    /// Opens (creating if needed) `dir` and loads every `<collection>.json` in it.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;

        let memory = MemoryDocumentStore::new();
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(collection) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let raw = fs::read(&path).await?;
            let documents: Vec<Document> = serde_json::from_slice(&raw)?;
            info!(collection, documents = documents.len(), "loaded collection");
            memory.load(collection, documents);
        }

        Ok(Self {
            memory,
            dir,
            flush: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: &str, extension: &str) -> Result<PathBuf> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(FeedError::persistence(format!(
                "invalid collection name {collection:?}"
            )));
        }
        Ok(self.dir.join(format!("{collection}.{extension}")))
    }

    /// Runs `change` on a copy of `collection`, flushes the copy, then installs it.
    async fn commit<T>(
        &self,
        collection: &str,
        change: impl FnOnce(&mut Vec<Document>) -> Result<T>,
    ) -> Result<T> {
        let target = self.collection_path(collection, "json")?;
        let staging = self.collection_path(collection, "json.tmp")?;

        let _guard = self.flush.lock().await;
        let mut documents = self.memory.snapshot(collection);
        let outcome = change(&mut documents)?;

        let raw = serde_json::to_vec_pretty(&documents)?;
        fs::write(&staging, raw).await?;
        fs::rename(&staging, &target).await?;

        debug!(collection, documents = documents.len(), "flushed collection");
        self.memory.load(collection, documents);
        Ok(outcome)
    }
}

#[async_trait]
impl DocumentStore for JsonDocumentStore {
    async fn query(&self, query: &Query) -> Result<Vec<Document>> {
        self.memory.query(query).await
    }

    async fn add_document(&self, collection: &str, writes: Vec<FieldWrite>) -> Result<String> {
        self.commit(collection, |docs| Ok(insert_document(docs, writes)))
            .await
    }

    async fn update_document(&self, collection: &str, id: &str, writes: Vec<FieldWrite>) -> Result<()> {
        self.commit(collection, |docs| update_document_in(docs, collection, id, writes))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentPostStore;
    use gf_core::document::{array_union, set, Direction};
    use gf_core::models::{NewPost, User};
    use gf_core::traits::PostStore;
    use serde_json::json;
    use std::sync::Arc;

    fn gamer(id: &str) -> User {
        User {
            id: id.into(),
            username: format!("{id}-tag"),
            profile_image: format!("https://img.example/{id}.png"),
        }
    }

    #[tokio::test]
    async fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let id = {
            let store = JsonDocumentStore::open(dir.path()).await.unwrap();
            let id = store
                .add_document("posts", vec![set("content", "gg"), set("likes", json!([]))])
                .await
                .unwrap();
            store
                .update_document("posts", &id, vec![array_union("likes", "user-1")])
                .await
                .unwrap();
            id
        };

        let reopened = JsonDocumentStore::open(dir.path()).await.unwrap();
        let docs = reopened
            .query(&Query::collection("posts").order_by("createdAt", Direction::Descending))
            .await
            .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].fields["likes"], json!(["user-1"]));
        assert!(dir.path().join("posts.json").exists());
        assert!(!dir.path().join("posts.json.tmp").exists());
    }

    #[tokio::test]
    async fn rejects_collection_names_that_leave_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::open(dir.path()).await.unwrap();

        let err = store
            .add_document("../posts", vec![set("content", "x")])
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Persistence(_)));
    }

    #[tokio::test]
    async fn corrupt_collection_file_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("posts.json"), b"{ not json").unwrap();

        let outcome = JsonDocumentStore::open(dir.path()).await;
        assert!(matches!(outcome, Err(FeedError::Persistence(_))));
    }

    #[tokio::test]
    async fn failed_flush_leaves_served_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let posts = DocumentPostStore::new(JsonDocumentStore::open(dir.path()).await.unwrap());
        let id = posts
            .insert_post(NewPost::by(&gamer("user-1"), "ace on ascent", vec![]))
            .await
            .unwrap();
        let on_disk = std::fs::read(dir.path().join("posts.json")).unwrap();

        // a directory squatting on the staging path makes the next flush fail
        std::fs::create_dir(dir.path().join("posts.json.tmp")).unwrap();

        let err = posts.add_like(&id, "user-5").await.unwrap_err();
        assert!(matches!(err, FeedError::Persistence(_)));
        let err = posts
            .insert_post(NewPost::by(&gamer("user-2"), "lost post", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Persistence(_)));

        let served = posts.list_recent(10).await.unwrap();
        assert_eq!(served.len(), 1);
        assert!(served[0].likes.is_empty());
        assert_eq!(std::fs::read(dir.path().join("posts.json")).unwrap(), on_disk);

        std::fs::remove_dir(dir.path().join("posts.json.tmp")).unwrap();
        posts.add_like(&id, "user-5").await.unwrap();
        assert_eq!(posts.list_recent(10).await.unwrap()[0].likes, ["user-5"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_likes_all_reach_disk() {
        let dir = tempfile::tempdir().unwrap();
        let posts = Arc::new(DocumentPostStore::new(
            JsonDocumentStore::open(dir.path()).await.unwrap(),
        ));
        let id = posts
            .insert_post(NewPost::by(&gamer("user-1"), "1v5 clutch", vec![]))
            .await
            .unwrap();
        let likers: Vec<String> = (0..64).map(|n| format!("fan-{n}")).collect();

        let tasks = likers.iter().cloned().map(|liker| {
            let posts = posts.clone();
            let id = id.clone();
            tokio::spawn(async move { posts.add_like(&id, &liker).await })
        });
        for outcome in futures_util::future::join_all(tasks).await {
            outcome.unwrap().unwrap();
        }

        let reopened = DocumentPostStore::new(JsonDocumentStore::open(dir.path()).await.unwrap());
        let post = reopened.list_recent(1).await.unwrap().remove(0);
        assert_eq!(post.id, id);
        assert_eq!(post.likes.len(), likers.len());
        assert!(likers.iter().all(|l| post.is_liked_by(l)));
    }
}
