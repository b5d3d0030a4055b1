//! # gf-store-document
//!
//! Live-mode `PostStore` on top of any `DocumentStore`, plus two stores
//! implementing that contract: in memory and JSON files on disk.
//!
//! Posts are documents in the `posts` collection. Likes and comments are
//! changed with the store's array-union/array-remove writes, never by
//! read-modify-write, so concurrent callers cannot overwrite each other.

pub mod json;
pub mod memory;

use async_trait::async_trait;
use gf_core::document::{
    array_remove, array_union, server_timestamp, set, Direction, Document, FieldWrite, Query,
};
use gf_core::error::{FeedError, Result};
use gf_core::models::{Comment, NewPost, Post, PostId};
use gf_core::traits::{DocumentStore, PostStore};
use serde_json::Value;

pub use json::JsonDocumentStore;
pub use memory::MemoryDocumentStore;

pub const POSTS_COLLECTION: &str = "posts";

pub struct DocumentPostStore<D> {
    docs: D,
}

impl<D: DocumentStore> DocumentPostStore<D> {
    pub fn new(docs: D) -> Self {
        Self { docs }
    }

    pub fn documents(&self) -> &D {
        &self.docs
    }

    async fn update_post(&self, post_id: &str, mut writes: Vec<FieldWrite>) -> Result<()> {
        writes.push(server_timestamp("updatedAt"));
        self.docs
            .update_document(POSTS_COLLECTION, post_id, writes)
            .await
            .map_err(|err| match err {
                FeedError::NotFound(..) => FeedError::post_not_found(post_id),
                other => other,
            })
    }
}

#[async_trait]
impl<D: DocumentStore> PostStore for DocumentPostStore<D> {
    async fn list_recent(&self, limit: usize) -> Result<Vec<Post>> {
        let query = Query::collection(POSTS_COLLECTION)
            .order_by("createdAt", Direction::Descending)
            .limit(limit);

        self.docs
            .query(&query)
            .await?
            .into_iter()
            .map(post_from_document)
            .collect()
    }

    async fn insert_post(&self, post: NewPost) -> Result<PostId> {
        let writes = vec![
            set("authorId", post.author_id),
            set("authorName", post.author_name),
            set("authorImage", post.author_image),
            set("content", post.content),
            set("media", post.media),
            set("likes", Value::Array(Vec::new())),
            set("comments", Value::Array(Vec::new())),
            server_timestamp("createdAt"),
            server_timestamp("updatedAt"),
        ];
        self.docs.add_document(POSTS_COLLECTION, writes).await
    }

    async fn add_like(&self, post_id: &str, user_id: &str) -> Result<()> {
        self.update_post(post_id, vec![array_union("likes", user_id)]).await
    }

    async fn remove_like(&self, post_id: &str, user_id: &str) -> Result<()> {
        self.update_post(post_id, vec![array_remove("likes", user_id)]).await
    }

    async fn append_comment(&self, post_id: &str, comment: Comment) -> Result<()> {
        let comment = serde_json::to_value(&comment)?;
        self.update_post(post_id, vec![array_union("comments", comment)]).await
    }
}

/// Reads a stored post document. The document id becomes the post id.
pub fn post_from_document(doc: Document) -> Result<Post> {
    let mut fields = doc.fields;
    fields.insert("id".to_string(), Value::String(doc.id));
    Ok(serde_json::from_value(Value::Object(fields))?)
}

/// The stored form of `post`, for seeding a store with existing posts.
pub fn post_to_document(post: &Post) -> Result<Document> {
    let Value::Object(mut fields) = serde_json::to_value(post)? else {
        return Err(FeedError::persistence("post did not serialize to an object"));
    };
    fields.remove("id");
    Ok(Document {
        id: post.id.clone(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::document::FieldOp;
    use gf_core::models::User;
    use gf_core::traits::MockDocumentStore;
    use serde_json::json;

    fn gamer() -> User {
        User {
            id: "user-3".into(),
            username: "SakuraPro".into(),
            profile_image: "https://img.example/sakura.png".into(),
        }
    }

    #[tokio::test]
    async fn insert_lets_the_store_stamp_times() {
        let mut docs = MockDocumentStore::new();
        docs.expect_add_document()
            .withf(|collection, writes: &Vec<FieldWrite>| {
                let op = |name: &str| writes.iter().find(|(f, _)| f == name).map(|(_, op)| op.clone());
                collection == POSTS_COLLECTION
                    && op("createdAt") == Some(FieldOp::ServerTimestamp)
                    && op("updatedAt") == Some(FieldOp::ServerTimestamp)
                    && op("authorName") == Some(FieldOp::Set(json!("SakuraPro")))
                    && op("likes") == Some(FieldOp::Set(json!([])))
                    && op("id").is_none()
            })
            .times(1)
            .returning(|_, _| Ok("doc-1".to_string()));

        let store = DocumentPostStore::new(docs);
        let id = store
            .insert_post(NewPost::by(&gamer(), "GGs", vec![]))
            .await
            .unwrap();
        assert_eq!(id, "doc-1");
    }

    #[tokio::test]
    async fn like_is_an_array_union_plus_touch() {
        let mut docs = MockDocumentStore::new();
        docs.expect_update_document()
            .withf(|collection, id, writes: &Vec<FieldWrite>| {
                collection == POSTS_COLLECTION
                    && id == "post-1"
                    && writes
                        == &vec![
                            ("likes".to_string(), FieldOp::ArrayUnion(vec![json!("user-5")])),
                            ("updatedAt".to_string(), FieldOp::ServerTimestamp),
                        ]
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        DocumentPostStore::new(docs).add_like("post-1", "user-5").await.unwrap();
    }

    #[tokio::test]
    async fn missing_document_maps_to_missing_post() {
        let mut docs = MockDocumentStore::new();
        docs.expect_update_document()
            .returning(|collection, id, _| Err(FeedError::NotFound(collection.to_string(), id.to_string())));

        let err = DocumentPostStore::new(docs)
            .remove_like("post-404", "user-1")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "post not found with ID post-404");
    }

    #[tokio::test]
    async fn malformed_documents_surface_as_persistence_errors() {
        let mut docs = MockDocumentStore::new();
        docs.expect_query().returning(|_| {
            Ok(vec![Document {
                id: "broken".into(),
                fields: json!({ "content": 42 }).as_object().cloned().unwrap_or_default(),
            }])
        });

        let err = DocumentPostStore::new(docs).list_recent(10).await.unwrap_err();
        assert!(matches!(err, FeedError::Persistence(_)));
    }

    #[tokio::test]
    async fn documents_round_trip_through_the_memory_store() {
        let store = DocumentPostStore::new(MemoryDocumentStore::new());
        let id = store
            .insert_post(NewPost::by(&gamer(), "tournament win", vec!["https://cdn/x.png".into()]))
            .await
            .unwrap();
        store
            .append_comment(&id, Comment::by(&gamer(), "thanks all"))
            .await
            .unwrap();

        let posts = store.list_recent(10).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, id);
        assert_eq!(posts[0].media, ["https://cdn/x.png"]);
        assert_eq!(posts[0].comments[0].content, "thanks all");

        let doc = post_to_document(&posts[0]).unwrap();
        assert!(!doc.fields.contains_key("id"));
        assert_eq!(post_from_document(doc).unwrap(), posts[0]);
    }
}
