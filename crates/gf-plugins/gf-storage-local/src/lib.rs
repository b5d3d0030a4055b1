//! # gf-storage-local
//! gamer-feed/crates/gf-plugins/gf-storage-local/src/lib.rs
//! Local filesystem implementation of `BlobStore`.
//! Features: key-addressed storage with hash-based directory sharding.

use async_trait::async_trait;
use gf_core::error::{FeedError, Result};
use gf_core::models::MediaFile;
use gf_core::traits::BlobStore;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;

pub struct LocalBlobStore {
    /// Root directory for all uploads (e.g., "./data/uploads")
    root_path: PathBuf,
    /// Public URL prefix (e.g., "/static/uploads")
    url_prefix: String,
}

impl LocalBlobStore {
    pub fn new(root: PathBuf, url_prefix: String) -> Self {
        Self {
            root_path: root,
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn root_path(&self) -> &PathBuf {
        &self.root_path
    }

    /// Generates a sharded relative path: "ab/cd/<key>", where "abcd" starts the key's SHA-256.
    fn sharded_rel_path(key: &str) -> Result<String> {
        let valid = !key.is_empty()
            && !key.contains('\\')
            && key
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
        if !valid {
            return Err(FeedError::persistence(format!("invalid blob key {key:?}")));
        }

        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let hash = format!("{:x}", hasher.finalize());

        Ok(format!("{}/{}/{}", &hash[0..2], &hash[2..4], key))
    }

    fn url_for(&self, rel_path: &str) -> String {
        format!("{}/{}", self.url_prefix, rel_path)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    /// Writes the file under its sharded path and returns the public URL.
    async fn upload(&self, file: MediaFile, key: &str) -> Result<String> {
        let rel_path = Self::sharded_rel_path(key)?;
        let target_path = self.root_path.join(&rel_path);

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target_path, &file.data).await?;

        tracing::debug!(
            key,
            bytes = file.data.len(),
            content_type = file.content_type.as_deref().unwrap_or("unknown"),
            "stored upload"
        );
        Ok(self.url_for(&rel_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_upload_writes_sharded_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_path_buf(), "/static/uploads/".into());

        let url = store
            .upload(MediaFile::new(Bytes::from_static(b"frame")), "posts/clip-1")
            .await
            .unwrap();

        let rel = url.strip_prefix("/static/uploads/").unwrap();
        let segments: Vec<&str> = rel.split('/').collect();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(&segments[2..], &["posts", "clip-1"]);

        let stored = std::fs::read(dir.path().join(rel)).unwrap();
        assert_eq!(stored, b"frame");
    }

    #[tokio::test]
    async fn test_distinct_keys_get_distinct_urls() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_path_buf(), "/media".into());

        let a = store.upload(MediaFile::new(Bytes::from_static(b"x")), "posts/a").await.unwrap();
        let b = store.upload(MediaFile::new(Bytes::from_static(b"x")), "posts/b").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_rejects_keys_escaping_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_path_buf(), "/media".into());

        for key in ["../etc/passwd", "posts//x", "", "posts/./x", "a\\b"] {
            let err = store
                .upload(MediaFile::new(Bytes::from_static(b"x")), key)
                .await
                .unwrap_err();
            assert!(matches!(err, FeedError::Persistence(_)), "key {key:?}");
        }
    }
}
