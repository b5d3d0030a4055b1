//! # gf-store-demo
//!
//! In-memory `PostStore` and `BlobStore` for demo mode.
//! State lives as long as the store value; nothing touches disk or network.

pub mod fixtures;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use dashmap::DashMap;
use gf_core::error::{FeedError, Result};
use gf_core::models::{Comment, MediaFile, NewPost, Post, PostId};
use gf_core::traits::{BlobStore, PostStore};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local post list, newest first.
///
/// Clones share the same list. Writers take the lock for the whole
/// read-modify-write, so concurrent likes from different users both land.
#[derive(Clone, Default)]
pub struct DemoPostStore {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl DemoPostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Arc::new(RwLock::new(posts)),
        }
    }

    /// A store holding the demo fixture.
    pub fn seeded() -> Self {
        Self::new(fixtures::demo_posts())
    }

    /// Every post currently held, in feed order.
    pub async fn snapshot(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    pub async fn get(&self, post_id: &str) -> Option<Post> {
        self.posts.read().await.iter().find(|p| p.id == post_id).cloned()
    }

    async fn mutate<F>(&self, post_id: &str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Post) + Send,
    {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| FeedError::post_not_found(post_id))?;
        apply(post);
        post.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl PostStore for DemoPostStore {
    async fn list_recent(&self, limit: usize) -> Result<Vec<Post>> {
        Ok(self.posts.read().await.iter().take(limit).cloned().collect())
    }

    async fn insert_post(&self, post: NewPost) -> Result<PostId> {
        let post = post.into_post(Uuid::now_v7().to_string(), Utc::now());
        let id = post.id.clone();
        self.posts.write().await.insert(0, post);
        Ok(id)
    }

    async fn add_like(&self, post_id: &str, user_id: &str) -> Result<()> {
        self.mutate(post_id, |post| {
            post.add_like(user_id);
        })
        .await
    }

    async fn remove_like(&self, post_id: &str, user_id: &str) -> Result<()> {
        self.mutate(post_id, |post| {
            post.remove_like(user_id);
        })
        .await
    }

    async fn append_comment(&self, post_id: &str, comment: Comment) -> Result<()> {
        self.mutate(post_id, |post| post.comments.push(comment)).await
    }
}

/// Keeps uploads in memory and hands out `blob:` URLs for them.
#[derive(Clone, Default)]
pub struct DemoBlobStore {
    blobs: Arc<DashMap<String, Bytes>>,
}

impl DemoBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes behind a URL previously returned by `upload`.
    pub fn get(&self, url: &str) -> Option<Bytes> {
        self.blobs.get(url).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for DemoBlobStore {
    async fn upload(&self, file: MediaFile, key: &str) -> Result<String> {
        let url = format!("blob:demo/{key}");
        self.blobs.insert(url.clone(), file.data);
        Ok(url)
    }
}
