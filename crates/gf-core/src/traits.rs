//! # Core Traits (Ports)
//!
//! Any backend plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::document::{Document, FieldWrite, Query};
use crate::error::Result;
use crate::models::{Comment, MediaFile, NewPost, Post, PostId, User};
use crate::notify::Notice;

/// Post persistence contract. One implementation per mode.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Most recent posts first, at most `limit` of them.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Post>>;

    /// Persists a new post and returns the id it was stored under.
    async fn insert_post(&self, post: NewPost) -> Result<PostId>;

    async fn add_like(&self, post_id: &str, user_id: &str) -> Result<()>;
    async fn remove_like(&self, post_id: &str, user_id: &str) -> Result<()>;
    async fn append_comment(&self, post_id: &str, comment: Comment) -> Result<()>;
}

/// Media storage contract for uploads.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores the file under `key` and returns a retrievable URL.
    async fn upload(&self, file: MediaFile, key: &str) -> Result<String>;
}

/// Semi-structured record storage keyed by collection and id.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn query(&self, query: &Query) -> Result<Vec<Document>>;

    /// Creates a document with a store-assigned id.
    async fn add_document(&self, collection: &str, writes: Vec<FieldWrite>) -> Result<String>;

    /// Applies `writes` to an existing document. Fails with `NotFound` when it is missing.
    async fn update_document(&self, collection: &str, id: &str, writes: Vec<FieldWrite>) -> Result<()>;
}

/// Read-only view of the signed-in user.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait IdentitySource: Send + Sync {
    fn current_user(&self) -> Option<User>;
}

/// Fire-and-forget sink for user-visible notices.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
