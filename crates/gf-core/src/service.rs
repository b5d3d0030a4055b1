//! # Feed service
//!
//! The operations views call. Each one checks the caller's identity, hands the
//! work to whichever backend the process was started with, and reports the
//! outcome to the notifier.

use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{FeedError, Result};
use crate::mode::{Backend, Mode};
use crate::models::{Comment, MediaFile, NewPost, Post, PostId, User};
use crate::notify::Notice;
use crate::traits::{IdentitySource, Notifier};

/// Upper bound on the number of posts `list_posts` returns.
pub const FEED_PAGE_SIZE: usize = 10;

/// Blob keys for post media live under this prefix.
pub const MEDIA_KEY_PREFIX: &str = "posts";

#[derive(Clone)]
pub struct FeedService {
    backend: Backend,
    identity: Arc<dyn IdentitySource>,
    notifier: Arc<dyn Notifier>,
}

impl FeedService {
    pub fn new(
        backend: Backend,
        identity: Arc<dyn IdentitySource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            identity,
            notifier,
        }
    }

    pub fn mode(&self) -> Mode {
        self.backend.mode()
    }

    /// The same service acting for a different identity source.
    pub fn with_identity(&self, identity: Arc<dyn IdentitySource>) -> Self {
        Self {
            identity,
            ..self.clone()
        }
    }

    /// Newest posts first, never more than `FEED_PAGE_SIZE`.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.backend.posts().list_recent(FEED_PAGE_SIZE).await?;
        posts.truncate(FEED_PAGE_SIZE);
        Ok(posts)
    }

    /// Uploads `media` and publishes a post authored by the signed-in user.
    ///
    /// Media already uploaded when a later step fails is left in the blob store.
    pub async fn create_post(&self, content: &str, media: Vec<MediaFile>) -> Result<PostId> {
        let author = self.require_user("create a post")?;
        let id = self.settle(self.publish(&author, content, media).await, "Failed to create post")?;
        debug!(post_id = %id, mode = %self.mode(), "post created");
        self.notifier.notify(Notice::success("Post created successfully"));
        Ok(id)
    }

    pub async fn like_post(&self, post_id: &str) -> Result<()> {
        let user = self.require_user("like a post")?;
        let outcome = self.backend.posts().add_like(post_id, &user.id).await;
        self.settle(outcome, "Failed to like post")
    }

    pub async fn unlike_post(&self, post_id: &str) -> Result<()> {
        let user = self.require_user("unlike a post")?;
        let outcome = self.backend.posts().remove_like(post_id, &user.id).await;
        self.settle(outcome, "Failed to unlike post")
    }

    pub async fn add_comment(&self, post_id: &str, content: &str) -> Result<()> {
        let user = self.require_user("comment")?;
        let comment = Comment::by(&user, content);
        let outcome = self.backend.posts().append_comment(post_id, comment).await;
        self.settle(outcome, "Failed to add comment")
    }

    async fn publish(&self, author: &User, content: &str, media: Vec<MediaFile>) -> Result<PostId> {
        let uploads = media.into_iter().map(|file| {
            let blobs = Arc::clone(self.backend.blobs());
            let key = format!("{MEDIA_KEY_PREFIX}/{}", Uuid::now_v7());
            async move { blobs.upload(file, &key).await }
        });
        // try_join_all keeps input order
        let urls = try_join_all(uploads).await?;

        self.backend
            .posts()
            .insert_post(NewPost::by(author, content, urls))
            .await
    }

    fn require_user(&self, action: &str) -> Result<User> {
        self.identity.current_user().ok_or_else(|| {
            FeedError::AuthenticationRequired(format!("User must be logged in to {action}"))
        })
    }

    fn settle<T>(&self, outcome: Result<T>, failure: &str) -> Result<T> {
        if let Err(err) = &outcome {
            warn!(error = %err, mode = %self.mode(), "{failure}");
            self.notifier.notify(Notice::failure(failure));
        }
        outcome
    }
}
