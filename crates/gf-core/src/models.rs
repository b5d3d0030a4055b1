//! # Domain Models
//!
//! These structs represent the core entities of the gamer feed.
//! Field names serialize in camelCase, which is also the persisted document shape.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PostId = String;
pub type UserId = String;

/// The signed-in user as reported by the identity source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub profile_image: String,
}

/// A feed entry. Author fields are a snapshot taken when the post was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    pub author_image: String,
    pub content: String,
    /// URLs of uploaded media, in upload order
    #[serde(default)]
    pub media: Vec<String>,
    /// Set semantics: a user id appears at most once
    #[serde(default)]
    pub likes: Vec<UserId>,
    /// Append-only, insertion order is display order
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }

    /// Adds `user_id` to the likes set. Returns false when it was already there.
    pub fn add_like(&mut self, user_id: &str) -> bool {
        if self.is_liked_by(user_id) {
            return false;
        }
        self.likes.push(user_id.to_string());
        true
    }

    /// Removes `user_id` from the likes set. Returns false when it was absent.
    pub fn remove_like(&mut self, user_id: &str) -> bool {
        let before = self.likes.len();
        self.likes.retain(|id| id != user_id);
        self.likes.len() != before
    }
}

/// Input for persisting a new post. The backend assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub author_id: UserId,
    pub author_name: String,
    pub author_image: String,
    pub content: String,
    pub media: Vec<String>,
}

impl NewPost {
    pub fn by(author: &User, content: impl Into<String>, media: Vec<String>) -> Self {
        Self {
            author_id: author.id.clone(),
            author_name: author.username.clone(),
            author_image: author.profile_image.clone(),
            content: content.into(),
            media,
        }
    }

    /// Materializes the post with a caller-side id and timestamps.
    pub fn into_post(self, id: PostId, now: DateTime<Utc>) -> Post {
        Post {
            id,
            author_id: self.author_id,
            author_name: self.author_name,
            author_image: self.author_image,
            content: self.content,
            media: self.media,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author_id: UserId,
    pub author_name: String,
    pub author_image: String,
    pub content: String,
    #[serde(default)]
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// A fresh comment by `author`, stamped now.
    pub fn by(author: &User, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            author_id: author.id.clone(),
            author_name: author.username.clone(),
            author_image: author.profile_image.clone(),
            content: content.into(),
            likes: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// A media file handed to `create_post`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub data: Bytes,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl MediaFile {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            content_type: None,
            file_name: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// What kind of content a report points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportedContent {
    User,
    Team,
    Post,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Spam,
    Harassment,
    Inappropriate,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Resolved,
    Dismissed,
}

/// A moderation report filed against a user, team, post or comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub content_id: String,
    pub content_type: ReportedContent,
    pub content_author_id: UserId,
    pub reporter_id: UserId,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub reason: String,
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderator_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
