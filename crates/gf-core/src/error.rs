//! # FeedError
//!
//! Centralized error handling for the gamer feed.
//! Maps backend-specific failures to the three outcomes callers act on.

use thiserror::Error;

/// The primary error type for all gf-core operations.
#[derive(Error, Debug)]
pub enum FeedError {
    /// No signed-in user. Raised before any backend call.
    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    /// Resource not found (e.g., Post)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Document or blob store failure (I/O, malformed document, encoding)
    #[error("persistence error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FeedError {
    pub fn post_not_found(id: &str) -> Self {
        Self::NotFound("post".to_string(), id.to_string())
    }

    pub fn persistence<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Persistence(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(..))
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::persistence(err)
    }
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        Self::persistence(err)
    }
}

/// A specialized Result type for gamer feed logic.
pub type Result<T> = std::result::Result<T, FeedError>;
