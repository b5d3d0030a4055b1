//! # Mode selection
//!
//! The process runs either against the in-memory demo store or against the
//! document and blob stores. The choice is made once, when the `Backend` is built.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::traits::{BlobStore, PostStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Demo,
    Live,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Demo => f.write_str("demo"),
            Mode::Live => f.write_str("live"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode {0:?}, expected \"demo\" or \"live\"")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo" => Ok(Mode::Demo),
            "live" => Ok(Mode::Live),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// The post and blob stores for one mode, fixed for the process lifetime.
#[derive(Clone)]
pub struct Backend {
    mode: Mode,
    posts: Arc<dyn PostStore>,
    blobs: Arc<dyn BlobStore>,
}

impl Backend {
    pub fn new(mode: Mode, posts: Arc<dyn PostStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { mode, posts, blobs }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn posts(&self) -> &Arc<dyn PostStore> {
        &self.posts
    }

    pub fn blobs(&self) -> &Arc<dyn BlobStore> {
        &self.blobs
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend").field("mode", &self.mode).finish_non_exhaustive()
    }
}
