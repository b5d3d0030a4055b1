//! gamer-feed/crates/gf-core/src/lib.rs
//!
//! The central feed logic and interface definitions for the gamer feed.

pub mod document;
pub mod error;
pub mod identity;
pub mod mode;
pub mod models;
pub mod notify;
pub mod service;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use identity::SessionIdentity;
pub use mode::{Backend, Mode};
pub use models::*;
pub use notify::{Notice, NoticeLevel, TracingNotifier};
pub use service::{FeedService, FEED_PAGE_SIZE};
pub use traits::*;
