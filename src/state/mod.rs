//! State management module
//!
//! Bookmark tracking, checkpointing, and resumability. State is persisted
//! between runs in the Singer `{"bookmarks": {...}}` shape so each stream
//! resumes from its last replication-key value.
//!
//! # Overview
//!
//! - `Bookmark` - one replication-key value (Unix seconds or a datetime string)
//! - `BookmarkTracker` - monotonic per-stream high-water mark during a sync
//! - `State` / `StateManager` - persisted bookmarks with atomic file writes

mod bookmark;
mod manager;
mod types;

pub use bookmark::{Bookmark, BookmarkTracker};
pub use manager::StateManager;
pub use types::{State, StreamState};
