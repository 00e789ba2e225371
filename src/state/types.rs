//! State types for tracking sync progress
//!
//! Serialized in the Singer shape and persisted between runs:
//!
//! ```json
//! {"bookmarks": {"clicks": {"replication_key": "unix_timestamp", "replication_key_value": 1704067200}}}
//! ```

use super::bookmark::Bookmark;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Complete state for the tap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream bookmarks
    #[serde(default)]
    pub bookmarks: BTreeMap<String, StreamState>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&StreamState> {
        self.bookmarks.get(stream)
    }

    /// Bookmark for a stream, if it was persisted under `replication_key`
    ///
    /// A bookmark written under a different key is ignored.
    pub fn get_bookmark(&self, stream: &str, replication_key: &str) -> Option<&Bookmark> {
        let stream_state = self.bookmarks.get(stream)?;
        match stream_state.replication_key.as_deref() {
            Some(key) if key != replication_key => None,
            _ => stream_state.replication_key_value.as_ref(),
        }
    }

    /// Set the bookmark for a stream
    pub fn set_bookmark(&mut self, stream: &str, replication_key: &str, bookmark: Bookmark) {
        let entry = self.bookmarks.entry(stream.to_string()).or_default();
        entry.replication_key = Some(replication_key.to_string());
        entry.replication_key_value = Some(bookmark);
    }

    /// Drop a stream's bookmark
    pub fn clear_stream(&mut self, stream: &str) -> Option<StreamState> {
        self.bookmarks.remove(stream)
    }

    /// JSON value carried by a Singer STATE message
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
    }
}

/// Bookmark entry for a single stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamState {
    /// Field the bookmark was read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key: Option<String>,

    /// Last fully-synced replication-key value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key_value: Option<Bookmark>,
}
