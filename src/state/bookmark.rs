//! Bookmarks and the per-stream bookmark tracker

use crate::decode::extract_path;
use crate::error::{Error, Result};
use crate::window::parse_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A replication-key value marking sync progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bookmark {
    /// Unix timestamp in seconds
    Unix(i64),
    /// ISO-8601 datetime string
    DateTime(String),
}

impl Bookmark {
    /// Read a bookmark out of a JSON value
    ///
    /// Returns `Ok(None)` for null, an error for anything that is not a
    /// timestamp.
    pub fn from_value(value: &Value) -> Result<Option<Self>> {
        let bookmark = match value {
            Value::Null => return Ok(None),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .map(Bookmark::Unix),
            Value::String(s) => match s.trim().parse::<i64>() {
                Ok(secs) => Some(Bookmark::Unix(secs)),
                Err(_) => Some(Bookmark::DateTime(s.clone())),
            },
            _ => None,
        };

        let bookmark = bookmark.ok_or_else(|| Error::InvalidBookmark {
            value: value.to_string(),
        })?;
        bookmark.to_datetime()?;
        Ok(Some(bookmark))
    }

    /// The UTC instant this bookmark denotes
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        match self {
            Bookmark::Unix(secs) => {
                DateTime::from_timestamp(*secs, 0).ok_or_else(|| Error::InvalidBookmark {
                    value: secs.to_string(),
                })
            }
            Bookmark::DateTime(s) => parse_datetime(s).map_err(|_| Error::InvalidBookmark {
                value: s.clone(),
            }),
        }
    }

    /// JSON form, as persisted in state
    pub fn to_value(&self) -> Value {
        match self {
            Bookmark::Unix(secs) => Value::from(*secs),
            Bookmark::DateTime(s) => Value::from(s.as_str()),
        }
    }
}

impl From<DateTime<Utc>> for Bookmark {
    fn from(dt: DateTime<Utc>) -> Self {
        Bookmark::Unix(dt.timestamp())
    }
}

impl std::fmt::Display for Bookmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bookmark::Unix(secs) => write!(f, "{secs}"),
            Bookmark::DateTime(s) => f.write_str(s),
        }
    }
}

/// Tracks one stream's bookmark while it syncs
///
/// The tracked value only moves forward: replaying a page, or a page whose
/// records are older than the current bookmark, leaves it unchanged.
#[derive(Debug, Clone)]
pub struct BookmarkTracker {
    replication_key: String,
    value: Option<(Bookmark, DateTime<Utc>)>,
}

impl BookmarkTracker {
    /// Start tracking from a persisted bookmark (if any)
    pub fn new(replication_key: impl Into<String>, initial: Option<Bookmark>) -> Result<Self> {
        let value = initial
            .map(|b| b.to_datetime().map(|dt| (b, dt)))
            .transpose()?;
        Ok(Self {
            replication_key: replication_key.into(),
            value,
        })
    }

    /// The replication key this tracker reads from records
    pub fn replication_key(&self) -> &str {
        &self.replication_key
    }

    /// Current bookmark
    pub fn bookmark(&self) -> Option<&Bookmark> {
        self.value.as_ref().map(|(b, _)| b)
    }

    /// Current bookmark as a UTC instant
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.value.as_ref().map(|(_, dt)| *dt)
    }

    /// Move the bookmark to `candidate` if it is strictly later
    ///
    /// Returns whether the bookmark changed.
    pub fn advance(&mut self, candidate: Bookmark) -> Result<bool> {
        let instant = candidate.to_datetime()?;
        if self.instant().is_some_and(|current| instant <= current) {
            return Ok(false);
        }

        debug!(key = %self.replication_key, bookmark = %candidate, "Bookmark advanced");
        self.value = Some((candidate, instant));
        Ok(true)
    }

    /// Advance to the largest replication-key value among a page of records
    ///
    /// Records without the key are skipped. Returns whether the bookmark
    /// changed.
    pub fn observe_page(&mut self, records: &[Value]) -> Result<bool> {
        let mut page_max: Option<(Bookmark, DateTime<Utc>)> = None;

        for record in records {
            let Some(value) = extract_path(record, &self.replication_key) else {
                continue;
            };
            let Some(bookmark) = Bookmark::from_value(value)? else {
                continue;
            };
            let instant = bookmark.to_datetime()?;
            if page_max.as_ref().map_or(true, |(_, max)| instant > *max) {
                page_max = Some((bookmark, instant));
            }
        }

        match page_max {
            Some((bookmark, _)) => self.advance(bookmark),
            None => Ok(false),
        }
    }
}
