//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use super::strategies::{DateCursorPaginator, PageNumberPaginator};
use crate::error::Result;
use crate::http::StreamRequest;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Token identifying the next page to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCursor {
    /// 1-based page number
    Page(u32),
    /// Restart the request window at this instant
    Date(DateTime<Utc>),
}

impl std::fmt::Display for PageCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageCursor::Page(page) => write!(f, "page {page}"),
            PageCursor::Date(dt) => write!(f, "{}", crate::window::format_api_datetime(*dt)),
        }
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available at this cursor
    Continue(PageCursor),
    /// No more pages in the current window
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The cursor, if pagination continues
    pub fn cursor(&self) -> Option<PageCursor> {
        match self {
            Self::Continue(cursor) => Some(*cursor),
            Self::Done => None,
        }
    }
}

/// Everything a paginator may look at to decide on the next page
#[derive(Debug, Clone, Copy)]
pub struct PageResponse<'a> {
    /// Parsed response body
    pub body: &'a Value,
    /// Records extracted from the body
    pub records: &'a [Value],
    /// The request that produced this response
    pub request: &'a StreamRequest,
}

/// Trait for pagination strategies
pub trait Paginator: Send + Sync + std::fmt::Debug {
    /// Cursor for the first request of a window
    fn initial_cursor(&self) -> Option<PageCursor>;

    /// Query parameters that select `cursor`
    fn page_params(&self, cursor: Option<PageCursor>) -> Vec<(String, String)>;

    /// Decide on the page after `response`
    ///
    /// Missing envelope fields are fatal: pagination correctness depends on
    /// them.
    fn next_page(&self, response: &PageResponse<'_>) -> Result<NextPage>;
}

/// Configuration for pagination behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationConfig {
    /// Page number pagination driven by a paging envelope
    PageNumber {
        /// Query parameter name for page number
        page_param: String,
        /// Query parameter name for page size
        page_size_param: String,
        /// Page size value
        page_size: u32,
        /// Path to the paging envelope in the response
        envelope_path: String,
    },

    /// Date cursor read from the first record of each page
    DateCursor {
        /// Field holding the record's Unix timestamp
        replication_key: String,
        /// Query parameter name for page size
        page_size_param: String,
        /// Page size value
        page_size: u32,
    },
}

impl PaginationConfig {
    /// Everflow's standard `page`/`page_size` pagination
    pub fn page_number(page_size: u32) -> Self {
        Self::PageNumber {
            page_param: "page".to_string(),
            page_size_param: "page_size".to_string(),
            page_size,
            envelope_path: "paging".to_string(),
        }
    }

    /// Date cursor pagination on `replication_key`, sending `page_size`
    pub fn date_cursor(replication_key: impl Into<String>, page_size: u32) -> Self {
        Self::DateCursor {
            replication_key: replication_key.into(),
            page_size_param: "page_size".to_string(),
            page_size,
        }
    }

    /// Build the paginator for this configuration
    pub fn build(&self) -> Box<dyn Paginator> {
        match self {
            Self::PageNumber {
                page_param,
                page_size_param,
                page_size,
                envelope_path,
            } => Box::new(
                PageNumberPaginator::new(page_param.clone())
                    .with_page_size(page_size_param.clone(), *page_size)
                    .with_envelope_path(envelope_path.clone()),
            ),
            Self::DateCursor {
                replication_key,
                page_size_param,
                page_size,
            } => Box::new(
                DateCursorPaginator::new(replication_key.clone())
                    .with_page_size(page_size_param.clone(), *page_size),
            ),
        }
    }
}
