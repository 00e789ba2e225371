//! Pagination strategy implementations

use super::types::{NextPage, PageCursor, PageResponse, Paginator};
use crate::decode::extract_path;
use crate::error::{Error, Result};
use crate::state::Bookmark;
use crate::window::{format_api_datetime, parse_datetime};
use serde_json::Value;
use tracing::debug;

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination
///
/// Reads `page`, `page_size` and `total_count` from the response envelope
/// and continues while `page_size * page < total_count`. There is no
/// max-page cap.
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for page number
    pub page_param: String,
    /// Optional page size parameter name
    pub page_size_param: Option<String>,
    /// Page size value
    pub page_size: Option<u32>,
    /// Path to the paging envelope
    pub envelope_path: String,
}

impl PageNumberPaginator {
    /// Create a new page number paginator
    pub fn new(page_param: impl Into<String>) -> Self {
        Self {
            page_param: page_param.into(),
            page_size_param: None,
            page_size: None,
            envelope_path: "paging".to_string(),
        }
    }

    /// Set page size parameter
    #[must_use]
    pub fn with_page_size(mut self, param: impl Into<String>, size: u32) -> Self {
        self.page_size_param = Some(param.into());
        self.page_size = Some(size);
        self
    }

    /// Set the path of the paging envelope
    #[must_use]
    pub fn with_envelope_path(mut self, path: impl Into<String>) -> Self {
        self.envelope_path = path.into();
        self
    }

    /// Whether another page follows the one described by `body`
    pub fn has_more(&self, body: &Value) -> Result<bool> {
        let page = self.envelope_field(body, "page")?;
        let page_size = self.envelope_field(body, "page_size")?;
        let total_count = self.envelope_field(body, "total_count")?;

        Ok(page_size.saturating_mul(page) < total_count)
    }

    /// The page after the one described by `body`
    pub fn get_next(&self, body: &Value) -> Result<PageCursor> {
        let page = self.envelope_field(body, "page")?;
        let next = u32::try_from(page + 1)
            .map_err(|_| Error::malformed("paging", format!("page {page} out of range")))?;
        Ok(PageCursor::Page(next))
    }

    fn envelope_field(&self, body: &Value, field: &str) -> Result<u64> {
        let path = format!("{}.{field}", self.envelope_path);
        let value = extract_path(body, &path)
            .ok_or_else(|| Error::malformed("paging", format!("missing '{path}'")))?;

        value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
            .ok_or_else(|| {
                Error::malformed("paging", format!("'{path}' is not a count: {value}"))
            })
    }
}

impl Paginator for PageNumberPaginator {
    fn initial_cursor(&self) -> Option<PageCursor> {
        Some(PageCursor::Page(1))
    }

    fn page_params(&self, cursor: Option<PageCursor>) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(PageCursor::Page(page)) = cursor {
            params.push((self.page_param.clone(), page.to_string()));
        }
        if let (Some(param), Some(size)) = (&self.page_size_param, self.page_size) {
            params.push((param.clone(), size.to_string()));
        }
        params
    }

    fn next_page(&self, response: &PageResponse<'_>) -> Result<NextPage> {
        if !self.has_more(response.body)? {
            return Ok(NextPage::Done);
        }
        Ok(NextPage::Continue(self.get_next(response.body)?))
    }
}

// ============================================================================
// Date Cursor Pagination
// ============================================================================

/// Date cursor pagination for the clicks stream endpoint
///
/// The endpoint has no "has more" flag. The first record's timestamp
/// becomes the next window start, unless it is the window start that was
/// just requested, in which case no forward progress is possible and the
/// window is finished. An empty page also finishes the window.
#[derive(Debug, Clone)]
pub struct DateCursorPaginator {
    /// Field holding the record's Unix timestamp
    pub replication_key: String,
    /// Optional page size parameter name
    pub page_size_param: Option<String>,
    /// Page size value
    pub page_size: Option<u32>,
}

impl DateCursorPaginator {
    /// Create a new date cursor paginator
    pub fn new(replication_key: impl Into<String>) -> Self {
        Self {
            replication_key: replication_key.into(),
            page_size_param: None,
            page_size: None,
        }
    }

    /// Set page size parameter
    #[must_use]
    pub fn with_page_size(mut self, param: impl Into<String>, size: u32) -> Self {
        self.page_size_param = Some(param.into());
        self.page_size = Some(size);
        self
    }

    /// Next cursor given the page's records and the request's `from` bound
    pub fn get_next(&self, records: &[Value], requested_from: &str) -> Result<NextPage> {
        let Some(first) = records.first() else {
            debug!("Empty page, window exhausted");
            return Ok(NextPage::Done);
        };

        let next = extract_path(first, &self.replication_key)
            .map(Bookmark::from_value)
            .transpose()?
            .flatten()
            .ok_or_else(|| {
                Error::malformed(
                    "date cursor",
                    format!("first record has no '{}'", self.replication_key),
                )
            })?
            .to_datetime()?;

        if format_api_datetime(next) == requested_from {
            debug!(from = requested_from, "Leading record at window start, window exhausted");
            return Ok(NextPage::Done);
        }

        // Only reachable when the API returns records from before the
        // requested `from`; restarting there would re-request old data forever
        if parse_datetime(requested_from).is_ok_and(|from| next <= from) {
            debug!(
                from = requested_from,
                cursor = %format_api_datetime(next),
                "Cursor did not advance, window exhausted"
            );
            return Ok(NextPage::Done);
        }

        Ok(NextPage::Continue(PageCursor::Date(next)))
    }
}

impl Paginator for DateCursorPaginator {
    fn initial_cursor(&self) -> Option<PageCursor> {
        None
    }

    // The cursor travels in the request body, so only the size goes in the query
    fn page_params(&self, _cursor: Option<PageCursor>) -> Vec<(String, String)> {
        match (&self.page_size_param, self.page_size) {
            (Some(param), Some(size)) => vec![(param.clone(), size.to_string())],
            _ => Vec::new(),
        }
    }

    fn next_page(&self, response: &PageResponse<'_>) -> Result<NextPage> {
        let requested_from = response
            .request
            .body_str("from")
            .ok_or_else(|| Error::malformed("date cursor", "request body has no 'from'"))?;
        self.get_next(response.records, requested_from)
    }
}
