//! Window types and datetime helpers

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Datetime format of the `from`/`to` request body fields (UTC, no suffix)
pub const API_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a datetime for a request body, truncating to whole seconds
pub fn format_api_datetime(dt: DateTime<Utc>) -> String {
    dt.format(API_DATETIME_FORMAT).to_string()
}

/// Parse a datetime string into UTC
///
/// Accepts RFC 3339 (any offset, normalized to UTC) and the naive formats
/// `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`, which are
/// taken as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", API_DATETIME_FORMAT] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(DateTime::from_naive_utc_and_offset(ndt, Utc));
        }
    }

    if let Some(ndt) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(DateTime::from_naive_utc_and_offset(ndt, Utc));
    }

    Err(Error::config(format!("Invalid datetime format: {s}")))
}

/// Constraints an endpoint places on a single request window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowLimits {
    /// How far before `now` the window may start
    pub max_lookback: Option<Duration>,
    /// Maximum `to - from`
    pub max_width: Option<Duration>,
}

impl WindowLimits {
    /// No constraints: one window from the start up to `now`
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Both constraints set
    pub fn bounded(max_lookback: Duration, max_width: Duration) -> Self {
        Self {
            max_lookback: Some(max_lookback),
            max_width: Some(max_width),
        }
    }

    /// Raw click report: ~3 months of history, at most 2 weeks per request
    pub fn clicks() -> Self {
        Self::bounded(Duration::days(90), Duration::days(14))
    }

    /// Whether the planner may split the range into several windows
    pub fn is_bounded(&self) -> bool {
        self.max_width.is_some()
    }
}

/// A UTC `[from, to]` request window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestWindow {
    /// Lower bound
    pub from: DateTime<Utc>,
    /// Upper bound
    pub to: DateTime<Utc>,
}

impl RequestWindow {
    /// `from` formatted for the request body
    pub fn from_param(&self) -> String {
        format_api_datetime(self.from)
    }

    /// `to` formatted for the request body
    pub fn to_param(&self) -> String {
        format_api_datetime(self.to)
    }

    /// `to - from`
    pub fn width(&self) -> Duration {
        self.to - self.from
    }

    /// Whether this window already reaches the sync ceiling
    pub fn reaches(&self, now: DateTime<Utc>) -> bool {
        self.to >= now
    }
}

impl std::fmt::Display for RequestWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.from_param(), self.to_param())
    }
}
