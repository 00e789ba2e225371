//! Window planning
//!
//! All functions take `now` explicitly so planning never reads the wall
//! clock.

use super::types::{RequestWindow, WindowLimits};
use chrono::{DateTime, Utc};

/// Compute the request window for a desired start
///
/// `from = min(max(start, now - max_lookback), now)` and
/// `to = min(from + max_width, now)`. A start older than the lookback is
/// clamped forward rather than rejected. Holds `from <= to <= now`.
pub fn plan(start: DateTime<Utc>, now: DateTime<Utc>, limits: WindowLimits) -> RequestWindow {
    let mut from = start;
    if let Some(lookback) = limits.max_lookback {
        let earliest = now
            .checked_sub_signed(lookback)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        from = from.max(earliest);
    }
    from = from.min(now);

    let to = match limits.max_width {
        Some(width) => from
            .checked_add_signed(width)
            .map_or(now, |end| end.min(now)),
        None => now,
    };

    RequestWindow { from, to }
}

/// Pick where a window starts: a pagination cursor wins over the bookmark,
/// which wins over the configured start date
pub fn resolve_start(
    cursor: Option<DateTime<Utc>>,
    bookmark: Option<DateTime<Utc>>,
    start_date: DateTime<Utc>,
) -> DateTime<Utc> {
    cursor.or(bookmark).unwrap_or(start_date)
}

/// Plans the successive windows of one stream sync against a fixed `now`
#[derive(Debug, Clone, Copy)]
pub struct WindowPlanner {
    limits: WindowLimits,
    now: DateTime<Utc>,
}

impl WindowPlanner {
    /// Create a planner for one sync session
    pub fn new(limits: WindowLimits, now: DateTime<Utc>) -> Self {
        Self { limits, now }
    }

    /// The ceiling every window is capped at
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Endpoint constraints
    pub fn limits(&self) -> WindowLimits {
        self.limits
    }

    /// Window starting at `start`
    pub fn window_at(&self, start: DateTime<Utc>) -> RequestWindow {
        plan(start, self.now, self.limits)
    }

    /// The window following `window`, or `None` once `now` was reached
    ///
    /// Consecutive windows share their boundary instant: the next `from` is
    /// the previous `to`.
    pub fn advance(&self, window: &RequestWindow) -> Option<RequestWindow> {
        if window.reaches(self.now) {
            None
        } else {
            Some(self.window_at(window.to))
        }
    }
}
