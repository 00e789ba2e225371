//! Request windowing module
//!
//! Turns a bookmark into bounded `[from, to]` windows for the time-series
//! report endpoints.
//!
//! # Overview
//!
//! - `WindowLimits` - endpoint constraints (max lookback, max width)
//! - `RequestWindow` - one UTC `(from, to)` pair, formatted for request bodies
//! - `plan` / `WindowPlanner` - pure window computation against an explicit `now`

mod planner;
mod types;

pub use planner::{plan, resolve_start, WindowPlanner};
pub use types::{
    format_api_datetime, parse_datetime, RequestWindow, WindowLimits, API_DATETIME_FORMAT,
};
