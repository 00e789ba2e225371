//! Pagination module
//!
//! Supports: Page Number, Date Cursor
//!
//! # Overview
//!
//! Each strategy inspects a response and decides whether the stream has
//! another page, and if so what cursor identifies it:
//!
//! - `PageNumberPaginator` - `paging.{page,page_size,total_count}` envelope
//!   (offers, conversions)
//! - `DateCursorPaginator` - leading record's timestamp restarts the window
//!   (clicks)

mod strategies;
mod types;

pub use strategies::{DateCursorPaginator, PageNumberPaginator};
pub use types::{NextPage, PageCursor, PageResponse, PaginationConfig, Paginator};
