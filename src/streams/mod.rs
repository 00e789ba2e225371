//! Everflow streams
//!
//! Static definitions of the three resources the tap syncs, plus the
//! catalog built from them and the UTC timezone lookup the reporting
//! endpoints need.
//!
//! | Stream        | Endpoint                                  | Pagination  | Replication key             |
//! |---------------|-------------------------------------------|-------------|-----------------------------|
//! | `offers`      | `GET /networks/offers`                    | page number | -                           |
//! | `conversions` | `POST /networks/reporting/conversions`    | page number | `conversion_unix_timestamp` |
//! | `clicks`      | `POST /networks/reporting/clicks/stream`  | date cursor | `unix_timestamp`            |

mod catalog;
mod definitions;
mod fields;
mod timezone;

pub use catalog::{selected_stream_ids, Catalog, CatalogEntry};
pub use definitions::{all_streams, find_stream, select_streams, RequestBody, StreamDefinition};
pub use timezone::{resolve_utc_timezone_id, TIMEZONES_PATH};
