// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tap-everflow
//!
//! A Singer tap for the Everflow network API. Syncs offers (full table),
//! conversions and clicks (incremental) and emits SCHEMA, RECORD and STATE
//! messages as JSON lines.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_everflow::cli::read_streams;
//! use tap_everflow::config::TapConfig;
//! use tap_everflow::engine::{JsonLinesSink, SyncConfig};
//! use tap_everflow::http::HttpClient;
//! use tap_everflow::state::StateManager;
//!
//! #[tokio::main]
//! async fn main() -> tap_everflow::Result<()> {
//!     let config = TapConfig::new("api-key");
//!     let client = HttpClient::with_auth(config.http_config(), config.auth())?;
//!     let mut sink = JsonLinesSink::new(std::io::stdout());
//!
//!     read_streams(
//!         Box::new(client),
//!         &config,
//!         StateManager::from_file("state.json")?,
//!         &[],
//!         SyncConfig::new(),
//!         &mut sink,
//!     )
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  cli: spec / check / discover / read                         │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │  engine: SyncEngine (START → REQUEST → PAGINATE → DONE)      │
//! └───────┬──────────────┬──────────────┬──────────────┬─────────┘
//!         │              │              │              │
//! ┌───────┴─────┐ ┌──────┴──────┐ ┌─────┴──────┐ ┌─────┴───────┐
//! │  streams    │ │ pagination  │ │  window    │ │  state      │
//! │ offers      │ │ page number │ │ lookback   │ │ bookmarks   │
//! │ conversions │ │ date cursor │ │ max width  │ │ Singer JSON │
//! │ clicks      │ │             │ │            │ │             │
//! └───────┬─────┘ └─────────────┘ └────────────┘ └─────────────┘
//!         │
//! ┌───────┴──────────────────────────────────────────────────────┐
//! │  http: RestClient / HttpClient (retry, rate limit, API key)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap configuration
pub mod config;

/// API key authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// JSONPath record extraction
pub mod decode;

/// Pagination strategies
pub mod pagination;

/// Request window planning
pub mod window;

/// Bookmarks and state persistence
pub mod state;

/// JSON schema types
pub mod schema;

/// Everflow stream definitions
pub mod streams;

/// Stream driver
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
