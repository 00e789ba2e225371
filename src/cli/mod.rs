//! CLI module
//!
//! Command-line interface for running the tap.
//!
//! # Commands
//!
//! - `spec` - Print the config specification
//! - `check` - Test connection to the API
//! - `discover` - Print the stream catalog
//! - `read` - Extract data from streams (`--streams` or a `--catalog` selection)

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{check_connection, read_streams, Runner};
