//! Authentication module
//!
//! Everflow authenticates every request with a network API key sent in the
//! `X-Eflow-API-Key` header.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Location, EVERFLOW_API_KEY_HEADER};

#[cfg(test)]
mod tests;
