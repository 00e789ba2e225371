//! HTTP transport module
//!
//! The REST collaborator the stream driver calls into: authenticated request
//! execution with retry, backoff and rate limiting, returning parsed JSON.
//!
//! # Features
//!
//! - **Automatic Retries**: 429, 5xx, timeouts and connect errors are retried
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Transport Seam**: `RestClient` trait so the driver can be exercised
//!   without a network

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{RestClient, StreamRequest};

#[cfg(test)]
mod tests;
