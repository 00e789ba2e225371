//! Transport seam between the stream driver and HTTP
//!
//! The driver only ever builds a [`StreamRequest`] and hands it to a
//! [`RestClient`]; retries, authentication and JSON parsing all live behind
//! the trait.

use crate::error::Result;
use crate::types::Method;
use async_trait::async_trait;
use serde_json::Value;

/// One request against the Everflow API, relative to the base URL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL (e.g. `/networks/offers`)
    pub path: String,
    /// Query parameters, in insertion order
    pub query: Vec<(String, String)>,
    /// JSON body for POST endpoints
    pub body: Option<Value>,
}

impl StreamRequest {
    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create a POST request with a JSON body
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Look up a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a string field of the JSON body
    pub fn body_str(&self, key: &str) -> Option<&str> {
        self.body.as_ref()?.get(key)?.as_str()
    }
}

/// Executes stream requests and returns the parsed JSON body
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Send a request; transport failures and non-2xx statuses are errors
    async fn send(&self, request: &StreamRequest) -> Result<Value>;
}
