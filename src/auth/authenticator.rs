//! Authenticator implementation
//!
//! Applies the configured credentials to outgoing requests.

use super::types::{AuthConfig, Location};
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,
            AuthConfig::ApiKey {
                location,
                name,
                value,
            } => match location {
                Location::Header => req.header(name.as_str(), value.as_str()),
                Location::Query => req.query(&[(name.as_str(), value.as_str())]),
            },
        }
    }

    /// Whether any credentials are configured
    pub fn is_configured(&self) -> bool {
        !matches!(self.config, AuthConfig::None)
    }
}
