//! Tap configuration
//!
//! Loaded from `--config <file>` or `--config-json`. Only `api_key` is
//! required; everything else has a default.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::window::parse_datetime;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

/// Everflow network API root
pub const DEFAULT_BASE_URL: &str = "https://api.eflow.team/v1";

/// How far back a first sync reaches when no `start_date` is configured
const DEFAULT_HISTORY_DAYS: i64 = 365;

/// Configuration for the tap
#[derive(Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// Everflow network API key
    pub api_key: String,

    /// Earliest record date to sync on a first run
    #[serde(default)]
    pub start_date: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Client-side request rate limit
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

impl TapConfig {
    /// Config with defaults for everything but the API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            start_date: None,
            base_url: default_base_url(),
            user_agent: None,
            requests_per_second: default_requests_per_second(),
        }
    }

    /// Parse and validate a config object
    pub fn from_value(value: Value) -> Result<Self> {
        let has_key = value
            .get("api_key")
            .and_then(Value::as_str)
            .is_some_and(|k| !k.is_empty());
        if !has_key {
            return Err(Error::missing_field("api_key"));
        }

        let config: Self = serde_json::from_value(value)
            .map_err(|e| Error::config(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate inline config JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Read, parse and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
        Self::from_json(&content)
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;

        if let Some(start) = &self.start_date {
            parse_datetime(start)
                .map_err(|_| Error::invalid_value("start_date", format!("'{start}' is not a date")))?;
        }

        if self.requests_per_second == 0 {
            return Err(Error::invalid_value(
                "requests_per_second",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Configured start date, or one year before `now`
    pub fn start_date(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        match &self.start_date {
            Some(start) => parse_datetime(start),
            None => Ok(now - Duration::days(DEFAULT_HISTORY_DAYS)),
        }
    }

    /// Authentication for Everflow requests
    pub fn auth(&self) -> AuthConfig {
        AuthConfig::everflow(self.api_key.clone())
    }

    /// HTTP client settings
    pub fn http_config(&self) -> HttpClientConfig {
        let config = HttpClientConfig::default()
            .with_base_url(self.base_url.clone())
            .with_rate_limit(Some(RateLimiterConfig::per_second(
                self.requests_per_second,
            )));

        match &self.user_agent {
            Some(agent) => config.with_user_agent(agent.clone()),
            None => config,
        }
    }

    /// JSON schema describing the accepted config
    pub fn spec() -> Value {
        json!({
            "type": "object",
            "title": "Everflow",
            "required": ["api_key"],
            "properties": {
                "api_key": {
                    "type": "string",
                    "title": "API Key",
                    "description": "Everflow network API key",
                    "secret": true
                },
                "start_date": {
                    "type": "string",
                    "format": "date-time",
                    "description": "Earliest record date to sync; defaults to one year ago"
                },
                "base_url": {
                    "type": "string",
                    "format": "uri",
                    "default": DEFAULT_BASE_URL
                },
                "user_agent": {"type": "string"},
                "requests_per_second": {
                    "type": "integer",
                    "minimum": 1,
                    "default": default_requests_per_second()
                }
            }
        })
    }
}

impl std::fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapConfig")
            .field("api_key", &"[REDACTED]")
            .field("start_date", &self.start_date)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}
