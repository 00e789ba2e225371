//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Header carrying the Everflow network API key
pub const EVERFLOW_API_KEY_HEADER: &str = "X-Eflow-API-Key";

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Place in HTTP header
    #[default]
    Header,
    /// Place in query parameter
    Query,
}

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication (used against local mock servers)
    #[default]
    None,

    /// API key authentication
    ApiKey {
        /// Where to place the API key
        location: Location,
        /// Header or query parameter name
        name: String,
        /// The API key value
        value: String,
    },
}

impl AuthConfig {
    /// API key in the `X-Eflow-API-Key` header
    pub fn everflow(api_key: impl Into<String>) -> Self {
        Self::ApiKey {
            location: Location::Header,
            name: EVERFLOW_API_KEY_HEADER.to_string(),
            value: api_key.into(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::ApiKey { location, name, .. } => f
                .debug_struct("ApiKey")
                .field("location", location)
                .field("name", name)
                .field("value", &"<redacted>")
                .finish(),
        }
    }
}
