//! Stream definitions and request building

use super::fields;
use crate::error::{Error, Result};
use crate::http::StreamRequest;
use crate::pagination::PaginationConfig;
use crate::schema::{FieldType, JsonSchema};
use crate::types::{Method, ReplicationMethod};
use crate::window::{RequestWindow, WindowLimits};
use serde_json::{json, Value};

/// Records per page requested from page-number endpoints
const PAGE_SIZE: u32 = 2000;

/// Shape of the JSON body a stream POSTs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestBody {
    /// GET endpoint, no body
    None,
    /// Conversions report: window, timezone, conversions and events
    Conversions,
    /// Clicks stream: window and timezone
    Clicks,
}

/// Static description of one Everflow resource
#[derive(Debug, Clone)]
pub struct StreamDefinition {
    /// Stream name
    pub name: &'static str,
    /// HTTP method
    pub method: Method,
    /// Path relative to the API base URL
    pub path: &'static str,
    /// JSONPath to the records in a response
    pub records_path: &'static str,
    /// Primary key fields
    pub primary_key: &'static [&'static str],
    /// Field used to bookmark incremental syncs
    pub replication_key: Option<&'static str>,
    /// Pagination strategy
    pub pagination: PaginationConfig,
    /// Request window limits for time-series endpoints
    pub window: Option<WindowLimits>,
    /// Request body shape
    pub body: RequestBody,
    fields: &'static [(&'static str, FieldType)],
}

impl StreamDefinition {
    /// The `offers` stream
    pub fn offers() -> Self {
        Self {
            name: "offers",
            method: Method::GET,
            path: "/networks/offers",
            records_path: "$.offers[*]",
            primary_key: &["network_offer_id"],
            replication_key: None,
            pagination: PaginationConfig::page_number(PAGE_SIZE),
            window: None,
            body: RequestBody::None,
            fields: fields::OFFERS,
        }
    }

    /// The `conversions` stream
    pub fn conversions() -> Self {
        Self {
            name: "conversions",
            method: Method::POST,
            path: "/networks/reporting/conversions",
            records_path: "$.conversions[*]",
            primary_key: &["conversion_id"],
            replication_key: Some("conversion_unix_timestamp"),
            pagination: PaginationConfig::page_number(PAGE_SIZE),
            window: Some(WindowLimits::unbounded()),
            body: RequestBody::Conversions,
            fields: fields::CONVERSIONS,
        }
    }

    /// The `clicks` stream
    pub fn clicks() -> Self {
        Self {
            name: "clicks",
            method: Method::POST,
            path: "/networks/reporting/clicks/stream",
            records_path: "$.clicks[*]",
            primary_key: &["transaction_id"],
            replication_key: Some("unix_timestamp"),
            pagination: PaginationConfig::date_cursor("unix_timestamp", PAGE_SIZE),
            window: Some(WindowLimits::clicks()),
            body: RequestBody::Clicks,
            fields: fields::CLICKS,
        }
    }

    /// How this stream replicates between runs
    pub fn replication_method(&self) -> ReplicationMethod {
        if self.replication_key.is_some() {
            ReplicationMethod::Incremental
        } else {
            ReplicationMethod::FullTable
        }
    }

    /// Whether requests need the account's UTC timezone id
    pub fn needs_timezone(&self) -> bool {
        self.body != RequestBody::None
    }

    /// JSON schema of this stream's records
    pub fn schema(&self) -> JsonSchema {
        JsonSchema::from_fields(self.fields)
    }

    /// Build the request for one page
    ///
    /// `window` is required for POST reporting endpoints and ignored for
    /// GET endpoints, as is `timezone_id`.
    pub fn build_request(
        &self,
        window: Option<&RequestWindow>,
        timezone_id: Option<i64>,
        page_params: Vec<(String, String)>,
    ) -> Result<StreamRequest> {
        let mut request = match self.body {
            RequestBody::None => StreamRequest::get(self.path),
            RequestBody::Conversions | RequestBody::Clicks => {
                let window = window.ok_or_else(|| {
                    Error::config(format!("Stream '{}' requires a request window", self.name))
                })?;
                let timezone_id = timezone_id.ok_or_else(|| {
                    Error::config(format!("Stream '{}' requires a timezone id", self.name))
                })?;

                let mut body = json!({
                    "from": window.from_param(),
                    "to": window.to_param(),
                    "timezone_id": timezone_id,
                });
                if self.body == RequestBody::Conversions {
                    body["show_conversions"] = Value::Bool(true);
                    body["show_events"] = Value::Bool(true);
                }
                StreamRequest::post(self.path, body)
            }
        };

        request.method = self.method;
        request.query.extend(page_params);
        Ok(request)
    }

    /// Per-record cleanup applied before a record is emitted
    pub fn post_process(&self, mut record: Value) -> Value {
        if self.name == "offers" {
            // Everflow sends 0, "" or nothing for offers with no end date
            if let Some(row) = record.as_object_mut() {
                if row.get("date_live_until").map_or(true, is_falsy) {
                    row.insert("date_live_until".to_string(), Value::Null);
                }
            }
        }
        record
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Every stream the tap supports, in sync order
pub fn all_streams() -> Vec<StreamDefinition> {
    vec![
        StreamDefinition::offers(),
        StreamDefinition::conversions(),
        StreamDefinition::clicks(),
    ]
}

/// Look up a stream by name
pub fn find_stream(name: &str) -> Result<StreamDefinition> {
    all_streams()
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| Error::StreamNotFound {
            stream: name.to_string(),
        })
}

/// Resolve a stream selection; an empty selection means every stream
///
/// Selected streams keep sync order regardless of how they were listed.
pub fn select_streams(names: &[String]) -> Result<Vec<StreamDefinition>> {
    for name in names {
        find_stream(name)?;
    }
    Ok(all_streams()
        .into_iter()
        .filter(|s| names.is_empty() || names.iter().any(|n| n == s.name))
        .collect())
}
