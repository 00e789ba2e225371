//! JSON record extraction

use crate::error::{Error, Result};
use serde_json::Value;

/// JSON decoder with a record path
#[derive(Debug, Clone)]
pub struct JsonDecoder {
    /// JSONPath to extract records
    record_path: String,
}

impl JsonDecoder {
    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: path.into(),
        }
    }

    /// The configured record path
    pub fn record_path(&self) -> &str {
        &self.record_path
    }

    /// Extract the records of one response page
    ///
    /// A path that resolves to nothing yields an empty page, which callers
    /// treat as the end of the current window.
    pub fn decode(&self, body: &Value) -> Result<Vec<Value>> {
        if self.record_path.contains('*') {
            return extract_with_jsonpath(body, &self.record_path);
        }

        match extract_path(body, &self.record_path) {
            Some(Value::Array(arr)) => Ok(arr.clone()),
            Some(Value::Null) | None => Ok(vec![]),
            Some(v) => Ok(vec![v.clone()]),
        }
    }
}

/// Walk a dot-separated path (optionally prefixed with `$.`)
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, part| match current {
        Value::Object(map) => map.get(part),
        _ => None,
    })
}

/// Extract using jsonpath-rust for wildcard paths
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath '{path}': {e}"),
    })?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
