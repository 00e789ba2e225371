//! Singer catalog built from the stream definitions

use super::definitions::StreamDefinition;
use crate::error::{Error, Result};
use crate::schema::JsonSchema;
use crate::types::ReplicationMethod;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Discovered catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// One entry per stream
    pub streams: Vec<CatalogEntry>,
}

impl Catalog {
    /// Catalog of the given streams
    pub fn from_streams(streams: &[StreamDefinition]) -> Self {
        Self {
            streams: streams.iter().map(CatalogEntry::from_stream).collect(),
        }
    }

    /// Find an entry by stream id
    pub fn get(&self, stream: &str) -> Option<&CatalogEntry> {
        self.streams.iter().find(|e| e.tap_stream_id == stream)
    }
}

/// Catalog entry for one stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub tap_stream_id: String,
    pub stream: String,
    pub schema: JsonSchema,
    pub key_properties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication_key: Option<String>,
    pub replication_method: ReplicationMethod,
    /// Singer breadcrumb metadata
    pub metadata: Vec<Value>,
}

impl CatalogEntry {
    /// Entry describing `stream`
    pub fn from_stream(stream: &StreamDefinition) -> Self {
        let key_properties: Vec<String> =
            stream.primary_key.iter().map(ToString::to_string).collect();
        let valid_replication_keys: Vec<&str> = stream.replication_key.into_iter().collect();

        let mut metadata = vec![json!({
            "breadcrumb": [],
            "metadata": {
                "inclusion": "available",
                "selected": true,
                "table-key-properties": key_properties,
                "valid-replication-keys": valid_replication_keys,
                "forced-replication-method": stream.replication_method(),
            }
        })];

        let schema = stream.schema();
        for name in schema.properties.keys() {
            let inclusion = if key_properties.contains(name)
                || stream.replication_key == Some(name.as_str())
            {
                "automatic"
            } else {
                "available"
            };
            metadata.push(json!({
                "breadcrumb": ["properties", name],
                "metadata": {"inclusion": inclusion},
            }));
        }

        Self {
            tap_stream_id: stream.name.to_string(),
            stream: stream.name.to_string(),
            schema,
            key_properties,
            replication_key: stream.replication_key.map(ToString::to_string),
            replication_method: stream.replication_method(),
            metadata,
        }
    }
}

/// Stream ids a host catalog marks as selected, in catalog order
///
/// A stream is selected when its root (`breadcrumb: []`) metadata, or the
/// entry itself, carries `"selected": true`.
pub fn selected_stream_ids(catalog: &Value) -> Result<Vec<String>> {
    let entries = catalog
        .get("streams")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::config("Catalog has no 'streams' array"))?;

    let mut selected = Vec::new();
    for entry in entries {
        let id = entry
            .get("tap_stream_id")
            .or_else(|| entry.get("stream"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::config("Catalog entry has no 'tap_stream_id'"))?;

        if is_selected(entry) {
            selected.push(id.to_string());
        }
    }
    Ok(selected)
}

fn is_selected(entry: &Value) -> bool {
    let root = entry
        .get("metadata")
        .and_then(Value::as_array)
        .and_then(|items| {
            items.iter().find(|m| {
                m.get("breadcrumb")
                    .and_then(Value::as_array)
                    .is_some_and(Vec::is_empty)
            })
        })
        .and_then(|m| m.pointer("/metadata/selected"))
        .and_then(Value::as_bool);

    root.or_else(|| entry.get("selected").and_then(Value::as_bool))
        .unwrap_or(false)
}
