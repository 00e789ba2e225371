//! Schema module
//!
//! JSON Schema types used for catalog entries and SCHEMA messages. Every
//! Everflow field is declared nullable: the API omits or nulls fields freely.

mod types;

pub use types::{FieldType, JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty};
