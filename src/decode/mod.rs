//! Response decoding module
//!
//! Extracts records from a parsed response body using the stream's
//! configured JSONPath (e.g. `$.clicks[*]`), and reads single values out of
//! the response envelope for pagination.

mod decoders;

pub use decoders::{extract_path, JsonDecoder};
