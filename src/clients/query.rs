//! Query-string encoding for list parameter structs.
//!
//! The Dokan API filters collections through query parameters. Parameter
//! structs derive `Serialize`, and this module flattens them into ordered
//! key/value pairs:
//!
//! - `Option::None` (JSON null) and empty strings/collections are omitted
//! - numbers and booleans are stringified
//! - collections of scalars join with commas (`[15, 23]` becomes `15,23`)
//! - timestamps serialize through chrono's serde support as RFC 3339
//! - nested objects are unsupported and fail before any network I/O
//!
//! Pairs are emitted in sorted key order, so a given parameter struct
//! always produces the same query string.

use serde::Serialize;
use serde_json::Value;

use crate::clients::errors::Error;

/// Flattens a `Serialize` parameter struct into query pairs.
///
/// # Errors
///
/// Returns [`Error::Query`] when the value is not a struct/map of scalar
/// fields, and [`Error::Json`] when serialization itself fails. Both occur
/// before any network I/O.
pub fn to_query_pairs<T: Serialize>(params: &T) -> Result<Vec<(String, String)>, Error> {
    let value = serde_json::to_value(params)?;
    let Value::Object(map) = value else {
        return Err(Error::Query(format!(
            "expected a struct of parameters, got {}",
            value_kind(&value)
        )));
    };

    let mut pairs = Vec::new();
    for (key, val) in map {
        match val {
            Value::Null => {}
            Value::String(s) => {
                if !s.is_empty() {
                    pairs.push((key, s));
                }
            }
            Value::Bool(b) => pairs.push((key, b.to_string())),
            Value::Number(n) => pairs.push((key, n.to_string())),
            Value::Array(items) => {
                if items.is_empty() {
                    continue;
                }
                let mut parts = Vec::with_capacity(items.len());
                for item in &items {
                    match item {
                        Value::String(s) => parts.push(s.clone()),
                        Value::Number(n) => parts.push(n.to_string()),
                        Value::Bool(b) => parts.push(b.to_string()),
                        other => {
                            return Err(Error::Query(format!(
                                "unsupported element in collection parameter '{key}': {}",
                                value_kind(other)
                            )))
                        }
                    }
                }
                pairs.push((key, parts.join(",")));
            }
            Value::Object(_) => {
                return Err(Error::Query(format!(
                    "unsupported nested value for parameter '{key}'"
                )))
            }
        }
    }

    Ok(pairs)
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
