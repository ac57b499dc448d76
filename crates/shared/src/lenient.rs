//! Tolerant field decoders for upstream agreement payloads
//!
//! The articulation service ships loosely typed JSON: fields go missing, change
//! type, or carry nodes of kinds we do not model. These helpers are used with
//! `#[serde(deserialize_with = ...)]` so that a bad field degrades to "absent"
//! instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Keep a field only when it is a JSON string
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Decode an array, dropping elements that do not fit `T`
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(elements) => Ok(decode_all(elements)),
        Value::Null => Ok(Vec::new()),
        other => {
            debug!(found = %kind_of(&other), "Expected an array, treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Decode a nested object, yielding `None` when it is missing or malformed
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match serde_json::from_value(value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(err) => {
            debug!(error = %err, "Dropping malformed nested object");
            Ok(None)
        }
    }
}

/// Ordering key of a template asset; any JSON number, 0.0 when absent
pub fn position<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

/// Decode each element independently, skipping the ones that fail
pub fn decode_all<T: DeserializeOwned>(elements: Vec<Value>) -> Vec<T> {
    elements
        .into_iter()
        .filter_map(|element| match serde_json::from_value(element) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                debug!(error = %err, "Skipping undecodable element");
                None
            }
        })
        .collect()
}

/// JavaScript-style truthiness, matching how the upstream flags are set
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
