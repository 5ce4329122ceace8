//! Deserialization helpers for backend payloads.

use serde::Deserialize;
use serde_json::Value;

/// Accept an identifier sent either as a JSON string or a number.
///
/// The backend emits numeric ids for some resources and strings for others.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
