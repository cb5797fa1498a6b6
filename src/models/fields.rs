//! Serde helpers for server field values
//!
//! The server encodes an empty text or relation field as `false` rather than
//! `null`. These helpers fold both into `None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a text field that may be a string, `false` or `null`
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Ok(Some(s)),
        Value::String(_) | Value::Null | Value::Bool(false) => Ok(None),
        other => Err(serde::de::Error::custom(format!(
            "expected text or false, got {}",
            other
        ))),
    }
}
