//! Field-level coercion shared by every record type.
//!
//! Each helper reads one property of a raw JSON record and returns a value of
//! the canonical type. None of them can fail: absent or ill-typed input
//! becomes the type's default. Every helper is idempotent on its own output.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record identifier. Backends use integer keys or UUID strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// Identifier at `raw.id`. Never defaulted: anything unusable is `None`.
pub fn record_id(raw: &Value) -> Option<RecordId> {
    match raw.get("id")? {
        Value::Number(n) => n.as_i64().map(RecordId::Int),
        Value::String(s) if !s.trim().is_empty() => Some(RecordId::Text(s.clone())),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// String field; numbers keep their decimal text, anything else is `""`.
pub fn text(raw: &Value, key: &str) -> String {
    raw.get(key).and_then(scalar_text).unwrap_or_default()
}

/// First non-empty string among `keys`, for fields backends spell two ways.
pub fn text_any(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text(raw, key))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Sequence-of-strings field.
///
/// A bare scalar becomes a single-element list; image objects contribute
/// their `url`; other elements are skipped.
pub fn text_list(raw: &Value, key: &str) -> Vec<String> {
    match raw.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(obj) => obj.get("url").and_then(scalar_text),
                other => scalar_text(other),
            })
            .collect(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(other) => scalar_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Boolean flag; only a JSON `true` is true.
pub fn flag(raw: &Value, key: &str) -> bool {
    matches!(raw.get(key), Some(Value::Bool(true)))
}

/// Free-form object field (contact info, opening hours); `{}` otherwise.
pub fn object(raw: &Value, key: &str) -> Map<String, Value> {
    match raw.get(key) {
        Some(Value::Object(obj)) => obj.clone(),
        _ => Map::new(),
    }
}
