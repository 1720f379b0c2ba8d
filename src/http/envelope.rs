//! Response envelope handling.
//!
//! # Responsibilities
//! - Define the `{ success, data?, error? }` envelope returned to callers
//! - Classify a raw HTTP response (status, content type, body text) into a
//!   payload or a typed failure
//! - Unwrap list containers (`[..]`, `items`, `<collection>`, `data`)
//!
//! # Design Decisions
//! - The body is always read as text first; content type is checked before
//!   any JSON parsing so HTML error pages never reach the parser
//! - Failures are typed (`RequestError`) internally and flattened into the
//!   envelope only at the client boundary

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Wire-level result returned by every client call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
        }
    }

    /// Convert back into a `Result`, for callers that prefer `?`.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("envelope marked successful but carried no data".to_string()),
            (false, _) => Err(self.error.unwrap_or_else(|| "request failed".to_string())),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Envelope<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Envelope::success(data),
            Err(e) => Envelope::failure(e.to_string()),
        }
    }
}

/// Why a request did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// DNS, connection or body-read failure.
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx status. `message` is the server's error text when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx response whose envelope said `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// Non-empty body with a non-JSON content type (HTML error page etc.).
    #[error("Non-JSON response from server (status {status}, content-type '{content_type}')")]
    NonJson { status: u16, content_type: String },

    /// Body claimed to be JSON but did not parse.
    #[error("Malformed response from server: {0}")]
    Malformed(String),
}

impl RequestError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::Transport(_) => "transport",
            RequestError::Status { .. } => "status",
            RequestError::Rejected(_) => "rejected",
            RequestError::NonJson { .. } => "non_json",
            RequestError::Malformed(_) => "malformed",
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        RequestError::Transport(e.to_string())
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Server-supplied error text from a JSON body, if any.
fn server_message(body: &Value) -> Option<String> {
    ["error", "message"].iter().find_map(|field| match body.get(*field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

/// Turn a raw HTTP response into the unwrapped payload.
pub fn decode_response(
    status: u16,
    content_type: Option<&str>,
    body: &str,
) -> Result<Value, RequestError> {
    let success = (200..300).contains(&status);
    let trimmed = body.trim();

    if !trimmed.is_empty() && !content_type.is_some_and(is_json_content_type) {
        return Err(RequestError::NonJson {
            status,
            content_type: content_type.unwrap_or("none").to_string(),
        });
    }

    let parsed = if trimmed.is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(trimmed).map_err(|e| RequestError::Malformed(e.to_string()))?
    };

    if !success {
        return Err(RequestError::Status {
            status,
            message: server_message(&parsed)
                .unwrap_or_else(|| format!("Request failed: {}", status)),
        });
    }

    match parsed {
        Value::Object(mut obj) if obj.get("success").is_some_and(Value::is_boolean) => {
            if obj.get("success") == Some(&Value::Bool(true)) {
                Ok(obj.remove("data").unwrap_or(Value::Null))
            } else {
                let message = server_message(&Value::Object(obj))
                    .unwrap_or_else(|| "Request rejected by server".to_string());
                Err(RequestError::Rejected(message))
            }
        }
        other => Ok(other),
    }
}

/// Which container shape a list payload arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerShape {
    BareArray,
    Items,
    Collection,
    Data,
    /// No known shape matched; treated as zero records.
    Unrecognized,
}

/// A list payload with its container peeled off.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub shape: ContainerShape,
    pub records: Vec<Value>,
}

impl Container {
    /// Unwrap a list payload. Shapes are tried in order: bare array, `items`,
    /// `collection_key`, `data`; the first one holding an array wins.
    pub fn unwrap(payload: Value, collection_key: &str) -> Container {
        let mut obj = match payload {
            Value::Array(records) => {
                return Container {
                    shape: ContainerShape::BareArray,
                    records,
                }
            }
            Value::Object(obj) => obj,
            other => {
                tracing::warn!(
                    collection = collection_key,
                    payload_type = json_type(&other),
                    "Unrecognized list payload, treating as zero records"
                );
                return Container::empty();
            }
        };

        let candidates = [
            ("items", ContainerShape::Items),
            (collection_key, ContainerShape::Collection),
            ("data", ContainerShape::Data),
        ];
        for (key, shape) in candidates {
            if let Some(Value::Array(_)) = obj.get(key) {
                if let Some(Value::Array(records)) = obj.remove(key) {
                    return Container { shape, records };
                }
            }
        }

        tracing::warn!(
            collection = collection_key,
            keys = ?obj.keys().collect::<Vec<_>>(),
            "Unrecognized list payload, treating as zero records"
        );
        Container::empty()
    }

    fn empty() -> Container {
        Container {
            shape: ContainerShape::Unrecognized,
            records: Vec::new(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.shape != ContainerShape::Unrecognized
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
