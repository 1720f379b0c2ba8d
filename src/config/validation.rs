//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check base URLs parse and use an HTTP scheme
//! - Validate value ranges (ttl > 0, timeout > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: unsupported scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { field: &'static str, scheme: String },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Parse a base URL, accepting only http and https.
pub fn parse_base_url(field: &'static str, value: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(value).map_err(|e| ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ValidationError::UnsupportedScheme {
            field,
            scheme: other.to_string(),
        }),
    }
}

/// Validate a loaded configuration, collecting every problem.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = parse_base_url("backend.legacy_url", &config.backend.legacy_url) {
        errors.push(e);
    }

    if let Some(functions_url) = &config.backend.functions_url {
        if let Err(e) = parse_base_url("backend.functions_url", functions_url) {
            errors.push(e);
        }
    }

    if config.cache.ttl_secs == 0 {
        errors.push(ValidationError::NotPositive("cache.ttl_secs"));
    }

    if config.http.request_timeout_secs == Some(0) {
        errors.push(ValidationError::NotPositive("http.request_timeout_secs"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
