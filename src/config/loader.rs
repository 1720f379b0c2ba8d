//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Function gateway base URL. When present the gateway is used.
pub const ENV_FUNCTIONS_URL: &str = "GUIDE_FUNCTIONS_URL";
/// Public API key for the function gateway.
pub const ENV_FUNCTIONS_KEY: &str = "GUIDE_FUNCTIONS_KEY";
/// Legacy REST server base URL.
pub const ENV_API_URL: &str = "GUIDE_API_URL";
pub const ENV_CACHE_TTL_SECS: &str = "GUIDE_CACHE_TTL_SECS";
pub const ENV_LOG_LEVEL: &str = "GUIDE_LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then the environment, then validation.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ClientConfig::default(),
    };

    apply_env(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` resolves a variable name; empty values count as unset.
pub fn apply_env<F>(config: &mut ClientConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(url) = var(ENV_FUNCTIONS_URL) {
        config.backend.functions_url = Some(url);
    }
    if let Some(key) = var(ENV_FUNCTIONS_KEY) {
        config.backend.functions_key = Some(key);
    }
    if let Some(url) = var(ENV_API_URL) {
        config.backend.legacy_url = url;
    }
    if let Some(raw) = var(ENV_CACHE_TTL_SECS) {
        config.cache.ttl_secs = raw.trim().parse().map_err(|_| ConfigError::Env {
            var: ENV_CACHE_TTL_SECS,
            value: raw.clone(),
        })?;
    }
    if let Some(level) = var(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }

    Ok(())
}
