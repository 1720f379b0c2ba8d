//! Backend target resolution.
//!
//! # Responsibilities
//! - Decide once which deployment every call goes to
//! - Build full request URLs for logical endpoints
//! - Expose the gateway API key, if any
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - Function gateway wins whenever its base URL is configured

use std::fmt;

use url::Url;

use crate::config::schema::BackendConfig;
use crate::config::validation::{parse_base_url, ValidationError};
use crate::routing::endpoints::PathScheme;

/// The deployment every request is sent to.
#[derive(Clone, PartialEq, Eq)]
pub enum BackendTarget {
    /// Serverless function gateway.
    Functions { base_url: Url, api_key: Option<String> },
    /// Legacy REST server.
    Legacy { base_url: Url },
}

impl BackendTarget {
    /// Resolve the target from backend configuration.
    pub fn resolve(config: &BackendConfig) -> Result<Self, ValidationError> {
        match config.functions_url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(url) => {
                let base_url = parse_base_url("backend.functions_url", url)?;
                let api_key = config.functions_key.clone().filter(|k| !k.is_empty());
                if api_key.is_none() {
                    tracing::warn!(
                        base_url = %base_url,
                        "Function gateway selected without a public API key"
                    );
                }
                Ok(BackendTarget::Functions { base_url, api_key })
            }
            None => Ok(BackendTarget::Legacy {
                base_url: parse_base_url("backend.legacy_url", &config.legacy_url)?,
            }),
        }
    }

    pub fn scheme(&self) -> PathScheme {
        match self {
            BackendTarget::Functions { .. } => PathScheme::Functions,
            BackendTarget::Legacy { .. } => PathScheme::Legacy,
        }
    }

    pub fn base_url(&self) -> &Url {
        match self {
            BackendTarget::Functions { base_url, .. } | BackendTarget::Legacy { base_url } => {
                base_url
            }
        }
    }

    /// Public API key to send as the `apikey` header.
    pub fn api_key(&self) -> Option<&str> {
        match self {
            BackendTarget::Functions { api_key, .. } => api_key.as_deref(),
            BackendTarget::Legacy { .. } => None,
        }
    }

    /// Full URL for a logical endpoint.
    pub fn url_for(&self, logical: &str) -> String {
        format!(
            "{}{}",
            self.base_url().as_str().trim_end_matches('/'),
            self.scheme().remap(logical)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            BackendTarget::Functions { .. } => "functions",
            BackendTarget::Legacy { .. } => "legacy",
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for BackendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendTarget")
            .field("kind", &self.name())
            .field("base_url", &self.base_url().as_str())
            .field("has_api_key", &self.api_key().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(functions_url: Option<&str>, key: Option<&str>) -> BackendConfig {
        BackendConfig {
            functions_url: functions_url.map(str::to_string),
            functions_key: key.map(str::to_string),
            legacy_url: "http://localhost:3001".to_string(),
        }
    }

    #[test]
    fn test_falls_back_to_legacy() {
        let target = BackendTarget::resolve(&config(None, Some("ignored"))).unwrap();
        assert_eq!(target.name(), "legacy");
        assert_eq!(target.api_key(), None);
        assert_eq!(target.url_for("tours"), "http://localhost:3001/api/tours");
    }

    #[test]
    fn test_prefers_functions() {
        let target = BackendTarget::resolve(&config(
            Some("https://abc.functions.dev/functions/v1"),
            Some("anon"),
        ))
        .unwrap();
        assert_eq!(target.scheme(), PathScheme::Functions);
        assert_eq!(target.api_key(), Some("anon"));
        assert_eq!(
            target.url_for("restaurants"),
            "https://abc.functions.dev/functions/v1/admin-content/restaurants"
        );
    }

    #[test]
    fn test_blank_functions_url_is_ignored() {
        let target = BackendTarget::resolve(&config(Some("  "), None)).unwrap();
        assert_eq!(target.name(), "legacy");
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(BackendTarget::resolve(&config(Some("::nope"), None)).is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let target = BackendTarget::resolve(&config(
            Some("https://abc.functions.dev"),
            Some("secret-key"),
        ))
        .unwrap();
        assert!(!format!("{:?}", target).contains("secret-key"));
    }
}
