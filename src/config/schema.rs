//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the content
//! client. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the content client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend deployment selection.
    pub backend: BackendConfig,

    /// Response cache settings.
    pub cache: CacheConfig,

    /// HTTP transport settings.
    pub http: HttpConfig,

    /// Prefetch scheduler settings.
    pub prefetch: PrefetchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend deployment configuration.
///
/// When `functions_url` is set every call goes to the function gateway,
/// otherwise to the legacy REST server at `legacy_url`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the serverless function gateway.
    pub functions_url: Option<String>,

    /// Public API key sent as the `apikey` header to the gateway.
    pub functions_key: Option<String>,

    /// Base URL of the legacy REST server.
    pub legacy_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            functions_url: None,
            functions_key: None,
            legacy_url: "http://localhost:3001".to_string(),
        }
    }
}

/// Response cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Default entry lifetime in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300, // 5 minutes
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total request timeout in seconds. `None` leaves it to the transport.
    pub request_timeout_secs: Option<u64>,

    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: None,
            user_agent: concat!("guide-content/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Prefetch scheduler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PrefetchConfig {
    /// Enable speculative prefetching.
    pub enabled: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
