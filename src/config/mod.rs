//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (GUIDE_* environment overlay)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → consumed once when building the request client and cache
//! ```
//!
//! # Design Decisions
//! - Config is read once at start; there is no runtime reconfiguration
//! - All fields have defaults to allow an empty environment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BackendConfig;
pub use schema::CacheConfig;
pub use schema::ClientConfig;
pub use schema::HttpConfig;
pub use schema::ObservabilityConfig;
pub use schema::PrefetchConfig;
pub use validation::ValidationError;
