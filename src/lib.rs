//! Content delivery client for the travel guide.
//!
//! Picks one of two interchangeable backend deployments, calls it through a
//! request client that never fails past its boundary, coerces payloads into
//! canonical records, and caches and prefetches them.
//!
//! # Architecture Overview
//!
//! ```text
//!   ContentClient / AdminClient            PrefetchScheduler
//!   (content)                              (prefetch: routes, scope)
//!        │                                        │
//!        ├──────────────► TtlCache ◄──────────────┤
//!        │                (cache)                 │
//!        ▼                                        ▼
//!   RequestClient (http) ─── BackendTarget + PathScheme (routing)
//!        │
//!        ▼
//!   Envelope / Container ──► canonical records (normalize)
//!
//!   config: TOML + GUIDE_* env → ClientConfig, read once
//!   observability: tracing + metrics facade
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod normalize;
pub mod routing;

// Caching and facades
pub mod cache;
pub mod content;
pub mod prefetch;

// Cross-cutting concerns
pub mod observability;

pub use cache::{CacheKey, TtlCache};
pub use config::{load_config, ClientConfig, ConfigError};
pub use content::{AdminClient, ContentClient, ListFilter};
pub use http::{Envelope, Query, RequestClient, RequestError, RequestOptions};
pub use normalize::{CanonicalRecord, RecordId};
pub use prefetch::PrefetchScheduler;
pub use routing::{BackendTarget, Resource};
