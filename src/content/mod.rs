//! Domain facades.
//!
//! # Data Flow
//! ```text
//! ContentClient::list::<T>(filter)
//!     → CacheKey(T's endpoint, filter query)
//!     → TtlCache::get_or_fetch (live entry | running prefetch | RequestClient::fetch)
//!     → normalize_payload::<T> → retain_identified
//!     → Envelope<Vec<T>>
//!
//! AdminClient::{create, update, delete}
//!     → RequestClient::request with bearer token
//!     → on success, TtlCache::clear(resource prefix)
//! ```
//!
//! # Design Decisions
//! - One typed method per content type over a single generic `list`
//! - Facades return envelopes, never `Err`, like the request client

pub mod admin;
pub mod listing;

pub use admin::AdminClient;
pub use listing::{ContentClient, ListFilter};
