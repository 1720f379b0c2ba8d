//! Response cache.
//!
//! # Responsibilities
//! - Hold fetched payloads under deterministic (endpoint, query) keys
//! - Expire entries lazily on read
//! - Run at most one background prefetch per key and let foreground reads
//!   await it
//!
//! # Design Decisions
//! - An explicit, cheaply cloneable handle over `DashMap`s, injected into the
//!   facades and the scheduler rather than held globally
//! - Last writer wins within a key
//! - Clearing a prefix also detaches matching prefetches so a write through
//!   the admin client is never overwritten by an older read

pub mod key;
pub mod ttl;

pub use key::CacheKey;
pub use ttl::{CacheEntry, PrefetchStatus, TtlCache};
