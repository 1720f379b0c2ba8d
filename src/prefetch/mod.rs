//! Prefetch subsystem.
//!
//! # Data Flow
//! ```text
//! view mount / link hover (route)
//!     → routes.rs (route → listings with filters)
//!     → scheduler.rs (skip when disabled or cancelled)
//!     → TtlCache::prefetch (skip when live or already running)
//!     → spawned fetch, raced against scope.rs cancellation
//!     → payload stored under the listing's cache key
//! ```
//!
//! # Design Decisions
//! - Fire and forget: callers get a status back, never a future or an error
//! - The cached value is the unwrapped payload; the listing facade
//!   normalizes on read, so one entry serves any record type view
//! - Cancellation drops the request; nothing is stored for it

pub mod routes;
pub mod scheduler;
pub mod scope;

pub use routes::{RouteTable, RouteTarget};
pub use scheduler::{PrefetchError, PrefetchScheduler};
pub use scope::{PrefetchScope, ScopeToken};
