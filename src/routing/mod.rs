//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Logical endpoint ("tours", "tours/42")
//!     → target.rs (which deployment: function gateway or legacy server)
//!     → endpoints.rs (rewrite to that deployment's path scheme)
//!     → Return: absolute request URL
//!
//! Target resolution (at startup):
//!     BackendConfig
//!     → functions_url present? gateway : legacy
//!     → Freeze as immutable BackendTarget
//! ```
//!
//! # Design Decisions
//! - Target decided once, never per request
//! - No regex (first-segment lookup only)
//! - Deterministic: same endpoint always maps to same URL

pub mod endpoints;
pub mod target;

pub use endpoints::{PathScheme, Resource};
pub use target::BackendTarget;
