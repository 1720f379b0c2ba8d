//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields: endpoint, key, request_id)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr) in the binary
//!     → whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Request ID (UUID v4) is attached to every request span
//! - Metrics are cheap no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
