//! HTTP layer: request client and response envelopes.
//!
//! # Data Flow
//! ```text
//! request(endpoint, options)
//!     → routing (target + path remap)
//!     → client.rs (headers, reqwest call, body as text)
//!     → envelope.rs (content type, JSON parse, status, envelope unwrap)
//!     → Envelope { success, data | error }
//! ```

pub mod client;
pub mod envelope;
pub mod request;

pub use client::{BuildError, RequestClient};
pub use envelope::{Container, ContainerShape, Envelope, RequestError};
pub use request::{Query, RequestOptions};
