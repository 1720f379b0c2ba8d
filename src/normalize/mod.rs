//! Normalization subsystem.
//!
//! # Data Flow
//! ```text
//! Unwrapped payload (serde_json::Value)
//!     → http::Container::unwrap (bare array / items / <collection> / data)
//!     → records.rs <Record>::from_raw, once per element
//!     → Vec<Record> with every field defaulted
//! ```
//!
//! # Design Decisions
//! - Total: any JSON value produces a record, never an error
//! - Idempotent: normalizing a serialized canonical record is a no-op
//! - Identifiers are never invented; a missing id stays `None`
//! - Pure and synchronous, no I/O

pub mod fields;
pub mod records;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::http::envelope::Container;
use crate::routing::Resource;

pub use fields::RecordId;
pub use records::{
    CulturalEvent, LocalExperience, PhotoChallenge, Restaurant, SupportLocal, Tour, Transportation,
};

/// A canonical record type bound to the resource it is served from.
pub trait CanonicalRecord:
    Sized + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const RESOURCE: Resource;

    /// Map a raw record to canonical form. Must not panic on any input.
    fn from_raw(raw: &Value) -> Self;

    fn id(&self) -> Option<&RecordId>;
}

/// Normalize every element of an unwrapped container.
pub fn normalize_container<T: CanonicalRecord>(container: &Container) -> Vec<T> {
    container.records.iter().map(T::from_raw).collect()
}

/// Unwrap and normalize a list payload in one step.
pub fn normalize_payload<T: CanonicalRecord>(payload: Value) -> Vec<T> {
    let container = Container::unwrap(payload, T::RESOURCE.collection_key());
    normalize_container(&container)
}

/// Drop records without an identifier; they cannot be keyed downstream.
pub fn retain_identified<T: CanonicalRecord>(records: Vec<T>) -> Vec<T> {
    let total = records.len();
    let kept: Vec<T> = records.into_iter().filter(|r| r.id().is_some()).collect();
    if kept.len() < total {
        tracing::warn!(
            resource = %T::RESOURCE,
            dropped = total - kept.len(),
            "Dropped records without an id"
        );
    }
    kept
}
