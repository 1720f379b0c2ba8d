//! Metrics collection.
//!
//! # Metrics
//! - `guide_requests_total` (counter): requests by endpoint (first path
//!   segment), outcome
//! - `guide_request_duration_seconds` (histogram): latency by endpoint
//! - `guide_cache_lookups_total` (counter): hits and misses
//! - `guide_cache_entries` (gauge): current entry count
//! - `guide_prefetch_total` (counter): prefetch outcomes
//!
//! # Design Decisions
//! - Only records through the `metrics` facade; the embedding application
//!   installs the recorder/exporter
//! - Labels are low-cardinality (logical endpoint, fixed outcome names)

use std::time::Duration;

/// Metric label for a logical endpoint: its first path segment, so
/// `tours/42` and `tours` share one series.
pub fn endpoint_label(endpoint: &str) -> &str {
    endpoint
        .trim_start_matches('/')
        .split(['/', '?'])
        .next()
        .unwrap_or_default()
}

/// Record the outcome of a backend request.
pub fn record_request(endpoint: &str, outcome: &'static str, elapsed: Duration) {
    let label = endpoint_label(endpoint).to_string();
    metrics::counter!(
        "guide_requests_total",
        "endpoint" => label.clone(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "guide_request_duration_seconds",
        "endpoint" => label
    )
    .record(elapsed.as_secs_f64());
}

/// Record a cache read.
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    metrics::counter!("guide_cache_lookups_total", "result" => result).increment(1);
}

/// Record the current number of cache entries.
pub fn record_cache_size(size: usize) {
    metrics::gauge!("guide_cache_entries").set(size as f64);
}

/// Record a prefetch outcome (started, fresh, in_flight, stored, failed, skipped).
pub fn record_prefetch(outcome: &'static str) {
    metrics::counter!("guide_prefetch_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_label_drops_record_ids() {
        assert_eq!(endpoint_label("tours"), "tours");
        assert_eq!(endpoint_label("tours/42"), "tours");
        assert_eq!(endpoint_label("/restaurants/a%2Fb/menu"), "restaurants");
        assert_eq!(endpoint_label("health?verbose=1"), "health");
        assert_eq!(endpoint_label(""), "");
    }
}
