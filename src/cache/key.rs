//! Cache keys.

use std::fmt;

use crate::http::request::Query;

/// Deterministic key for a (logical endpoint, query) pair.
///
/// Two queries with the same parameters collide regardless of insertion
/// order; any differing parameter yields a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    endpoint: String,
    params: String,
}

impl CacheKey {
    pub fn new(endpoint: impl Into<String>, query: &Query) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: query.canonical(),
        }
    }

    /// Key for an endpoint without filters.
    pub fn endpoint_only(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, &Query::new())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn params(&self) -> &str {
        &self.params
    }

    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.endpoint.starts_with(prefix)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            f.write_str(&self.endpoint)
        } else {
            write!(f, "{}?{}", self.endpoint, self.params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_filters_collide() {
        let a = CacheKey::new("tours", &Query::new().flag("active", true).flag("featured", true));
        let b = CacheKey::new("tours", &Query::new().flag("featured", true).flag("active", true));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "tours?active=true&featured=true");
    }

    #[test]
    fn test_different_filters_never_collide() {
        let base = CacheKey::new("tours", &Query::new().flag("active", true));
        let keys = [
            CacheKey::endpoint_only("tours"),
            CacheKey::new("tours", &Query::new().flag("active", false)),
            CacheKey::new("tours", &Query::new().flag("featured", true)),
            CacheKey::new("restaurants", &Query::new().flag("active", true)),
        ];
        for key in keys {
            assert_ne!(base, key);
        }
    }

    #[test]
    fn test_prefix_matching() {
        let key = CacheKey::endpoint_only("tours/42");
        assert!(key.matches_prefix("tours"));
        assert!(!key.matches_prefix("restaurants"));
        assert_eq!(key.to_string(), "tours/42");
    }
}
