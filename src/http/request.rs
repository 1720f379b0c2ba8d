//! Request description.
//!
//! # Responsibilities
//! - Query filters with a canonical, order-insensitive serialization
//! - Per-call options: method, query, JSON body, bearer token
//!
//! # Design Decisions
//! - Query parameters live in a BTreeMap so insertion order never matters
//! - Canonical form is form-urlencoded, so values containing `&` or `=`
//!   cannot collide with other parameter sets

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Method;
use serde_json::Value;

/// Query filters sent with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a boolean filter such as `active=true`.
    pub fn flag(self, key: impl Into<String>, value: bool) -> Self {
        self.param(key, if value { "true" } else { "false" })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sorted, urlencoded form: `active=true&featured=false`.
    pub fn canonical(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Options for a single request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Query,
    pub body: Option<Value>,
    /// Bearer token for admin calls.
    pub bearer: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            query: Query::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::get()
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::get()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::get()
        }
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_is_order_insensitive() {
        let a = Query::new().flag("active", true).flag("featured", false);
        let b = Query::new().flag("featured", false).flag("active", true);
        assert_eq!(a, b);
        assert_eq!(a.canonical(), "active=true&featured=false");
    }

    #[test]
    fn test_canonical_escapes_separators() {
        let tricky = Query::new().param("type", "bus&active=true");
        let plain = Query::new().param("type", "bus").flag("active", true);
        assert_ne!(tricky.canonical(), plain.canonical());
    }

    #[test]
    fn test_last_param_wins() {
        let q = Query::new().flag("active", true).flag("active", false);
        assert_eq!(q.get("active"), Some("false"));
        assert_eq!(q.pairs().count(), 1);
    }

    #[test]
    fn test_options_builders() {
        let opts = RequestOptions::post(serde_json::json!({"name": "x"}))
            .with_query(Query::new().flag("active", true))
            .with_bearer("token");
        assert_eq!(opts.method, Method::POST);
        assert_eq!(opts.bearer.as_deref(), Some("token"));
        assert!(!opts.query.is_empty());
        assert_eq!(RequestOptions::default().method, Method::GET);
    }
}
