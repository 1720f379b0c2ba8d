//! Cached, normalized read access to content listings.

use serde_json::Value;

use crate::cache::{CacheKey, TtlCache};
use crate::http::{Envelope, Query, RequestClient, RequestError};
use crate::normalize::{
    normalize_payload, retain_identified, CanonicalRecord, CulturalEvent, LocalExperience,
    PhotoChallenge, RecordId, Restaurant, SupportLocal, Tour, Transportation,
};
use crate::routing::Resource;

/// Filters accepted by every listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub active: Option<bool>,
    pub featured: Option<bool>,
    /// `type` discriminator, honoured by `transportation`.
    pub kind: Option<String>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active() -> Self {
        Self {
            active: Some(true),
            ..Self::default()
        }
    }

    pub fn featured() -> Self {
        Self {
            featured: Some(true),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Query parameters; unset filters are omitted.
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        if let Some(active) = self.active {
            query = query.flag("active", active);
        }
        if let Some(featured) = self.featured {
            query = query.flag("featured", featured);
        }
        if let Some(kind) = &self.kind {
            query = query.param("type", kind.clone());
        }
        query
    }
}

/// Typed entry point for the public site.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: RequestClient,
    cache: TtlCache,
}

impl ContentClient {
    pub fn new(client: RequestClient, cache: TtlCache) -> Self {
        Self { client, cache }
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// Listing for `T`'s resource. Served from the cache when live, joined
    /// to a running prefetch when one exists, fetched otherwise. Records
    /// without an id are dropped.
    pub async fn list<T: CanonicalRecord>(&self, filter: &ListFilter) -> Envelope<Vec<T>> {
        let endpoint = T::RESOURCE.logical_name();
        let query = filter.to_query();
        let key = CacheKey::new(endpoint, &query);

        self.cache
            .get_or_fetch(key, || self.client.fetch(endpoint, &query))
            .await
            .map(|payload| retain_identified(normalize_payload::<T>(payload)))
            .into()
    }

    /// A single record at `<endpoint>/<id>`.
    pub async fn find<T: CanonicalRecord>(&self, id: &RecordId) -> Envelope<T> {
        let resource = T::RESOURCE;
        let Some(endpoint) = resource.record_endpoint(&id.to_string()) else {
            return Envelope::failure(invalid_id(resource, id));
        };
        let key = CacheKey::endpoint_only(endpoint.as_str());
        let query = Query::new();

        let result = self
            .cache
            .get_or_fetch(key, || self.client.fetch(&endpoint, &query))
            .await
            .and_then(|payload| {
                single_record(payload, resource.collection_key())
                    .map(|raw| T::from_raw(&raw))
                    .ok_or_else(|| RequestError::Rejected(format!("{} {} not found", resource, id)))
            });
        result.into()
    }

    /// Drop every cached response of a resource, detail pages included.
    pub fn invalidate(&self, resource: Resource) -> usize {
        self.cache.clear(Some(resource.logical_name()))
    }

    pub async fn tours(&self, filter: &ListFilter) -> Envelope<Vec<Tour>> {
        self.list(filter).await
    }

    pub async fn cultural_events(&self, filter: &ListFilter) -> Envelope<Vec<CulturalEvent>> {
        self.list(filter).await
    }

    pub async fn local_experiences(&self, filter: &ListFilter) -> Envelope<Vec<LocalExperience>> {
        self.list(filter).await
    }

    pub async fn restaurants(&self, filter: &ListFilter) -> Envelope<Vec<Restaurant>> {
        self.list(filter).await
    }

    pub async fn transportation(&self, filter: &ListFilter) -> Envelope<Vec<Transportation>> {
        self.list(filter).await
    }

    pub async fn support_locals(&self, filter: &ListFilter) -> Envelope<Vec<SupportLocal>> {
        self.list(filter).await
    }

    pub async fn photo_challenges(&self, filter: &ListFilter) -> Envelope<Vec<PhotoChallenge>> {
        self.list(filter).await
    }
}

pub(crate) fn invalid_id(resource: Resource, id: &RecordId) -> String {
    format!("Invalid {} id '{}'", resource, id)
}

/// The record in a single-record payload.
///
/// Accepts the record itself, `{ data: {..} }`, or any list container
/// (first element wins). `null` and empty lists mean not found.
pub(crate) fn single_record(payload: Value, collection_key: &str) -> Option<Value> {
    match payload {
        Value::Array(records) => records.into_iter().next(),
        Value::Object(mut obj) => {
            for key in ["data", "item", "items", collection_key] {
                match obj.get(key) {
                    Some(Value::Object(_)) => return obj.remove(key),
                    Some(Value::Array(_)) => {
                        return match obj.remove(key) {
                            Some(Value::Array(records)) => records.into_iter().next(),
                            _ => None,
                        };
                    }
                    _ => {}
                }
            }
            Some(Value::Object(obj))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_to_query() {
        assert!(ListFilter::new().to_query().is_empty());

        let query = ListFilter::active().with_kind("bus").to_query();
        assert_eq!(query.get("active"), Some("true"));
        assert_eq!(query.get("type"), Some("bus"));
        assert_eq!(query.get("featured"), None);

        assert_eq!(
            ListFilter::featured().to_query(),
            Query::new().flag("featured", true)
        );
    }

    #[test]
    fn test_single_record_shapes() {
        let record = json!({"id": 1, "name": "A"});
        assert_eq!(single_record(record.clone(), "tours"), Some(record.clone()));
        assert_eq!(single_record(json!({"data": record.clone()}), "tours"), Some(record.clone()));
        assert_eq!(single_record(json!({"tours": [record.clone()]}), "tours"), Some(record.clone()));
        assert_eq!(single_record(json!([record.clone()]), "tours"), Some(record));
        assert_eq!(single_record(json!([]), "tours"), None);
        assert_eq!(single_record(Value::Null, "tours"), None);
    }
}
