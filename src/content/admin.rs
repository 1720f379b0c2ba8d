//! Authenticated writes for the admin console.

use serde_json::Value;

use crate::cache::TtlCache;
use crate::content::listing::{invalid_id, single_record};
use crate::http::{Envelope, RequestClient, RequestOptions};
use crate::normalize::{CanonicalRecord, RecordId};
use crate::routing::Resource;

/// Write access to content, authorized by a session bearer token.
///
/// A successful write clears every cached response of the resource so the
/// next read sees it.
#[derive(Clone)]
pub struct AdminClient {
    client: RequestClient,
    cache: TtlCache,
    token: String,
}

impl AdminClient {
    pub fn new(client: RequestClient, cache: TtlCache, token: impl Into<String>) -> Self {
        Self {
            client,
            cache,
            token: token.into(),
        }
    }

    /// POST a new record. The stored record is echoed back when the backend
    /// returns it, else the submitted one.
    pub async fn create<T: CanonicalRecord>(&self, record: &T) -> Envelope<T> {
        let body = match serde_json::to_value(record) {
            Ok(body) => body,
            Err(e) => return Envelope::failure(format!("Could not encode record: {}", e)),
        };
        let endpoint = T::RESOURCE.logical_name().to_string();
        self.write(T::RESOURCE, &endpoint, RequestOptions::post(body))
            .await
            .map(|payload| echoed(payload, record))
    }

    /// PUT an existing record; it must carry an id.
    pub async fn update<T: CanonicalRecord>(&self, record: &T) -> Envelope<T> {
        let Some(id) = record.id() else {
            return Envelope::failure(format!("Cannot update {} without an id", T::RESOURCE));
        };
        let body = match serde_json::to_value(record) {
            Ok(body) => body,
            Err(e) => return Envelope::failure(format!("Could not encode record: {}", e)),
        };
        let Some(endpoint) = T::RESOURCE.record_endpoint(&id.to_string()) else {
            return Envelope::failure(invalid_id(T::RESOURCE, id));
        };
        self.write(T::RESOURCE, &endpoint, RequestOptions::put(body))
            .await
            .map(|payload| echoed(payload, record))
    }

    /// DELETE a record by id.
    pub async fn delete(&self, resource: Resource, id: &RecordId) -> Envelope<Value> {
        let Some(endpoint) = resource.record_endpoint(&id.to_string()) else {
            return Envelope::failure(invalid_id(resource, id));
        };
        self.write(resource, &endpoint, RequestOptions::delete()).await
    }

    async fn write(
        &self,
        resource: Resource,
        endpoint: &str,
        options: RequestOptions,
    ) -> Envelope<Value> {
        let method = options.method.clone();
        let envelope = self
            .client
            .request(endpoint, options.with_bearer(self.token.as_str()))
            .await;

        if envelope.success {
            let cleared = self.cache.clear(Some(resource.logical_name()));
            tracing::info!(%method, endpoint, cleared, "Admin write applied");
        } else {
            tracing::warn!(
                %method,
                endpoint,
                error = envelope.error.as_deref().unwrap_or_default(),
                "Admin write rejected"
            );
        }
        envelope
    }
}

fn echoed<T: CanonicalRecord>(payload: Value, submitted: &T) -> T {
    single_record(payload, T::RESOURCE.collection_key())
        .filter(Value::is_object)
        .map(|raw| T::from_raw(&raw))
        .unwrap_or_else(|| submitted.clone())
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("client", &self.client)
            .field("token", &"<redacted>")
            .finish()
    }
}
