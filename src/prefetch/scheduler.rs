//! Prefetch scheduler.

use serde_json::Value;
use thiserror::Error;

use crate::cache::{PrefetchStatus, TtlCache};
use crate::config::schema::PrefetchConfig;
use crate::http::{Query, RequestClient, RequestError};
use crate::observability::metrics;
use crate::prefetch::routes::{RouteTable, RouteTarget};
use crate::prefetch::scope::PrefetchScope;
use crate::routing::Resource;

/// Why a background fetch produced nothing.
#[derive(Debug, Error)]
pub enum PrefetchError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Prefetch cancelled")]
    Cancelled,
}

/// Warms the cache ahead of navigation.
///
/// Every prefetch it starts is bound to its scope: `cancel`, or dropping
/// the scheduler, abandons the ones still running.
pub struct PrefetchScheduler {
    client: RequestClient,
    cache: TtlCache,
    routes: RouteTable,
    scope: PrefetchScope,
    enabled: bool,
}

impl PrefetchScheduler {
    pub fn new(client: RequestClient, cache: TtlCache, config: &PrefetchConfig) -> Self {
        Self {
            client,
            cache,
            routes: RouteTable::standard(),
            scope: PrefetchScope::new(),
            enabled: config.enabled,
        }
    }

    /// Replace the route table.
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// Warm every listing a route renders. Called on view mount and on
    /// hover over a link to the route; returns immediately.
    pub fn prefetch_route(&self, route: &str) -> Vec<PrefetchStatus> {
        let targets = self.routes.lookup(route);
        if targets.is_empty() {
            tracing::trace!(route, "No prefetch targets for route");
        }
        targets.iter().map(|target| self.prefetch_target(target)).collect()
    }

    /// Warm one listing.
    pub fn prefetch_resource(&self, resource: Resource, query: &Query) -> PrefetchStatus {
        self.prefetch_target(&RouteTarget::new(resource, query.clone()))
    }

    fn prefetch_target(&self, target: &RouteTarget) -> PrefetchStatus {
        if !self.enabled || self.scope.is_cancelled() {
            metrics::record_prefetch("skipped");
            return PrefetchStatus::Skipped;
        }

        let client = self.client.clone();
        let endpoint = target.resource.logical_name();
        let query = target.query.clone();
        let mut token = self.scope.token();

        self.cache.prefetch(target.cache_key(), move || async move {
            tokio::select! {
                result = client.fetch(endpoint, &query) => {
                    result.map_err(PrefetchError::from)
                }
                _ = token.cancelled() => Err::<Value, _>(PrefetchError::Cancelled),
            }
        })
    }

    /// Abandon in-flight prefetches and refuse new ones.
    pub fn cancel(&self) {
        self.scope.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.scope.is_cancelled()
    }

    /// Wait until every running prefetch has finished.
    pub async fn settle(&self) {
        self.cache.drain_in_flight().await;
    }
}

impl std::fmt::Debug for PrefetchScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefetchScheduler")
            .field("enabled", &self.enabled)
            .field("routes", &self.routes.len())
            .field("cancelled", &self.scope.is_cancelled())
            .finish()
    }
}
