//! In-memory TTL cache with a deduplicated background prefetch.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{join_all, BoxFuture, Shared};
use futures_util::FutureExt;
use serde_json::Value;
use tokio::runtime::Handle;

use crate::cache::key::CacheKey;
use crate::config::schema::CacheConfig;
use crate::observability::metrics;

/// Shortest lifetime an entry can get; keeps `expires_at > stored_at`.
const MIN_TTL: Duration = Duration::from_millis(1);

/// Longest lifetime an entry can get.
const MAX_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// A stored value and its validity window.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub stored_at: Instant,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant) -> bool {
        now <= self.expires_at
    }
}

/// What `prefetch` did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefetchStatus {
    /// A live entry exists; nothing was fetched.
    Fresh,
    /// A prefetch for the key is already running.
    InFlight,
    /// A background fetch was spawned.
    Started,
    /// No tokio runtime to run the fetch on.
    Skipped,
}

type SharedFetch<V> = Shared<BoxFuture<'static, Option<V>>>;

struct InFlight<V> {
    id: u64,
    result: SharedFetch<V>,
}

/// Thread-safe TTL cache handle. Clones share the same storage.
pub struct TtlCache<V = Value> {
    entries: Arc<DashMap<CacheKey, CacheEntry<V>>>,
    in_flight: Arc<DashMap<CacheKey, InFlight<V>>>,
    next_fetch_id: Arc<AtomicU64>,
    default_ttl: Duration,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            in_flight: Arc::clone(&self.in_flight),
            next_fetch_id: Arc::clone(&self.next_fetch_id),
            default_ttl: self.default_ttl,
        }
    }
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.entries.len())
            .field("in_flight", &self.in_flight.len())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty cache with the given default entry lifetime.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            in_flight: Arc::new(DashMap::new()),
            next_fetch_id: Arc::new(AtomicU64::new(0)),
            default_ttl: default_ttl.clamp(MIN_TTL, MAX_TTL),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_secs(config.ttl_secs))
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Value for `key` while it is live. An expired entry is removed.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let now = Instant::now();
        let lookup = self
            .entries
            .get(key)
            .map(|entry| entry.is_live(now).then(|| entry.data.clone()));

        match lookup {
            Some(Some(data)) => {
                metrics::record_cache_lookup(true);
                Some(data)
            }
            Some(None) => {
                self.entries.remove_if(key, |_, entry| !entry.is_live(now));
                tracing::trace!(%key, "Evicted expired entry");
                metrics::record_cache_lookup(false);
                metrics::record_cache_size(self.entries.len());
                None
            }
            None => {
                metrics::record_cache_lookup(false);
                None
            }
        }
    }

    /// Store `data` under `key`, replacing any previous entry.
    pub fn set(&self, key: CacheKey, data: V, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl).clamp(MIN_TTL, MAX_TTL);
        let stored_at = Instant::now();
        self.entries.insert(
            key,
            CacheEntry {
                data,
                stored_at,
                expires_at: stored_at + ttl,
            },
        );
        metrics::record_cache_size(self.entries.len());
    }

    /// Drop every entry, or only those whose endpoint starts with `prefix`.
    ///
    /// Matching prefetches still running are detached: their results are
    /// handed to current waiters but never stored. Returns the number of
    /// entries removed.
    pub fn clear(&self, prefix: Option<&str>) -> usize {
        let before = self.entries.len();
        match prefix {
            None => {
                self.entries.clear();
                self.in_flight.clear();
            }
            Some(prefix) => {
                self.entries.retain(|key, _| !key.matches_prefix(prefix));
                self.in_flight.retain(|key, _| !key.matches_prefix(prefix));
            }
        }
        let removed = before.saturating_sub(self.entries.len());
        tracing::debug!(prefix = prefix.unwrap_or("*"), removed, "Cache cleared");
        metrics::record_cache_size(self.entries.len());
        removed
    }

    /// Whether a live entry exists, without touching metrics or evicting.
    pub fn contains_live(&self, key: &CacheKey) -> bool {
        let now = Instant::now();
        self.entries
            .get(key)
            .map(|entry| entry.is_live(now))
            .unwrap_or(false)
    }

    /// Number of stored entries, expired ones included until read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Populate `key` in the background unless a live entry exists.
    ///
    /// Never blocks and never fails: fetch errors are logged and dropped.
    /// One fetch runs per key at a time.
    pub fn prefetch<F, Fut, E>(&self, key: CacheKey, fetcher: F) -> PrefetchStatus
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        if self.contains_live(&key) {
            metrics::record_prefetch("fresh");
            return PrefetchStatus::Fresh;
        }

        let Ok(handle) = Handle::try_current() else {
            tracing::warn!(%key, "No async runtime, prefetch skipped");
            metrics::record_prefetch("skipped");
            return PrefetchStatus::Skipped;
        };

        let result = match self.in_flight.entry(key.clone()) {
            Entry::Occupied(_) => {
                metrics::record_prefetch("in_flight");
                return PrefetchStatus::InFlight;
            }
            Entry::Vacant(slot) => {
                let id = self.next_fetch_id.fetch_add(1, Ordering::Relaxed);
                let result = self.background_fetch(key.clone(), id, fetcher());
                slot.insert(InFlight {
                    id,
                    result: result.clone(),
                });
                result
            }
        };

        tracing::debug!(%key, "Prefetch started");
        metrics::record_prefetch("started");
        handle.spawn(result);
        PrefetchStatus::Started
    }

    fn background_fetch<Fut, E>(&self, key: CacheKey, id: u64, fetch: Fut) -> SharedFetch<V>
    where
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let cache = self.clone();
        async move {
            let outcome = fetch.await;
            let registered = cache
                .in_flight
                .remove_if(&key, |_, pending| pending.id == id)
                .is_some();

            match outcome {
                Ok(data) => {
                    if registered {
                        cache.set(key.clone(), data.clone(), None);
                        tracing::debug!(%key, "Prefetch stored");
                        metrics::record_prefetch("stored");
                    } else {
                        tracing::debug!(%key, "Prefetch detached by clear, result not stored");
                    }
                    Some(data)
                }
                Err(e) => {
                    tracing::debug!(%key, error = %e, "Prefetch failed");
                    metrics::record_prefetch("failed");
                    None
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Live value for `key`, else the result of a running prefetch, else
    /// the result of `fetcher`, which is then stored.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: CacheKey, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(data) = self.get(&key) {
            return Ok(data);
        }

        let pending = self
            .in_flight
            .get(&key)
            .map(|pending| pending.result.clone());
        if let Some(pending) = pending {
            tracing::trace!(%key, "Awaiting in-flight prefetch");
            if let Some(data) = pending.await {
                return Ok(data);
            }
        }

        let data = fetcher().await?;
        self.set(key, data.clone(), None);
        Ok(data)
    }

    /// Wait for every prefetch currently running.
    pub async fn drain_in_flight(&self) {
        let pending: Vec<SharedFetch<V>> = self
            .in_flight
            .iter()
            .map(|entry| entry.value().result.clone())
            .collect();
        join_all(pending).await;
    }
}
