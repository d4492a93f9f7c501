//! In-process fetch cache honouring per-request revalidate periods.

use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache;
use serde_json::Value;

/// Default maximum number of cached responses.
pub(crate) const DEFAULT_CAPACITY: u64 = 10_000;

/// Cached upstream body together with the revalidate period it was stored with.
#[derive(Debug, Clone)]
struct CachedResponse {
    body: Value,
    ttl: Duration,
}

/// Expires each entry after its own revalidate period.
struct PerEntryTtl;

impl Expiry<String, CachedResponse> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedResponse,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Response cache keyed by the full upstream URL.
#[derive(Debug, Clone)]
pub(crate) struct FetchCache {
    inner: Cache<String, CachedResponse>,
}

impl FetchCache {
    /// Creates a cache holding at most `capacity` responses.
    pub(crate) fn new(capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { inner }
    }

    /// Returns a fresh cached body for `key`.
    pub(crate) async fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key).await.map(|cached| cached.body)
    }

    /// Stores `body` under `key` for `ttl`.
    pub(crate) async fn insert(&self, key: String, body: Value, ttl: Duration) {
        self.inner.insert(key, CachedResponse { body, ttl }).await;
    }
}
