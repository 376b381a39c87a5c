use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// A response body together with the time it was stored.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub body: String,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl CachedResponse {
    pub fn new(body: String, ttl: Duration) -> Self {
        Self {
            body,
            cached_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= self.ttl
    }
}

/// LRU cache of response bodies keyed by URL, with a TTL per entry.
///
/// Owned by a single source instance; nothing here is process-global.
#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<LruCache<String, CachedResponse>>,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Stores a body. A zero TTL means the response must not be reused, so
    /// nothing is stored.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn put(&self, url: String, body: String, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        debug!("Caching response: size={}, ttl={:?}", body.len(), ttl);
        self.entries
            .write()
            .await
            .put(url, CachedResponse::new(body, ttl));
    }

    /// Returns the body if present and still fresh. Expired entries are evicted.
    #[instrument(skip(self))]
    pub async fn get(&self, url: &str) -> Option<String> {
        let mut entries = self.entries.write().await;
        let entry = entries.get(url)?;
        if !entry.is_expired() {
            debug!("Cache hit: age={:?}", entry.cached_at.elapsed());
            return Some(entry.body.clone());
        }
        debug!("Evicting expired entry: age={:?}", entry.cached_at.elapsed());
        entries.pop(url);
        None
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
