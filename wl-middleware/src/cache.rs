use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;
use tokio::time::Instant;
use wl_core::{CacheConfig, Enrichment, Middleware, Need, QuoteService, WlError};

/// Cache partition: the same symbol under different needs never shares an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    symbol: String,
    need: Need,
}

struct Entry {
    value: Enrichment,
    inserted: Instant,
}

/// Size-bounded LRU map whose entries expire `ttl` after insertion.
struct LruTtlStore {
    inner: Mutex<LruCache<CacheKey, Entry>>,
    ttl: Duration,
}

impl LruTtlStore {
    fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Live entry for `key`, promoted to most-recently-used. Expired entries are dropped.
    async fn get(&self, key: &CacheKey) -> Option<Enrichment> {
        let mut guard = self.inner.lock().await;
        let expired = guard.peek(key)?.inserted.elapsed() > self.ttl;
        if expired {
            guard.pop(key);
            #[cfg(feature = "tracing")]
            tracing::trace!(symbol = %key.symbol, need = %key.need, "cache entry expired");
            return None;
        }
        guard.get(key).map(|e| e.value.clone())
    }

    /// Insert as most-recently-used, evicting the least-recently-used entry when full.
    async fn put(&self, key: CacheKey, value: Enrichment) {
        let entry = Entry {
            value,
            inserted: Instant::now(),
        };
        let mut guard = self.inner.lock().await;
        #[cfg(feature = "tracing")]
        if !guard.contains(&key)
            && guard.len() == guard.cap().get()
            && let Some((victim, _)) = guard.peek_lru()
        {
            tracing::debug!(symbol = %victim.symbol, need = %victim.need, "cache entry evicted");
        }
        guard.put(key, entry);
    }

    async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

/// Memoizing wrapper around a [`QuoteService`], keyed by `(symbol, need)`.
///
/// Entries live for the configured TTL and at most `max_entries` are retained, least
/// recently used first out. Failed fetches are never cached. The lock is held only
/// around map access, never across the wrapped call, so concurrent misses for one key
/// may both fetch; the later insert wins.
pub struct CachingService {
    inner: Arc<dyn QuoteService>,
    store: Option<LruTtlStore>,
}

impl CachingService {
    /// Wrap `inner`. A zero TTL or zero capacity disables caching.
    #[must_use]
    pub fn new(inner: Arc<dyn QuoteService>, cfg: &CacheConfig) -> Self {
        let store = NonZeroUsize::new(cfg.max_entries)
            .filter(|_| cfg.is_enabled())
            .map(|cap| LruTtlStore::new(cap, cfg.ttl));
        Self { inner, store }
    }

    /// Number of entries currently held, expired ones included until next touched.
    pub async fn len(&self) -> usize {
        match &self.store {
            Some(store) => store.len().await,
            None => 0,
        }
    }

    /// Whether the cache holds no entry.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl QuoteService for CachingService {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn get(&self, symbol: &str, need: Need) -> Result<Enrichment, WlError> {
        if symbol.is_empty() {
            return Ok(Enrichment::default());
        }
        let Some(store) = &self.store else {
            return self.inner.get(symbol, need).await;
        };

        let key = CacheKey {
            symbol: symbol.to_string(),
            need,
        };
        if let Some(hit) = store.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::trace!(symbol, need = %need, "cache hit");
            return Ok(hit);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(symbol, need = %need, "cache miss");
        let value = self.inner.get(symbol, need).await?;
        store.put(key, value.clone()).await;
        Ok(value)
    }
}

/// Layer that wraps a service in a [`CachingService`].
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Layer with the given cache configuration.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn QuoteService>) -> Arc<dyn QuoteService> {
        let Self { cfg } = *self;
        Arc::new(CachingService::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        CACHE_LAYER
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ttl_ms": u64::try_from(self.cfg.ttl.as_millis()).unwrap_or(u64::MAX),
            "max_entries": self.cfg.max_entries,
        })
    }
}

pub(crate) const CACHE_LAYER: &str = "CachingMiddleware";
