//! Configuration types shared by the facade and the middleware layers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Time- and size-bounded memoization of upstream fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long an entry stays valid after insertion.
    pub ttl: Duration,
    /// Maximum number of `(symbol, need)` entries retained.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_entries: 256,
        }
    }
}

impl CacheConfig {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(ttl: Duration, max_entries: usize) -> Self {
        Self { ttl, max_entries }
    }

    /// Zero TTL or zero capacity means nothing would ever be served from cache.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.ttl.is_zero() && self.max_entries > 0
    }
}

/// Global configuration for the `Wl` facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WlConfig {
    /// Maximum number of items resolved concurrently per watchlist.
    pub concurrency: usize,
    /// Optional deadline for rendering one watchlist.
    pub request_timeout: Option<Duration>,
    /// Cache wrapped around the service; `None` talks to it directly.
    pub cache: Option<CacheConfig>,
}

impl Default for WlConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            request_timeout: None,
            cache: Some(CacheConfig::default()),
        }
    }
}
