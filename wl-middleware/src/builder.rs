//! Builder for composing a quote service with middleware layers.
//!
//! Layers form an onion around the raw service. The `layers` vector is kept
//! outermost-first (last added = outermost) and applied in reverse by `build()`:
//!
//! ```text
//! builder.with_cache(..).layer(custom)
//!
//! Storage: [Custom, Cache]
//! Applied: Raw -> Cache -> Custom
//! Result:  Custom(Cache(Raw))
//! ```

use std::sync::Arc;

use serde_json::json;
use wl_core::{CacheConfig, Middleware, QuoteService};

use crate::cache::{CACHE_LAYER, CacheMiddleware};

/// Composes a raw service with layered wrappers.
pub struct ServiceBuilder {
    raw: Arc<dyn QuoteService>,
    /// Outermost first.
    layers: Vec<Box<dyn Middleware>>,
}

impl ServiceBuilder {
    /// Start from a raw, unwrapped service.
    #[must_use]
    pub fn new(raw: Arc<dyn QuoteService>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the cache layer.
    ///
    /// The cache sits innermost so every other layer observes cached answers. A
    /// disabled configuration (zero TTL or capacity) removes the layer instead.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        if cfg.is_enabled() {
            self.layers.push(Box::new(CacheMiddleware::new(cfg.clone())));
        }
        self
    }

    /// Remove the cache layer if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self
    }

    /// Add an arbitrary layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Layer names and configuration, outermost first, ending with the raw service.
    #[must_use]
    pub fn describe(&self) -> Vec<serde_json::Value> {
        self.layers
            .iter()
            .map(|l| json!({ "name": l.name(), "config": l.config_json() }))
            .chain(std::iter::once(
                json!({ "name": "RawService", "config": { "name": self.raw.name() } }),
            ))
            .collect()
    }

    /// Apply the layers innermost first and return the outermost service.
    #[must_use]
    pub fn build(self) -> Arc<dyn QuoteService> {
        let mut acc = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            #[cfg(feature = "tracing")]
            tracing::debug!(layer = m.name(), "applying middleware layer");
            acc = m.apply(acc);
        }
        acc
    }
}
