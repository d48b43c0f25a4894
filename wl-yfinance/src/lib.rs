//! wl-yfinance
//!
//! `QuoteService` backed by the Yahoo Finance quoteSummary endpoint. One call per
//! `get`, requesting only the modules the need implies, bounded by a fixed timeout. The
//! requested sections are handed back raw; columns are read from them at resolve time.
#![warn(missing_docs)]

/// Adapter definitions and the production HTTP adapter.
pub mod adapter;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use wl_core::payload::decode;
use wl_core::{CacheConfig, Enrichment, Need, QuoteService, WlError};
use wl_middleware::ServiceBuilder;

use adapter::{RealAdapter, YfQuoteSummary};

pub(crate) const PROVIDER: &str = "wl-yfinance";

/// Yahoo Finance quote service.
pub struct YfService {
    adapter: Arc<dyn YfQuoteSummary>,
    timeout: Duration,
}

impl YfService {
    /// Per-call upstream timeout used unless overridden at construction.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Service over the public endpoints.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new_default() -> Result<Self, WlError> {
        Ok(Self::from_adapter(Arc::new(RealAdapter::new_default()?)))
    }

    /// Service over an injected adapter.
    #[must_use]
    pub fn from_adapter(adapter: Arc<dyn YfQuoteSummary>) -> Self {
        Self {
            adapter,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Replace the per-call timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder over the default service, ready for further layers.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn builder() -> Result<ServiceBuilder, WlError> {
        let raw: Arc<dyn QuoteService> = Arc::new(Self::new_default()?);
        Ok(ServiceBuilder::new(raw))
    }

    /// The default service wrapped in a cache.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn cached(cfg: &CacheConfig) -> Result<Arc<dyn QuoteService>, WlError> {
        Ok(Self::builder()?.with_cache(cfg).build())
    }
}

#[async_trait]
impl QuoteService for YfService {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "wl_yfinance::get", skip(self, need), fields(need = %need))
    )]
    async fn get(&self, symbol: &str, need: Need) -> Result<Enrichment, WlError> {
        if symbol.is_empty() {
            return Ok(Enrichment::default());
        }
        let modules = need.upstream_modules();
        let payload = tokio::time::timeout(self.timeout, self.adapter.quote_summary(symbol, &modules))
            .await
            .unwrap_or_else(|_| Err(WlError::provider_timeout(PROVIDER, symbol)));
        let payload = match payload {
            Ok(p) => p,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    symbol,
                    timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "quoteSummary failed"
                );
                return Err(e);
            }
        };
        decode(symbol, need, &payload)
    }
}
