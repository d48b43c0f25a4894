use std::sync::Arc;

use async_trait::async_trait;

use wl_types::{Fundamentals, Need, Quote, WlError};

/// Result of one upstream fetch: the quote plus whatever fundamentals the need covered.
pub type Enrichment = (Quote, Fundamentals);

/// Fetches quote and fundamentals data for one symbol, scoped to a need.
///
/// Implementations perform at most one upstream call per invocation, requesting only
/// the modules implied by `need`. An empty symbol yields default values without error.
/// The trait is object-safe and shared as `Arc<dyn QuoteService>` across concurrent
/// workers.
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Stable identifier used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Fetch and decode data for `symbol`.
    async fn get(&self, symbol: &str, need: Need) -> Result<Enrichment, WlError>;
}

#[async_trait]
impl<T: QuoteService + ?Sized> QuoteService for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn get(&self, symbol: &str, need: Need) -> Result<Enrichment, WlError> {
        (**self).get(symbol, need).await
    }
}

/// A layer that wraps a `QuoteService` with additional behavior (caching, ...).
///
/// Wrapped services implement the same contract, so layers compose freely.
pub trait Middleware: Send + Sync {
    /// Consume the layer and wrap `inner`.
    fn apply(self: Box<Self>, inner: Arc<dyn QuoteService>) -> Arc<dyn QuoteService>;

    /// Human-readable layer name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Configuration snapshot for inspection.
    fn config_json(&self) -> serde_json::Value;
}
