use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use wl_core::{
    CacheConfig, Catalog, ColumnSets, Item, Middleware, Module, Need, QuoteService, Registry,
    Services, WlError,
};
use wl_middleware::ServiceBuilder;
use wl_types::WlConfig;

/// Renders watchlists by resolving columns against a quote service.
pub struct Wl {
    pub(crate) service: Arc<dyn QuoteService>,
    pub(crate) registry: Arc<Registry>,
    pub(crate) sets: ColumnSets,
    pub(crate) cfg: WlConfig,
    layers: Vec<serde_json::Value>,
}

/// Builder for constructing a `Wl` renderer with custom configuration.
pub struct WlBuilder {
    service: Option<Arc<dyn QuoteService>>,
    catalog: Option<Catalog>,
    registry: Option<Registry>,
    sets: ColumnSets,
    layers: Vec<Box<dyn Middleware>>,
    cfg: WlConfig,
}

impl Default for WlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WlBuilder {
    /// Create a new builder with defaults.
    ///
    /// Starts with no service; register one via [`with_service`](Self::with_service).
    /// Caching is on (60 s, 256 entries), up to 8 items resolve concurrently and
    /// renders have no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: None,
            catalog: None,
            registry: None,
            sets: ColumnSets::builtin(),
            layers: Vec::new(),
            cfg: WlConfig::default(),
        }
    }

    /// Register the upstream quote service. A later call replaces the earlier one.
    #[must_use]
    pub fn with_service(mut self, service: Arc<dyn QuoteService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Use a custom column catalog with the built-in resolvers.
    ///
    /// Path columns are read from the fetched upstream sections using this catalog, so
    /// new path columns work with any service.
    #[must_use]
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use a fully custom resolver registry. Takes precedence over [`catalog`](Self::catalog).
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace the named column sets.
    #[must_use]
    pub fn column_sets(mut self, sets: ColumnSets) -> Self {
        self.sets = sets;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: WlConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Cache upstream answers. A zero TTL or capacity disables the cache.
    #[must_use]
    pub fn cache(mut self, cfg: CacheConfig) -> Self {
        self.cfg.cache = Some(cfg);
        self
    }

    /// Talk to the service directly.
    #[must_use]
    pub fn no_cache(mut self) -> Self {
        self.cfg.cache = None;
        self
    }

    /// Maximum number of items resolved at once. Must be at least 1.
    #[must_use]
    pub const fn concurrency(mut self, n: usize) -> Self {
        self.cfg.concurrency = n;
        self
    }

    /// Bound each render; exceeding it fails the render with `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Wrap the service in an extra layer, outside the cache.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.push(layer);
        self
    }

    /// Build the `Wl` renderer.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no service was registered or concurrency is zero.
    pub fn build(self) -> Result<Wl, WlError> {
        let Some(raw) = self.service else {
            return Err(WlError::InvalidArg(
                "no quote service registered; add one via with_service(...)".to_string(),
            ));
        };
        if self.cfg.concurrency == 0 {
            return Err(WlError::InvalidArg(
                "concurrency must be at least 1".to_string(),
            ));
        }

        let mut services = match &self.cfg.cache {
            Some(cache) => ServiceBuilder::new(raw).with_cache(cache),
            None => ServiceBuilder::new(raw),
        };
        for layer in self.layers {
            services = services.layer(layer);
        }
        let layers = services.describe();

        let registry = match self.registry {
            Some(r) => r,
            None => Registry::builtin(Arc::new(self.catalog.unwrap_or_else(Catalog::builtin))),
        };

        Ok(Wl {
            service: services.build(),
            registry: Arc::new(registry),
            sets: self.sets,
            cfg: self.cfg,
            layers,
        })
    }
}

impl Wl {
    /// Start building a new `Wl` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use wl_mock::MockService;
    ///
    /// let wl = wl::Wl::builder()
    ///     .with_service(Arc::new(MockService::new()))
    ///     .concurrency(4)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> WlBuilder {
        WlBuilder::new()
    }

    /// The column catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.registry.catalog()
    }

    /// The resolver registry in use.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &WlConfig {
        &self.cfg
    }

    /// The service as wrapped by the configured layers.
    #[must_use]
    pub fn service(&self) -> Arc<dyn QuoteService> {
        Arc::clone(&self.service)
    }

    /// Layer stack around the service, outermost first, ending with the raw service.
    #[must_use]
    pub fn service_layers(&self) -> &[serde_json::Value] {
        &self.layers
    }

    /// Known columns grouped by upstream module.
    #[must_use]
    pub fn list_columns(&self) -> BTreeMap<Module, Vec<String>> {
        self.catalog().list_by_module()
    }

    /// Final column list for `items`; see [`wl_core::compute_columns`].
    #[must_use]
    pub fn compute_columns<S: AsRef<str>>(&self, explicit: &[S], items: &[Item]) -> Vec<String> {
        wl_core::compute_columns(explicit, items)
    }

    /// Upstream need of a column list.
    #[must_use]
    pub fn need_for<S: AsRef<str>>(&self, columns: &[S]) -> Need {
        self.catalog().need_for(columns)
    }

    /// Expand named column sets into one de-duplicated column list.
    ///
    /// # Errors
    /// Returns `UnknownColumnSet` for a name that is not defined.
    pub fn expand_sets<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<String>, WlError> {
        self.sets.expand(names)
    }

    /// Display value of one column for one item, fetched with the column's own need.
    pub async fn resolve(&self, column: &str, item: &Item) -> String {
        let services = Services::new(self.service());
        self.registry.resolve(column, item, &services).await
    }
}

/// Await `fut`, failing with `RequestTimeout` for `what` once `deadline` passes.
pub(crate) async fn with_request_deadline<F, T>(
    deadline: Option<Duration>,
    what: &str,
    fut: F,
) -> Result<T, WlError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut).await.map_err(|_| {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                what,
                timeout_ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX),
                "request deadline exceeded"
            );
            WlError::request_timeout(what)
        }),
        None => Ok(fut.await),
    }
}
