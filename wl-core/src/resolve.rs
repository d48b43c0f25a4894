use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use wl_types::{Fundamentals, Item, Need, WlError};

use crate::catalog::{Catalog, ColumnDef, Extract};
use crate::format::{format_decimal1, host_only};
use crate::path;
use crate::payload::column_value;
use crate::service::{Enrichment, QuoteService};

/// Separator between the parts of the `hq` column.
pub const HQ_SEPARATOR: &str = " · ";

/// Handles resolvers use to reach upstream data.
#[derive(Clone)]
pub struct Services {
    /// Quote service, usually cache-wrapped.
    pub quotes: Arc<dyn QuoteService>,
    /// Need shared by every column of the current row.
    ///
    /// Resolvers fetch with the union of this and their own minimal need. Leaving it
    /// empty makes each column fetch exactly what it reads; setting it to the need of
    /// the whole column list lets all columns of a row share one cache entry.
    pub need: Need,
}

impl Services {
    /// Services fetching per column with minimal needs.
    pub fn new(quotes: Arc<dyn QuoteService>) -> Self {
        Self {
            quotes,
            need: Need::empty(),
        }
    }

    /// Set the row-level need.
    #[must_use]
    pub const fn with_need(mut self, need: Need) -> Self {
        self.need = need;
        self
    }

    /// Fetch `symbol` covering `need` plus the row-level need.
    pub async fn fetch(&self, symbol: &str, need: Need) -> Result<Enrichment, WlError> {
        self.quotes.get(symbol, need | self.need).await
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("quotes", &self.quotes.name())
            .field("need", &self.need)
            .finish()
    }
}

/// Produces the display string of one column for one item.
///
/// Errors are absorbed by [`Registry::resolve`] into an empty cell.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Compute the display value.
    async fn resolve(&self, item: &Item, services: &Services) -> Result<String, WlError>;
}

/// The raw item symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct Symbol;

#[async_trait]
impl Resolver for Symbol {
    async fn resolve(&self, item: &Item, _services: &Services) -> Result<String, WlError> {
        Ok(item.symbol.clone())
    }
}

/// Item-provided display name, else the fetched quote name.
#[derive(Debug, Clone, Copy, Default)]
pub struct Name;

#[async_trait]
impl Resolver for Name {
    async fn resolve(&self, item: &Item, services: &Services) -> Result<String, WlError> {
        if let Some(name) = item.display_name() {
            return Ok(name.to_string());
        }
        let (quote, _) = services
            .fetch(&item.symbol, Need::PRICE | Need::CHG_PCT)
            .await?;
        Ok(quote.name)
    }
}

/// A member of the fetched quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteField {
    /// Formatted price.
    Price,
    /// Formatted change percent.
    ChangePct,
}

#[async_trait]
impl Resolver for QuoteField {
    async fn resolve(&self, item: &Item, services: &Services) -> Result<String, WlError> {
        let need = match self {
            Self::Price => Need::PRICE,
            Self::ChangePct => Need::CHG_PCT,
        };
        let (quote, _) = services.fetch(&item.symbol, need).await?;
        Ok(match self {
            Self::Price => quote.price,
            Self::ChangePct => quote.change_pct,
        })
    }
}

/// A path column read from the fetched sections, fetched with the column's own need.
///
/// Carries its own column definition, so the path and format always come from the
/// catalog the registry was built over.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    def: ColumnDef,
}

impl FieldResolver {
    /// Resolver for one path column.
    pub const fn new(def: ColumnDef) -> Self {
        Self { def }
    }
}

#[async_trait]
impl Resolver for FieldResolver {
    async fn resolve(&self, item: &Item, services: &Services) -> Result<String, WlError> {
        let (_, f) = services.fetch(&item.symbol, self.def.need()).await?;
        Ok(column_value(&self.def, &f).unwrap_or_default())
    }
}

/// `"{city}, {country} · {phone} · {host}"`, omitting empty parts.
///
/// The host comes from the investor-relations link when present, else the website.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hq;

#[async_trait]
impl Resolver for Hq {
    async fn resolve(&self, item: &Item, services: &Services) -> Result<String, WlError> {
        let (_, f) = services.fetch(&item.symbol, Need::ASSET_PROFILE).await?;

        let location = [profile(&f, "city"), profile(&f, "country")]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        let link = [profile(&f, "irWebsite"), profile(&f, "website")]
            .into_iter()
            .flatten()
            .next()
            .and_then(|s| host_only(&s))
            .unwrap_or_default();
        let phone = profile(&f, "phone").unwrap_or_default();

        let parts = [location.as_str(), phone.as_str(), link.as_str()];
        Ok(parts
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(HQ_SEPARATOR))
    }
}

fn profile(f: &Fundamentals, field: &str) -> Option<String> {
    f.section("assetProfile")
        .and_then(|ap| ap.get(field))
        .and_then(path::scalar_text)
}

/// Name, title and age of the officer picked as chief executive.
///
/// Title and age are appended only when present; empty when neither name nor title is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ceo;

#[async_trait]
impl Resolver for Ceo {
    async fn resolve(&self, item: &Item, services: &Services) -> Result<String, WlError> {
        let (_, f) = services.fetch(&item.symbol, Need::ASSET_PROFILE).await?;
        let Some(ceo) = f.ceo else {
            return Ok(String::new());
        };
        if ceo.name.is_empty() && ceo.title.is_empty() {
            return Ok(String::new());
        }
        let mut out = ceo.name;
        if !ceo.title.is_empty() {
            out = format!("{out} — {}", ceo.title).trim().to_string();
        }
        if let Some(age) = ceo.age {
            out.push_str(&format!(" ({age})"));
        }
        Ok(out)
    }
}

/// Mean officer age with one decimal place.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvgOfficerAge;

#[async_trait]
impl Resolver for AvgOfficerAge {
    async fn resolve(&self, item: &Item, services: &Services) -> Result<String, WlError> {
        let (_, f) = services.fetch(&item.symbol, Need::ASSET_PROFILE).await?;
        Ok(f.avg_officer_age.map(format_decimal1).unwrap_or_default())
    }
}

/// Column key to resolver mapping plus the single dispatch entry point.
///
/// Built once next to its catalog and shared read-only.
#[derive(Clone)]
pub struct Registry {
    catalog: Arc<Catalog>,
    resolvers: HashMap<String, Arc<dyn Resolver>>,
}

impl Registry {
    /// A registry without resolvers; every column falls back to item fields.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            resolvers: HashMap::new(),
        }
    }

    /// Registry with the built-in resolvers for every column of `catalog`.
    ///
    /// Path columns get a [`FieldResolver`] with the column's own need; derived columns
    /// without a built-in resolver are left unregistered.
    pub fn builtin(catalog: Arc<Catalog>) -> Self {
        let mut reg = Self::new(Arc::clone(&catalog));
        for def in catalog.defs() {
            if matches!(def.extract, Extract::Path(_)) {
                reg.register(def.key.clone(), FieldResolver::new(def.clone()));
            }
        }
        reg.register("sym", Symbol);
        reg.register("name", Name);
        reg.register("price", QuoteField::Price);
        reg.register("chg%", QuoteField::ChangePct);
        reg.register("hq", Hq);
        reg.register("ceo", Ceo);
        reg.register("avg_officer_age", AvgOfficerAge);
        reg
    }

    /// Register (or replace) the resolver for a canonical key.
    pub fn register(&mut self, key: impl Into<String>, resolver: impl Resolver + 'static) {
        self.resolvers
            .insert(key.into().trim().to_lowercase(), Arc::new(resolver));
    }

    /// The catalog used for canonicalization.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether a resolver serves `column` (in any accepted spelling).
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        let (key, _) = self.catalog.canonicalize(column);
        self.resolvers.contains_key(&key)
    }

    /// Display value of `column` for `item`.
    ///
    /// Never fails: resolver errors become an empty string. Columns without a resolver
    /// are looked up in the item's own fields (exact key, then case-insensitively).
    pub async fn resolve(&self, column: &str, item: &Item, services: &Services) -> String {
        let (key, _) = self.catalog.canonicalize(column);
        if let Some(resolver) = self.resolvers.get(&key) {
            return match resolver.resolve(item, services).await {
                Ok(v) => v,
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        column = %key,
                        symbol = %item.symbol,
                        error = %_e,
                        "column resolution failed; rendering empty cell"
                    );
                    String::new()
                }
            };
        }
        item.field(column.trim())
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Registry")
            .field("columns", &self.catalog.len())
            .field("resolvers", &keys)
            .finish()
    }
}
