//! wl renders watchlists of financial symbols, enriching each entry with quote and
//! fundamentals data from a pluggable upstream service.
//!
//! Overview
//! - Columns are either given explicitly or inferred from the items' own fields.
//! - Each column maps to the upstream module it reads; a render fetches only the
//!   modules its columns need.
//! - Upstream answers are cached per `(symbol, need)` with a TTL and LRU bound.
//! - Every cell comes from the resolver registry, including derived columns such as
//!   `hq` and `ceo`. A failing column renders empty instead of failing the row.
//!
//! Key behaviors and trade-offs
//! - Concurrency: items resolve concurrently up to a configured limit; rows keep list
//!   order regardless of completion order.
//! - Row-level need: all columns of a row fetch with the union of their needs, so one
//!   cache entry serves the whole row at the cost of fetching modules some columns
//!   do not read.
//! - Deadline: an optional request timeout bounds each render as a whole.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use wl::{Item, RenderOptions, Watchlist, Wl};
//! use wl_mock::MockService;
//!
//! let wl = Wl::builder().with_service(Arc::new(MockService::new())).build()?;
//! let list = Watchlist {
//!     name: "tech".into(),
//!     columns: vec![],
//!     items: vec![Item::new("AAPL"), Item::new("MSFT")],
//! };
//! let table = wl
//!     .render(&list, &RenderOptions::default().sorted_by("chg%", true))
//!     .await?;
//! ```
//!
//! See `wl/examples/` for a runnable demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
mod render;
mod sort;

pub use crate::core::{Wl, WlBuilder};
pub use render::{RenderOptions, Row, SortSpec, Table};

pub use wl_middleware::{CacheMiddleware, CachingService, ServiceBuilder};

// Re-export core types for convenience
pub use wl_core::{
    CacheConfig, Catalog, ColumnDef, ColumnSets, Enrichment, Extract, FieldValue, Format,
    Fundamentals, Item, Middleware, Module, Need, Officer, Quote, QuoteService, Registry,
    Resolver, Services, Watchlist, WlConfig, WlError,
};
