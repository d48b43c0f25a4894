//! wl-core
//!
//! Column resolution and enrichment primitives for the `wl` watchlist renderer.
//!
//! - `catalog`: known columns, aliases, upstream module dependencies and the need
//!   calculator.
//! - `path` / `payload`: dotted-path extraction from raw upstream payloads and decoding
//!   into `Quote` / `Fundamentals`.
//! - `service`: the `QuoteService` contract implemented by upstream adapters and the
//!   `Middleware` trait implemented by wrappers such as the cache.
//! - `resolve`: the column resolver registry, including the derived columns.
//! - `order` / `sets`: column list construction and named column groups.
//!
//! The catalog and registry are plain values built once at startup and shared by
//! reference; nothing here is process-global.
#![warn(missing_docs)]

/// Column definitions, alias resolution and need calculation.
pub mod catalog;
/// Display formatting helpers shared by resolvers.
pub mod format;
/// Column order computation.
pub mod order;
/// Dotted-path extraction over raw upstream payloads.
pub mod path;
/// Decoding raw upstream payloads into quotes and fundamentals.
pub mod payload;
/// Column resolver registry and built-in resolvers.
pub mod resolve;
/// The upstream service contract and middleware trait.
pub mod service;
/// Named column sets.
pub mod sets;

pub use catalog::{Catalog, ColumnDef, Extract, Format};
pub use order::compute_columns;
pub use resolve::{Registry, Resolver, Services};
pub use service::{Enrichment, Middleware, QuoteService};
pub use sets::ColumnSets;
pub use wl_types::*;
