//! wl-middleware
//!
//! Wrappers around a `QuoteService`: the `(symbol, need)` keyed TTL + LRU cache and the
//! `ServiceBuilder` that composes layers.

mod builder;
mod cache;

pub use crate::builder::ServiceBuilder;
pub use crate::cache::{CacheMiddleware, CachingService};
