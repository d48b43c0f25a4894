//! Watchlist data model and configuration primitives shared by every `wl` crate.
#![warn(missing_docs)]

mod config;
mod error;
mod item;
mod need;
mod quote;

pub use config::{CacheConfig, WlConfig};
pub use error::WlError;
pub use item::{FieldValue, Item, Watchlist};
pub use need::{Module, Need};
pub use quote::{Fundamentals, Officer, Quote};
