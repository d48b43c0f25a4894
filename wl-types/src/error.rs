use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the wl workspace.
///
/// Only the service boundary produces fetch errors; the resolver layer turns them into
/// empty cells. Configuration-shape errors surface to the caller unchanged.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WlError {
    /// Upstream answered but carried no price block for the symbol.
    #[error("no price data for {symbol}")]
    NoPriceData {
        /// Symbol that was requested.
        symbol: String,
    },

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "quoteSummary for XYZ".
        what: String,
    },

    /// The upstream provider failed (transport, status, decoding).
    #[error("{provider} failed: {msg}")]
    Upstream {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A single upstream call exceeded its fixed timeout.
    #[error("provider timed out: {symbol} via {provider}")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
        /// Symbol being fetched.
        symbol: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {what}")]
    RequestTimeout {
        /// What was being produced, e.g. the watchlist name.
        what: String,
    },

    /// Issues with the returned or expected data.
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A column set name that is not registered.
    #[error("unknown column set: {name}; available: {}", available.join(", "))]
    UnknownColumnSet {
        /// The requested set name.
        name: String,
        /// Registered set names, sorted.
        available: Vec<String>,
    },
}

impl WlError {
    /// Helper: build an `Upstream` error with the provider name and message.
    pub fn upstream(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `NoPriceData` error.
    pub fn no_price_data(symbol: impl Into<String>) -> Self {
        Self::NoPriceData {
            symbol: symbol.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
            symbol: symbol.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    pub fn request_timeout(what: impl Into<String>) -> Self {
        Self::RequestTimeout { what: what.into() }
    }

    /// Whether this error stems from a fixable input mistake rather than a fetch.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidArg(_) | Self::UnknownColumnSet { .. })
    }
}
