use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Scalar value of a user-supplied item field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicit null or missing value.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Any number; integers are kept exact up to 2^53.
    Number(f64),
    /// Free text.
    Text(String),
}

impl FieldValue {
    /// Numeric view used for comparisons; text is parsed leniently.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Null | Self::Bool(_) => None,
        }
    }

    /// Whether the value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            // Whole numbers render without a trailing ".0"
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s.trim()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One symbol entry of a watchlist.
///
/// Immutable once loaded; the symbol is the enrichment and cache key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
    /// Ticker symbol; empty means nothing to enrich.
    #[serde(default)]
    pub symbol: String,
    /// User override for the display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Arbitrary user-supplied fields.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Item {
    /// Item for `symbol` with no name override and no fields.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Set the display name override.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a user field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The user-provided name when present and non-blank.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// Look up a user field: exact key first, then case-insensitively.
    ///
    /// Null values count as absent.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        if let Some(v) = self.fields.get(key).filter(|v| !v.is_null()) {
            return Some(v);
        }
        self.fields
            .iter()
            .find(|(k, v)| k.eq_ignore_ascii_case(key) && !v.is_null())
            .map(|(_, v)| v)
    }
}

/// A named list of items with an optional explicit column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Watchlist {
    /// List name as shown to the user.
    pub name: String,
    /// Explicit columns; empty means infer from the items.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Entries in display order.
    #[serde(default)]
    pub items: Vec<Item>,
}
