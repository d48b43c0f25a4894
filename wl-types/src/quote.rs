use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Price-module view of a symbol, ready for display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quote {
    /// Formatted regular market price.
    pub price: String,
    /// Formatted change percent, e.g. `"-1.23%"`.
    pub change_pct: String,
    /// Signed change percent as reported upstream.
    pub change_raw: Option<f64>,
    /// Short name, falling back to long name.
    pub name: String,
}

/// A company officer as used by the CEO column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Officer {
    /// Whitespace-normalized name.
    pub name: String,
    /// Whitespace-normalized title.
    pub title: String,
    /// Age, when reported.
    pub age: Option<u32>,
}

/// Enrichment data beyond the quote.
///
/// Holds the raw upstream sections the fetch asked for, keyed by quoteSummary module
/// name (`price`, `assetProfile`, `financialData`, `summaryDetail`) with the same
/// layout as the upstream result object. Column keys never appear here: path columns
/// are read from [`raw`](Self::raw) by whichever catalog the caller resolves with.
/// Officer-roster aggregates are kept typed since the derived columns combine several
/// of their parts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fundamentals {
    raw: Value,
    /// Officer picked as chief executive, if the roster was fetched and non-empty.
    pub ceo: Option<Officer>,
    /// Mean age over officers that report one.
    pub avg_officer_age: Option<f64>,
}

impl Fundamentals {
    /// Raw section of one upstream module, e.g. `"assetProfile"`.
    #[must_use]
    pub fn section(&self, upstream: &str) -> Option<&Value> {
        self.raw.get(upstream)
    }

    /// Store the raw section for an upstream module. Non-object values are dropped.
    pub fn insert_section(&mut self, upstream: impl Into<String>, section: Value) {
        if !section.is_object() {
            return;
        }
        if !self.raw.is_object() {
            self.raw = Value::Object(Map::new());
        }
        if let Value::Object(sections) = &mut self.raw {
            sections.insert(upstream.into(), section);
        }
    }

    /// Names of the stored sections, in key order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.raw
            .as_object()
            .into_iter()
            .flat_map(|sections| sections.keys().map(String::as_str))
    }

    /// All stored sections as one object rooted like the upstream result, so dotted
    /// paths such as `assetProfile.city` apply unchanged. `Null` when nothing was stored.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// True when nothing beyond defaults was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.as_object().is_none_or(Map::is_empty)
            && self.ceo.is_none()
            && self.avg_officer_age.is_none()
    }
}
