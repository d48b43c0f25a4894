use std::collections::{BTreeMap, HashSet};

use wl_types::WlError;

/// Named column groups that expand into ordered column lists.
#[derive(Debug, Clone, Default)]
pub struct ColumnSets {
    sets: BTreeMap<String, Vec<String>>,
}

impl ColumnSets {
    /// No sets registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in `price` and `assetProfile` sets.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with_set("price", ["price", "chg%"])
            .with_set(
                "assetProfile",
                [
                    "sector",
                    "industry",
                    "employees",
                    "website",
                    "ir",
                    "officers_count",
                    "avg_officer_age",
                    "business_summary",
                    "hq",
                    "ceo",
                ],
            )
    }

    /// Register (or replace) a set.
    #[must_use]
    pub fn with_set<I, S>(mut self, name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets
            .insert(name.into(), columns.into_iter().map(Into::into).collect());
        self
    }

    /// Columns of one set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.sets.get(name).map(Vec::as_slice)
    }

    /// Registered set names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.sets.keys().cloned().collect()
    }

    /// Union of the named sets, keeping set order then column order.
    ///
    /// Blank names are skipped and repeated columns keep their first position.
    ///
    /// # Errors
    /// Returns `UnknownColumnSet` for the first name that is not registered.
    pub fn expand<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<String>, WlError> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for name in names.iter().map(|n| n.as_ref().trim()) {
            if name.is_empty() {
                continue;
            }
            let cols = self.get(name).ok_or_else(|| WlError::UnknownColumnSet {
                name: name.to_string(),
                available: self.names(),
            })?;
            for c in cols {
                if seen.insert(c.as_str()) {
                    out.push(c.clone());
                }
            }
        }
        Ok(out)
    }
}
