use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use wl_core::{Item, Need, Services, Watchlist, WlError};

use crate::core::{Wl, with_request_deadline};
use crate::sort::{SortKey, sort_rows};

/// Single-column row ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column to order by, in any accepted spelling. Need not be displayed.
    pub column: String,
    /// Reverse the order of non-empty values; empty values stay last.
    #[serde(default)]
    pub descending: bool,
}

/// Per-render options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Explicit columns; when empty the list's own columns apply, then inference.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Optional row ordering; list order otherwise.
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

impl RenderOptions {
    /// Options with explicit columns.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Order rows by `column`.
    #[must_use]
    pub fn sorted_by(mut self, column: impl Into<String>, descending: bool) -> Self {
        self.sort = Some(SortSpec {
            column: column.into(),
            descending,
        });
        self
    }
}

/// One rendered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Item symbol.
    pub symbol: String,
    /// One display string per table column.
    pub cells: Vec<String>,
}

/// A rendered watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Watchlist name.
    pub name: String,
    /// Column headers as requested.
    pub columns: Vec<String>,
    /// Rows in list order, or sorted when asked.
    pub rows: Vec<Row>,
}

impl Table {
    /// Cell of `row` under header `column`.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.cells.get(idx).map(String::as_str)
    }

    /// All cells under header `column`, top to bottom.
    #[must_use]
    pub fn column(&self, column: &str) -> Vec<&str> {
        (0..self.rows.len())
            .filter_map(|i| self.cell(i, column))
            .collect()
    }

    /// Row symbols, top to bottom.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.symbol.as_str()).collect()
    }
}

impl Wl {
    /// Render one watchlist.
    ///
    /// Every row is resolved with the need of the whole column list (plus the sort
    /// column), so with caching enabled each symbol costs one upstream call. At most
    /// `concurrency` items are in flight; rows come back in list order unless sorted.
    /// Column failures render as empty cells.
    ///
    /// # Errors
    /// Returns `RequestTimeout` when a configured request deadline passes. Dropping
    /// the returned future cancels in-flight fetches.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "wl::render",
            skip(self, list, opts),
            fields(list = %list.name, items = list.items.len()),
        )
    )]
    pub async fn render(&self, list: &Watchlist, opts: &RenderOptions) -> Result<Table, WlError> {
        let explicit = if opts.columns.is_empty() {
            list.columns.as_slice()
        } else {
            opts.columns.as_slice()
        };
        let columns = self.compute_columns(explicit, &list.items);

        let mut need = self.need_for(columns.as_slice());
        if let Some(spec) = &opts.sort {
            need |= self.need_for(std::slice::from_ref(&spec.column));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?columns, need = %need, "resolved render plan");

        let services = Services::new(Arc::clone(&self.service)).with_need(need);
        let sort_column = opts.sort.as_ref().map(|s| s.column.as_str());
        let rows = stream::iter(&list.items)
            .map(|item| self.render_row(item, &columns, sort_column, &services))
            .buffered(self.cfg.concurrency)
            .collect::<Vec<_>>();
        let mut rows =
            with_request_deadline(self.cfg.request_timeout, &format!("render {}", list.name), rows)
                .await?;

        if let Some(spec) = &opts.sort {
            sort_rows(&mut rows, spec.descending);
        }
        Ok(Table {
            name: list.name.clone(),
            columns,
            rows: rows.into_iter().map(|(row, _)| row).collect(),
        })
    }

    /// Render several watchlists one after another, in input order.
    ///
    /// # Errors
    /// Stops at the first list that fails to render.
    pub async fn render_all(
        &self,
        lists: &[Watchlist],
        opts: &RenderOptions,
    ) -> Result<Vec<Table>, WlError> {
        let mut out = Vec::with_capacity(lists.len());
        for list in lists {
            out.push(self.render(list, opts).await?);
        }
        Ok(out)
    }

    // Columns of one row resolve in order so the first fetch fills the cache for the rest.
    async fn render_row(
        &self,
        item: &Item,
        columns: &[String],
        sort_column: Option<&str>,
        services: &Services,
    ) -> (Row, Option<SortKey>) {
        let mut cells = Vec::with_capacity(columns.len());
        for column in columns {
            cells.push(self.registry.resolve(column, item, services).await);
        }
        let key = match sort_column {
            Some(column) => Some(self.sort_key(column, item, columns, &cells, services).await),
            None => None,
        };
        let row = Row {
            symbol: item.symbol.clone(),
            cells,
        };
        (row, key)
    }

    async fn sort_key(
        &self,
        column: &str,
        item: &Item,
        columns: &[String],
        cells: &[String],
        services: &Services,
    ) -> SortKey {
        let display = match columns.iter().position(|c| c == column) {
            Some(idx) => cells[idx].clone(),
            None => self.registry.resolve(column, item, services).await,
        };
        let (key, _) = self.catalog().canonicalize(column);
        let raw = if key == "chg%" && !display.trim().is_empty() {
            services
                .fetch(&item.symbol, Need::CHG_PCT)
                .await
                .ok()
                .and_then(|(quote, _)| quote.change_raw)
        } else {
            None
        };
        SortKey::new(display, raw, item.field(&key))
    }
}
