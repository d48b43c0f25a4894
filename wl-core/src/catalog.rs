use std::collections::{BTreeMap, HashMap};

use wl_types::{Module, Need};

/// How a column's value is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extract {
    /// Available on the item itself; never fetched.
    Local,
    /// Dotted path into the raw upstream payload.
    ///
    /// Alternatives are separated by `|` and tried in order; a terminal `#` segment
    /// yields the length of the array it follows.
    Path(String),
    /// Computed by a dedicated resolver from several raw fields.
    Derived,
}

/// Display formatting applied to a path-extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Verbatim.
    #[default]
    Text,
    /// Integer with thousands separators; zero means absent.
    Count,
    /// One decimal place with thousands separators.
    Decimal1,
}

/// Static description of one known column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Canonical key, lower-case.
    pub key: String,
    /// Alternative spellings resolved to `key` case-insensitively.
    pub aliases: Vec<String>,
    /// Upstream data group the column reads, if any.
    pub module: Option<Module>,
    /// Extraction rule.
    pub extract: Extract,
    /// Display format for path-extracted values.
    pub format: Format,
}

impl ColumnDef {
    /// A column served from the item without any fetch.
    pub fn local(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            aliases: Vec::new(),
            module: None,
            extract: Extract::Local,
            format: Format::Text,
        }
    }

    /// A column read from `path` in the payload of `module`.
    pub fn path(key: impl Into<String>, module: Module, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            aliases: Vec::new(),
            module: Some(module),
            extract: Extract::Path(path.into()),
            format: Format::Text,
        }
    }

    /// A column computed by a dedicated resolver from data of `module`.
    pub fn derived(key: impl Into<String>, module: Module) -> Self {
        Self {
            key: key.into(),
            aliases: Vec::new(),
            module: Some(module),
            extract: Extract::Derived,
            format: Format::Text,
        }
    }

    /// Add an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the display format.
    #[must_use]
    pub const fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Need flag contributed by this column; empty for local columns.
    #[must_use]
    pub fn need(&self) -> Need {
        self.module.map_or_else(Need::empty, Module::need)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Registry of known columns: the single source of truth for dependencies and paths.
///
/// Built once at startup, then shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    defs: HashMap<String, ColumnDef>,
    aliases: HashMap<String, String>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Re-registering a key replaces it; an alias already mapped to
    /// another column is re-pointed to this one.
    pub fn register(&mut self, mut def: ColumnDef) {
        def.key = normalize(&def.key);
        for alias in &def.aliases {
            let alias = normalize(alias);
            if !alias.is_empty() {
                self.aliases.insert(alias, def.key.clone());
            }
        }
        self.defs.insert(def.key.clone(), def);
    }

    /// Resolve user input to a canonical key.
    ///
    /// Returns the lower-cased, trimmed input with `false` when the column is unknown.
    /// A registered key takes precedence over an identical alias.
    #[must_use]
    pub fn canonicalize(&self, input: &str) -> (String, bool) {
        let lc = normalize(input);
        if self.defs.contains_key(&lc) {
            return (lc, true);
        }
        match self.aliases.get(&lc) {
            Some(key) => (key.clone(), true),
            None => (lc, false),
        }
    }

    /// Definition for a column given in any accepted spelling.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnDef> {
        let (key, known) = self.canonicalize(column);
        if known { self.defs.get(&key) } else { None }
    }

    /// All definitions, in no particular order.
    pub fn defs(&self) -> impl Iterator<Item = &ColumnDef> {
        self.defs.values()
    }

    /// Number of registered columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether no column is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Column keys grouped by module, each list sorted. Local columns are omitted.
    #[must_use]
    pub fn list_by_module(&self) -> BTreeMap<Module, Vec<String>> {
        let mut out: BTreeMap<Module, Vec<String>> = BTreeMap::new();
        for def in self.defs.values() {
            if let Some(m) = def.module {
                out.entry(m).or_default().push(def.key.clone());
            }
        }
        for keys in out.values_mut() {
            keys.sort();
        }
        out
    }

    /// Minimal need covering `columns`.
    ///
    /// Order and duplicates do not matter. Unknown and local columns contribute nothing.
    pub fn need_for<S: AsRef<str>>(&self, columns: &[S]) -> Need {
        columns
            .iter()
            .filter_map(|c| self.get(c.as_ref()))
            .fold(Need::empty(), |acc, def| acc | def.need())
    }

    /// The built-in column set.
    #[must_use]
    pub fn builtin() -> Self {
        use Format::{Count, Decimal1};
        use Module::{AssetProfile, ChangePercent, Exchange, FinancialData, Price, SummaryDetail};

        let mut c = Self::new();

        c.register(ColumnDef::local("sym").alias("symbol"));
        c.register(ColumnDef::derived("name", Price));
        c.register(ColumnDef::derived("price", Price));
        c.register(ColumnDef::derived("chg%", ChangePercent).alias("chg").alias("change%"));
        c.register(ColumnDef::path(
            "exchange",
            Exchange,
            "price.exchangeName|price.exchange",
        ));

        // company profile
        for (key, path) in [
            ("sector", "assetProfile.sector"),
            ("industry", "assetProfile.industry"),
            ("website", "assetProfile.website"),
            ("ir", "assetProfile.irWebsite"),
            ("business_summary", "assetProfile.longBusinessSummary"),
            ("address1", "assetProfile.address1"),
            ("city", "assetProfile.city"),
            ("zip", "assetProfile.zip"),
            ("country", "assetProfile.country"),
            ("phone", "assetProfile.phone"),
        ] {
            c.register(ColumnDef::path(key, AssetProfile, path));
        }
        c.register(
            ColumnDef::path("employees", AssetProfile, "assetProfile.fullTimeEmployees")
                .format(Count),
        );
        c.register(
            ColumnDef::path(
                "officers_count",
                AssetProfile,
                "assetProfile.companyOfficers.#",
            )
            .format(Count),
        );
        c.register(ColumnDef::derived("avg_officer_age", AssetProfile).format(Decimal1));
        c.register(ColumnDef::derived("hq", AssetProfile));
        c.register(ColumnDef::derived("ceo", AssetProfile));

        // financial ratios
        for (key, field) in [
            ("roe%", "returnOnEquity"),
            ("roa%", "returnOnAssets"),
            ("pm%", "profitMargins"),
            ("om%", "operatingMargins"),
            ("gm%", "grossMargins"),
            ("de%", "debtToEquity"),
            ("cr", "currentRatio"),
            ("qr", "quickRatio"),
            ("rev_g%", "revenueGrowth"),
            ("earn_g%", "earningsGrowth"),
            ("cash", "totalCash"),
            ("debt", "totalDebt"),
            ("fcf", "freeCashflow"),
            ("ocf", "operatingCashflow"),
            ("rev_ps", "revenuePerShare"),
            ("tgt_mean", "targetMeanPrice"),
        ] {
            c.register(ColumnDef::path(key, FinancialData, fmt_or_raw("financialData", field)));
        }
        c.register(ColumnDef::path("reco", FinancialData, "financialData.recommendationKey"));
        c.register(
            ColumnDef::path(
                "analysts",
                FinancialData,
                "financialData.numberOfAnalystOpinions.raw",
            )
            .format(Count),
        );

        // market detail
        for (key, field) in [
            ("mktcap", "marketCap"),
            ("beta", "beta"),
            ("div_yield%", "dividendYield"),
            ("div_rate", "dividendRate"),
            ("payout%", "payoutRatio"),
            ("pe_ttm", "trailingPE"),
            ("pe_fwd", "forwardPE"),
            ("ps_ttm", "priceToSalesTrailing12Months"),
            ("open", "open"),
            ("prev_close", "previousClose"),
            ("50d_avg", "fiftyDayAverage"),
            ("200d_avg", "twoHundredDayAverage"),
            ("day_high", "dayHigh"),
            ("day_low", "dayLow"),
            ("52w_high", "fiftyTwoWeekHigh"),
            ("52w_low", "fiftyTwoWeekLow"),
            ("ath", "allTimeHigh"),
            ("atl", "allTimeLow"),
            ("ex_div", "exDividendDate"),
            ("5y_avg_div_yield", "fiveYearAvgDividendYield"),
        ] {
            let def = ColumnDef::path(key, SummaryDetail, fmt_or_raw("summaryDetail", field));
            let def = match key {
                "mktcap" => def.alias("marketcap").alias("market_cap"),
                "div_yield%" => def.alias("div%"),
                "div_rate" => def.alias("div"),
                "pe_ttm" => def.alias("pe"),
                _ => def,
            };
            c.register(def);
        }
        c.register(ColumnDef::path(
            "avg_vol",
            SummaryDetail,
            "summaryDetail.averageVolume.fmt|summaryDetail.volume.fmt|summaryDetail.averageVolume.raw",
        ));
        c.register(ColumnDef::path(
            "avg_vol10d",
            SummaryDetail,
            "summaryDetail.averageDailyVolume10Day.fmt|summaryDetail.averageVolume10days.fmt",
        ));
        c.register(ColumnDef::path(
            "vol",
            SummaryDetail,
            "summaryDetail.regularMarketVolume.fmt|summaryDetail.volume.fmt|summaryDetail.volume.raw",
        ));
        c.register(ColumnDef::path("ccy", SummaryDetail, "summaryDetail.currency"));

        c
    }
}

fn fmt_or_raw(module: &str, field: &str) -> String {
    format!("{module}.{field}.fmt|{module}.{field}.raw")
}
