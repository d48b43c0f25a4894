use core::fmt;
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Upstream data a fetch must cover.
    ///
    /// A need is a pure function of the requested column set, so it doubles as the
    /// cache partition key next to the symbol.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Need: u8 {
        /// Regular market price.
        const PRICE = 1 << 0;
        /// Regular market change percent.
        const CHG_PCT = 1 << 1;
        /// Listing exchange name.
        const EXCHANGE = 1 << 2;
        /// Company profile (sector, address, officers, ...).
        const ASSET_PROFILE = 1 << 3;
        /// Financial ratios, margins, cash metrics and analyst consensus.
        const FINANCIAL_DATA = 1 << 4;
        /// Market detail: valuation multiples, trading ranges, dividends, currency.
        const SUMMARY_DETAIL = 1 << 5;
    }
}

impl Need {
    /// Upstream quoteSummary modules to request for this need.
    ///
    /// `price` is always present and always first; every module appears once.
    #[must_use]
    pub fn upstream_modules(self) -> Vec<&'static str> {
        let mut out = vec![Module::Price.upstream()];
        for module in Module::ALL {
            let name = module.upstream();
            if self.contains(module.need()) && !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}

impl fmt::Display for Need {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// A named group of upstream fields a column depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Module {
    /// Price and display name.
    Price,
    /// Change percent.
    ChangePercent,
    /// Exchange name.
    Exchange,
    /// Company profile.
    AssetProfile,
    /// Financial ratios.
    FinancialData,
    /// Market detail.
    SummaryDetail,
}

impl Module {
    /// Every module, in need-bit order.
    pub const ALL: [Self; 6] = [
        Self::Price,
        Self::ChangePercent,
        Self::Exchange,
        Self::AssetProfile,
        Self::FinancialData,
        Self::SummaryDetail,
    ];

    /// The need flag this module contributes.
    #[must_use]
    pub const fn need(self) -> Need {
        match self {
            Self::Price => Need::PRICE,
            Self::ChangePercent => Need::CHG_PCT,
            Self::Exchange => Need::EXCHANGE,
            Self::AssetProfile => Need::ASSET_PROFILE,
            Self::FinancialData => Need::FINANCIAL_DATA,
            Self::SummaryDetail => Need::SUMMARY_DETAIL,
        }
    }

    /// Name of the upstream quoteSummary module serving this group.
    #[must_use]
    pub const fn upstream(self) -> &'static str {
        match self {
            Self::Price | Self::ChangePercent | Self::Exchange => "price",
            Self::AssetProfile => "assetProfile",
            Self::FinancialData => "financialData",
            Self::SummaryDetail => "summaryDetail",
        }
    }

    /// Stable, kebab-case identifier for logs and help output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::ChangePercent => "change-percent",
            Self::Exchange => "exchange",
            Self::AssetProfile => "asset-profile",
            Self::FinancialData => "financial-data",
            Self::SummaryDetail => "summary-detail",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
