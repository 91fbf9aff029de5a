//! Numeric fields carried by a stock-period record.
//!
//! Every numeric column the pipeline understands is named here once, together
//! with its wire name in the input JSON. Column ordering of every feature
//! vector is derived from the constant field lists below.

use serde::{Deserialize, Serialize};

/// Wire name of the stock identifier column.
pub const STOCK_ID_COLUMN: &str = "stockid";

/// Wire name of the period date column.
pub const DATE_COLUMN: &str = "date";

/// Suffix appended to a field's wire name to name its return feature.
pub const RETURN_SUFFIX: &str = "_r";

/// A numeric field of a [`StockPeriodRecord`](crate::StockPeriodRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    /// Trailing-twelve-month valuation ratio.
    Ttm,
    /// Price to earnings.
    Pe,
    /// Price to book.
    Pb,
    /// Price to cash flow.
    Pcf,
    /// Search interest index.
    BaiduIndex,
    /// Social sentiment index (cnsenti lexicon).
    WeiboCnsenti,
    /// Social sentiment index (dictionary method).
    WeiboDictionary,
    /// Regional GDP.
    MarketGdp,
    /// Regional population.
    MarketPopulation,
    /// Regional average salary.
    MarketSalary,
    /// Total assets.
    TotalAsset,
    /// Quarter-over-quarter asset growth.
    QuarterlyAssetGrowth,
    /// Per-share operating cash flow.
    CashFlowPerShare,
    /// Quarterly risk-free rate.
    RiskFreeRate,
    /// Smoothed asset growth.
    SmoothAssetGrowth,
    /// Period close price.
    ClosePrice,
}

impl Field {
    /// Every field, in wire order.
    pub const ALL: [Self; 16] = [
        Self::Ttm,
        Self::Pe,
        Self::Pb,
        Self::Pcf,
        Self::BaiduIndex,
        Self::WeiboCnsenti,
        Self::WeiboDictionary,
        Self::MarketGdp,
        Self::MarketPopulation,
        Self::MarketSalary,
        Self::TotalAsset,
        Self::QuarterlyAssetGrowth,
        Self::CashFlowPerShare,
        Self::RiskFreeRate,
        Self::SmoothAssetGrowth,
        Self::ClosePrice,
    ];

    /// Fields shared by both stages. Return features are derived for these.
    pub const BASE: [Self; 10] = [
        Self::Ttm,
        Self::Pe,
        Self::Pb,
        Self::Pcf,
        Self::BaiduIndex,
        Self::WeiboCnsenti,
        Self::WeiboDictionary,
        Self::MarketGdp,
        Self::MarketPopulation,
        Self::MarketSalary,
    ];

    /// Raw fields only the price stage consumes.
    pub const STAGE2: [Self; 6] = [
        Self::TotalAsset,
        Self::QuarterlyAssetGrowth,
        Self::CashFlowPerShare,
        Self::RiskFreeRate,
        Self::SmoothAssetGrowth,
        Self::ClosePrice,
    ];

    /// Valuation factors forecast by the factor stage, indexed 0 through 3.
    pub const TARGETS: [Self; 4] = [Self::Ttm, Self::Pe, Self::Pb, Self::Pcf];

    /// Key of this field in the input JSON.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Ttm => "TTM",
            Self::Pe => "PE",
            Self::Pb => "PB",
            Self::Pcf => "PCF",
            Self::BaiduIndex => "baiduindex",
            Self::WeiboCnsenti => "weibo_cnsenti",
            Self::WeiboDictionary => "weibo_dictionary",
            Self::MarketGdp => "marketGDP",
            Self::MarketPopulation => "marketpopulation",
            Self::MarketSalary => "marketaslary",
            Self::TotalAsset => "total_asset",
            Self::QuarterlyAssetGrowth => "quarterly_asset_growth",
            Self::CashFlowPerShare => "cash_flow_perhold_processed",
            Self::RiskFreeRate => "rfr",
            Self::SmoothAssetGrowth => "smooth_asset_growth",
            Self::ClosePrice => "close_price",
        }
    }

    /// Name of the return feature derived from this field.
    #[must_use]
    pub fn return_name(self) -> String {
        format!("{}{RETURN_SUFFIX}", self.wire_name())
    }

    /// Looks a field up by its wire name.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }

    /// Whether the factor stage needs this field.
    #[must_use]
    pub fn is_base(self) -> bool {
        Self::BASE.contains(&self)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}
