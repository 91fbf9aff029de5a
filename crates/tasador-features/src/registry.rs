//! Field registry for discovering and categorizing input fields.
//!
//! This module provides metadata about every numeric field the pipeline
//! reads, including which stage consumes it.

use serde::{Deserialize, Serialize};
use tasador_traits::Field;

/// Field category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldCategory {
    /// Valuation ratios forecast by the factor stage
    Valuation,
    /// Search and social sentiment indices
    Sentiment,
    /// Regional macro indicators
    Macro,
    /// Balance-sheet and cash-flow fundamentals
    Fundamental,
    /// Market prices and rates
    Market,
}

impl FieldCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::Valuation,
        Self::Sentiment,
        Self::Macro,
        Self::Fundamental,
        Self::Market,
    ];

    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Valuation => "Valuation ratios (forecast one period ahead)",
            Self::Sentiment => "Search interest and social sentiment indices",
            Self::Macro => "Regional macroeconomic indicators",
            Self::Fundamental => "Balance-sheet and cash-flow fundamentals",
            Self::Market => "Prices and rates",
        }
    }

    /// Short display label.
    #[must_use]
    pub const fn label(&self) -> &str {
        match self {
            Self::Valuation => "Valuation",
            Self::Sentiment => "Sentiment",
            Self::Macro => "Macro",
            Self::Fundamental => "Fundamental",
            Self::Market => "Market",
        }
    }
}

/// Metadata about a field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldInfo {
    /// The field
    pub field: Field,

    /// Category classification
    pub category: FieldCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Whether a return feature is derived from the field
    pub has_return: bool,

    /// Whether only the price stage reads the field
    pub price_stage_only: bool,
}

const fn info(field: Field, category: FieldCategory, description: &'static str) -> FieldInfo {
    let price_stage_only = matches!(
        field,
        Field::TotalAsset
            | Field::QuarterlyAssetGrowth
            | Field::CashFlowPerShare
            | Field::RiskFreeRate
            | Field::SmoothAssetGrowth
            | Field::ClosePrice
    );
    FieldInfo {
        field,
        category,
        description,
        has_return: !price_stage_only,
        price_stage_only,
    }
}

/// Get information about all input fields, in wire order.
#[must_use]
pub fn available_fields() -> Vec<FieldInfo> {
    use FieldCategory::{Fundamental, Macro, Market, Sentiment, Valuation};

    vec![
        info(Field::Ttm, Valuation, "Trailing-twelve-month valuation ratio"),
        info(Field::Pe, Valuation, "Price to earnings"),
        info(Field::Pb, Valuation, "Price to book"),
        info(Field::Pcf, Valuation, "Price to cash flow"),
        info(Field::BaiduIndex, Sentiment, "Baidu search index"),
        info(Field::WeiboCnsenti, Sentiment, "Weibo sentiment (cnsenti lexicon)"),
        info(Field::WeiboDictionary, Sentiment, "Weibo sentiment (dictionary method)"),
        info(Field::MarketGdp, Macro, "Regional GDP"),
        info(Field::MarketPopulation, Macro, "Regional population"),
        info(Field::MarketSalary, Macro, "Regional average salary"),
        info(Field::TotalAsset, Fundamental, "Total assets"),
        info(Field::QuarterlyAssetGrowth, Fundamental, "Quarter-over-quarter asset growth"),
        info(Field::CashFlowPerShare, Fundamental, "Per-share cash flow, the DCF base"),
        info(Field::RiskFreeRate, Market, "Quarterly risk-free rate"),
        info(Field::SmoothAssetGrowth, Fundamental, "Smoothed asset growth, the DCF growth rate"),
        info(Field::ClosePrice, Market, "Period close price, the price-stage label source"),
    ]
}

/// Get all fields in a specific category.
#[must_use]
pub fn fields_by_category(category: FieldCategory) -> Vec<FieldInfo> {
    available_fields()
        .into_iter()
        .filter(|info| info.category == category)
        .collect()
}

/// Get information about a field by wire name.
#[must_use]
pub fn get_field_info(name: &str) -> Option<FieldInfo> {
    available_fields()
        .into_iter()
        .find(|info| info.field.wire_name() == name)
}
