//! Common types used throughout the Tasador pipeline.
//!
//! This module defines the per-stock, per-period observation and the panel
//! that groups those observations by stock in date order.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::field::{DATE_COLUMN, Field, STOCK_ID_COLUMN};
use crate::{Result, TasadorError};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A stock identifier as delivered by the data provider.
pub type StockId = i64;

/// Parse a period date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, or an ISO-8601 date-time whose date
/// part is used.
///
/// # Errors
///
/// Returns [`TasadorError::InvalidDate`] if none of the formats match.
pub fn parse_date(raw: &str) -> Result<Date> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);

    Date::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| Date::parse_from_str(date_part, "%Y/%m/%d"))
        .map_err(|e| TasadorError::InvalidDate(format!("{raw:?}: {e}")))
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

/// One observation for one stock at one date.
///
/// Numeric fields are optional: a record may carry `null` for a field or omit
/// it entirely, and both are treated as a missing value downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPeriodRecord {
    /// Stock identifier.
    #[serde(rename = "stockid")]
    pub stock_id: StockId,

    /// Period date.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: Date,

    /// Trailing-twelve-month valuation ratio.
    #[serde(rename = "TTM", default)]
    pub ttm: Option<f64>,
    /// Price to earnings.
    #[serde(rename = "PE", default)]
    pub pe: Option<f64>,
    /// Price to book.
    #[serde(rename = "PB", default)]
    pub pb: Option<f64>,
    /// Price to cash flow.
    #[serde(rename = "PCF", default)]
    pub pcf: Option<f64>,

    /// Search interest index.
    #[serde(rename = "baiduindex", default)]
    pub baidu_index: Option<f64>,
    /// Social sentiment (cnsenti).
    #[serde(default)]
    pub weibo_cnsenti: Option<f64>,
    /// Social sentiment (dictionary).
    #[serde(default)]
    pub weibo_dictionary: Option<f64>,

    /// Regional GDP.
    #[serde(rename = "marketGDP", default)]
    pub market_gdp: Option<f64>,
    /// Regional population.
    #[serde(rename = "marketpopulation", default)]
    pub market_population: Option<f64>,
    /// Regional average salary.
    #[serde(rename = "marketaslary", default)]
    pub market_salary: Option<f64>,

    /// Total assets.
    #[serde(default)]
    pub total_asset: Option<f64>,
    /// Quarter-over-quarter asset growth.
    #[serde(default)]
    pub quarterly_asset_growth: Option<f64>,
    /// Per-share cash flow.
    #[serde(rename = "cash_flow_perhold_processed", default)]
    pub cash_flow_per_share: Option<f64>,
    /// Quarterly risk-free rate.
    #[serde(rename = "rfr", default)]
    pub risk_free_rate: Option<f64>,
    /// Smoothed asset growth.
    #[serde(default)]
    pub smooth_asset_growth: Option<f64>,
    /// Close price.
    #[serde(default)]
    pub close_price: Option<f64>,
}

impl StockPeriodRecord {
    /// Creates a record with every numeric field missing.
    #[must_use]
    pub const fn new(stock_id: StockId, date: Date) -> Self {
        Self {
            stock_id,
            date,
            ttm: None,
            pe: None,
            pb: None,
            pcf: None,
            baidu_index: None,
            weibo_cnsenti: None,
            weibo_dictionary: None,
            market_gdp: None,
            market_population: None,
            market_salary: None,
            total_asset: None,
            quarterly_asset_growth: None,
            cash_flow_per_share: None,
            risk_free_rate: None,
            smooth_asset_growth: None,
            close_price: None,
        }
    }

    /// Returns the value of a field, `None` when missing.
    #[must_use]
    pub const fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Ttm => self.ttm,
            Field::Pe => self.pe,
            Field::Pb => self.pb,
            Field::Pcf => self.pcf,
            Field::BaiduIndex => self.baidu_index,
            Field::WeiboCnsenti => self.weibo_cnsenti,
            Field::WeiboDictionary => self.weibo_dictionary,
            Field::MarketGdp => self.market_gdp,
            Field::MarketPopulation => self.market_population,
            Field::MarketSalary => self.market_salary,
            Field::TotalAsset => self.total_asset,
            Field::QuarterlyAssetGrowth => self.quarterly_asset_growth,
            Field::CashFlowPerShare => self.cash_flow_per_share,
            Field::RiskFreeRate => self.risk_free_rate,
            Field::SmoothAssetGrowth => self.smooth_asset_growth,
            Field::ClosePrice => self.close_price,
        }
    }

    /// Sets the value of a field.
    pub fn set(&mut self, field: Field, value: Option<f64>) {
        let slot = match field {
            Field::Ttm => &mut self.ttm,
            Field::Pe => &mut self.pe,
            Field::Pb => &mut self.pb,
            Field::Pcf => &mut self.pcf,
            Field::BaiduIndex => &mut self.baidu_index,
            Field::WeiboCnsenti => &mut self.weibo_cnsenti,
            Field::WeiboDictionary => &mut self.weibo_dictionary,
            Field::MarketGdp => &mut self.market_gdp,
            Field::MarketPopulation => &mut self.market_population,
            Field::MarketSalary => &mut self.market_salary,
            Field::TotalAsset => &mut self.total_asset,
            Field::QuarterlyAssetGrowth => &mut self.quarterly_asset_growth,
            Field::CashFlowPerShare => &mut self.cash_flow_per_share,
            Field::RiskFreeRate => &mut self.risk_free_rate,
            Field::SmoothAssetGrowth => &mut self.smooth_asset_growth,
            Field::ClosePrice => &mut self.close_price,
        };
        *slot = value;
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }
}

/// Stock-period records grouped by stock, each group in date order.
///
/// Groups iterate in ascending stock id. Within a group, records are stably
/// sorted by date, so records sharing a date keep their input order. Values
/// are never mixed across groups.
///
/// The panel also remembers which columns the batch carried. A column is
/// present when at least one input record had the key, which lets later
/// stages tell an absent column apart from sporadic missing values.
#[derive(Debug, Clone, Default)]
pub struct StockPanel {
    groups: BTreeMap<StockId, Vec<StockPeriodRecord>>,
    columns: BTreeSet<String>,
}

impl StockPanel {
    /// Creates a panel from records and the set of columns the batch carried.
    pub fn new<I, S>(records: Vec<StockPeriodRecord>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups: BTreeMap<StockId, Vec<StockPeriodRecord>> = BTreeMap::new();
        for record in records {
            groups.entry(record.stock_id).or_default().push(record);
        }
        for group in groups.values_mut() {
            group.sort_by_key(|r| r.date);
        }

        Self {
            groups,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a panel whose batch is assumed to carry every known column.
    pub fn from_records(records: Vec<StockPeriodRecord>) -> Self {
        let columns = [STOCK_ID_COLUMN, DATE_COLUMN]
            .into_iter()
            .chain(Field::ALL.into_iter().map(Field::wire_name));
        Self::new(records, columns)
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns whether the panel holds no records.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct stocks.
    pub fn n_stocks(&self) -> usize {
        self.groups.len()
    }

    /// Iterates over `(stock id, records in date order)`.
    pub fn groups(&self) -> impl Iterator<Item = (StockId, &[StockPeriodRecord])> {
        self.groups.iter().map(|(id, rows)| (*id, rows.as_slice()))
    }

    /// Records of one stock in date order.
    pub fn group(&self, stock_id: StockId) -> Option<&[StockPeriodRecord]> {
        self.groups.get(&stock_id).map(Vec::as_slice)
    }

    /// Iterates over all records, stock by stock.
    pub fn records(&self) -> impl Iterator<Item = &StockPeriodRecord> {
        self.groups.values().flatten()
    }

    /// Columns the input batch carried.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Checks if a column was present in the input batch.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Fails with [`TasadorError::MissingColumn`] naming every absent field.
    ///
    /// # Errors
    ///
    /// Returns an error if any of `fields` was not present in the batch.
    pub fn require_fields(&self, fields: &[Field]) -> Result<()> {
        let missing: Vec<&str> = fields
            .iter()
            .map(|f| f.wire_name())
            .filter(|name| !self.has_column(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(TasadorError::MissingColumn(missing.join(", ")))
        }
    }
}
