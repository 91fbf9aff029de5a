//! Price-stage table assembly.
//!
//! The composer starts again from the raw panel, adds the discounted cash
//! flow estimate and return features, labels each row with the next
//! period's close price, and appends the four factor forecasts.

use tasador_features::{EngineeredRow, derive_returns, next_period, record_dcf};
use tasador_traits::{Dataset, Date, Field, Result, StockId, StockPanel};
use tracing::{debug, info};

use crate::stage1::{FactorModels, N_FACTORS};

/// Name of the discounted cash flow column.
pub const DCF_COLUMN: &str = "dcf";

/// Names of the appended factor forecast columns.
pub const FACTOR_COLUMNS: [&str; N_FACTORS] = ["y0", "y1", "y2", "y3"];

/// Number of price-stage features.
pub const N_PRICE_FEATURES: usize = Field::BASE.len() * 2 + Field::STAGE2.len() + 1 + N_FACTORS;

/// One row of the price-stage table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRow {
    /// Record and its return features.
    pub engineered: EngineeredRow,
    /// Discounted cash flow estimate.
    pub dcf: Option<f64>,
    /// Next-period close price.
    pub label: Option<f64>,
    /// Factor forecasts, present when the factor features are complete.
    pub factors: Option<[f64; N_FACTORS]>,
}

impl CompositeRow {
    /// Stock identifier.
    pub const fn stock_id(&self) -> StockId {
        self.engineered.stock_id()
    }

    /// Period date.
    pub const fn date(&self) -> Date {
        self.engineered.date()
    }

    /// Price-stage feature vector, one entry per [`price_feature_names`].
    ///
    /// Order: base levels, price-stage raw levels, dcf, base returns, then
    /// the four factor forecasts.
    pub fn price_features(&self) -> Vec<Option<f64>> {
        let record = &self.engineered.record;
        let factors = self.factors.map_or([None; N_FACTORS], |f| f.map(Some));

        Field::BASE
            .iter()
            .chain(Field::STAGE2.iter())
            .map(|f| record.value(*f))
            .chain(std::iter::once(self.dcf))
            .chain(self.engineered.returns.iter().copied())
            .chain(factors)
            .collect()
    }

    /// Price-stage features, `None` unless every component is present.
    pub fn complete_price_features(&self) -> Option<Vec<f64>> {
        self.price_features().into_iter().collect()
    }

    /// Price-stage features with missing components as NaN.
    pub fn serving_features(&self) -> Vec<f64> {
        self.price_features()
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect()
    }
}

/// Names of [`CompositeRow::price_features`] in column order.
#[must_use]
pub fn price_feature_names() -> Vec<String> {
    Field::BASE
        .iter()
        .chain(Field::STAGE2.iter())
        .map(|f| f.wire_name().to_string())
        .chain(std::iter::once(DCF_COLUMN.to_string()))
        .chain(Field::BASE.iter().map(|f| f.return_name()))
        .chain(FACTOR_COLUMNS.iter().map(|c| (*c).to_string()))
        .collect()
}

/// One stock's composite rows in date order.
#[derive(Debug, Clone)]
pub struct CompositeGroup {
    /// Stock identifier.
    pub stock_id: StockId,
    /// Rows in date order.
    pub rows: Vec<CompositeRow>,
}

/// The price-stage table, grouped by ascending stock id.
///
/// Rows with missing values are kept; filtering happens where the table is
/// consumed.
#[derive(Debug, Clone, Default)]
pub struct CompositeTable {
    groups: Vec<CompositeGroup>,
}

impl CompositeTable {
    /// Groups in ascending stock id.
    pub fn groups(&self) -> &[CompositeGroup] {
        &self.groups
    }

    /// All rows, stock by stock.
    pub fn rows(&self) -> impl Iterator<Item = &CompositeRow> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Training table: every row with a complete feature vector and a label.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be assembled.
    pub fn training_set(&self) -> Result<Dataset> {
        let (features, labels): (Vec<Vec<f64>>, Vec<f64>) = self
            .rows()
            .filter_map(|row| Some((row.complete_price_features()?, row.label?)))
            .unzip();
        Dataset::from_rows(features, labels, price_feature_names())
    }
}

/// Builds the price-stage table from a panel and fitted factor models.
#[derive(Debug, Clone, Copy)]
pub struct Composer<'a> {
    factors: &'a FactorModels,
}

impl<'a> Composer<'a> {
    /// Create a composer over fitted factor models.
    pub const fn new(factors: &'a FactorModels) -> Self {
        Self { factors }
    }

    /// Compose the price-stage table.
    ///
    /// # Errors
    ///
    /// Returns [`TasadorError::MissingColumn`](tasador_traits::TasadorError::MissingColumn)
    /// if a price-stage field is absent from the batch,
    /// [`TasadorError::ModelUnavailable`](tasador_traits::TasadorError::ModelUnavailable)
    /// if a factor model is unfitted, or a prediction error.
    pub fn compose(&self, panel: &StockPanel) -> Result<CompositeTable> {
        panel.require_fields(&Field::STAGE2)?;
        self.factors.ensure_fitted()?;

        let mut groups = Vec::with_capacity(panel.n_stocks());
        let mut forecast_rows = 0usize;

        for group in derive_returns(panel) {
            let labels = next_period(&group.rows, |row| row.record.value(Field::ClosePrice));
            let mut rows = Vec::with_capacity(group.rows.len());

            for (engineered, label) in group.rows.into_iter().zip(labels) {
                let factors = engineered
                    .factor_features()
                    .map(|features| self.factors.predict(&features))
                    .transpose()?;
                forecast_rows += usize::from(factors.is_some());

                rows.push(CompositeRow {
                    dcf: record_dcf(&engineered.record),
                    engineered,
                    label,
                    factors,
                });
            }

            debug!(stock_id = group.stock_id, rows = rows.len(), "composed stock");
            groups.push(CompositeGroup {
                stock_id: group.stock_id,
                rows,
            });
        }

        let table = CompositeTable { groups };
        info!(rows = table.len(), forecast_rows, "composed price-stage table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage1::FactorTrainer;
    use approx::assert_relative_eq;
    use tasador_traits::{StockPeriodRecord, TasadorError};

    fn record(stock: StockId, period: u32) -> StockPeriodRecord {
        let year = 2010 + i32::try_from(period).unwrap();
        let mut record = StockPeriodRecord::new(stock, Date::from_ymd_opt(year, 6, 30).unwrap());
        let p = f64::from(period);
        for (i, field) in Field::BASE.into_iter().enumerate() {
            record.set(field, Some(1.0 + i as f64 + 0.5 * p + stock as f64));
        }
        record
            .with(Field::TotalAsset, 100.0 + p)
            .with(Field::QuarterlyAssetGrowth, 0.01)
            .with(Field::CashFlowPerShare, 1.0)
            .with(Field::RiskFreeRate, 0.0)
            .with(Field::SmoothAssetGrowth, 0.0)
            .with(Field::ClosePrice, 10.0 + p)
    }

    fn panel() -> StockPanel {
        let records = [1, 2]
            .into_iter()
            .flat_map(|stock| (0..4).map(move |p| record(stock, p)))
            .collect();
        StockPanel::from_records(records)
    }

    fn factors(panel: &StockPanel) -> FactorModels {
        FactorTrainer::default().train(&derive_returns(panel)).unwrap()
    }

    #[test]
    fn test_feature_names_and_width() {
        let names = price_feature_names();
        assert_eq!(names.len(), N_PRICE_FEATURES);
        assert_eq!(N_PRICE_FEATURES, 31);
        assert_eq!(names[10], "total_asset");
        assert_eq!(names[15], "close_price");
        assert_eq!(names[16], "dcf");
        assert_eq!(names[17], "TTM_r");
        assert_eq!(names[27], "y0");
        assert_eq!(names[30], "y3");
    }

    #[test]
    fn test_compose_labels_dcf_and_factors() {
        let panel = panel();
        let models = factors(&panel);
        let table = Composer::new(&models).compose(&panel).unwrap();

        assert_eq!(table.len(), 8);
        assert_eq!(table.groups().len(), 2);

        for group in table.groups() {
            let rows = &group.rows;
            // next close on every row but the last
            assert_relative_eq!(rows[0].label.unwrap(), 11.0);
            assert_relative_eq!(rows[2].label.unwrap(), 13.0);
            assert_eq!(rows[3].label, None);

            for row in rows {
                assert_relative_eq!(row.dcf.unwrap(), 20.0);
            }

            // first row has no returns, hence no factor forecasts
            assert!(rows[0].factors.is_none());
            assert!(rows[0].complete_price_features().is_none());
            assert!(rows[0].serving_features()[N_PRICE_FEATURES - 1].is_nan());
            assert!(rows[1..].iter().all(|r| r.factors.is_some()));

            let features = rows[3].complete_price_features().unwrap();
            assert_eq!(features.len(), N_PRICE_FEATURES);
            assert_relative_eq!(features[15], 13.0);
            assert_relative_eq!(features[16], 20.0);
        }
    }

    #[test]
    fn test_training_set_keeps_complete_labelled_rows() {
        let panel = panel();
        let models = factors(&panel);
        let table = Composer::new(&models).compose(&panel).unwrap();
        let data = table.training_set().unwrap();
        // rows 1 and 2 of each stock
        assert_eq!(data.n_samples(), 4);
        assert_eq!(data.n_features(), 31);
    }

    #[test]
    fn test_missing_price_stage_column_is_fatal() {
        let full = panel();
        let models = factors(&full);

        let records: Vec<StockPeriodRecord> = full.records().cloned().collect();
        let columns: Vec<&str> = full.columns().filter(|c| *c != "rfr").collect();
        let partial = StockPanel::new(records, columns);

        let err = Composer::new(&models).compose(&partial).unwrap_err();
        assert!(matches!(err, TasadorError::MissingColumn(ref c) if c == "rfr"));
    }

    #[test]
    fn test_missing_dcf_input_leaves_row_incomplete() {
        let mut records: Vec<StockPeriodRecord> = panel().records().cloned().collect();
        records[2].set(Field::RiskFreeRate, None);
        let panel = StockPanel::from_records(records);
        let models = factors(&panel);
        let table = Composer::new(&models).compose(&panel).unwrap();

        let row = &table.groups()[0].rows[2];
        assert_eq!(row.dcf, None);
        assert!(row.factors.is_some());
        assert!(row.complete_price_features().is_none());
        assert!(row.serving_features()[16].is_nan());
    }
}
