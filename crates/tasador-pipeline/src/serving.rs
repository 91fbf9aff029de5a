//! Serving: one price forecast per stock from its latest period.

use tracing::{debug, info};

use crate::composer::{CompositeRow, CompositeTable};
use crate::config::ServingConfig;
use crate::output::FinalPrediction;
use crate::stage2::PriceModel;
use tasador_traits::Result;

/// The latest row of every stock not on the exclusion list.
pub fn latest_rows<'t>(table: &'t CompositeTable, config: &ServingConfig) -> Vec<&'t CompositeRow> {
    table
        .groups()
        .iter()
        .filter(|group| {
            let excluded = config.is_excluded(group.stock_id);
            if excluded {
                debug!(stock_id = group.stock_id, "stock is excluded from serving");
            }
            !excluded
        })
        .filter_map(|group| group.rows.last())
        .collect()
}

/// Predicts the next close of each stock's latest period.
#[derive(Debug, Clone, Copy)]
pub struct ServingExtractor<'a> {
    model: &'a PriceModel,
    config: &'a ServingConfig,
}

impl<'a> ServingExtractor<'a> {
    /// Create an extractor over a fitted price model.
    pub const fn new(model: &'a PriceModel, config: &'a ServingConfig) -> Self {
        Self { model, config }
    }

    /// One prediction per served stock, in ascending stock id.
    ///
    /// Missing components of a latest row reach the model as NaN and follow
    /// each tree's default branch.
    ///
    /// # Errors
    ///
    /// Propagates a prediction error.
    pub fn extract(&self, table: &CompositeTable) -> Result<Vec<FinalPrediction>> {
        let mut predictions = Vec::new();

        for row in latest_rows(table, self.config) {
            let features = row.serving_features();
            let missing = features.iter().filter(|v| v.is_nan()).count();
            if missing > 0 {
                debug!(
                    stock_id = row.stock_id(),
                    date = %row.date(),
                    missing,
                    "serving latest period with missing features"
                );
            }

            predictions.push(FinalPrediction {
                stock_id: row.stock_id(),
                date: row.date(),
                label: self.model.predict(&features)?,
            });
        }

        info!(stocks = predictions.len(), "served final predictions");
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::Composer;
    use crate::fixtures;
    use crate::stage1::FactorTrainer;
    use crate::stage2::PriceTrainer;
    use tasador_features::derive_returns;
    use tasador_models::BoostingConfig;
    use tasador_traits::{Field, StockPanel, StockPeriodRecord};

    fn serve(panel: &StockPanel, config: &ServingConfig) -> Vec<FinalPrediction> {
        let factors = FactorTrainer::default().train(&derive_returns(panel)).unwrap();
        let table = Composer::new(&factors).compose(panel).unwrap();
        let price = PriceTrainer::new(BoostingConfig {
            n_rounds: 50,
            ..Default::default()
        })
        .train(&table)
        .unwrap();
        ServingExtractor::new(&price, config).extract(&table).unwrap()
    }

    #[test]
    fn test_latest_rows_skip_excluded_stock() {
        let panel = fixtures::panel(&[1, 9961, 2], 4);
        let factors = FactorTrainer::default().train(&derive_returns(&panel)).unwrap();
        let table = Composer::new(&factors).compose(&panel).unwrap();

        let rows = latest_rows(&table, &ServingConfig::default());
        let stocks: Vec<_> = rows.iter().map(|r| r.stock_id()).collect();
        assert_eq!(stocks, vec![1, 2]);
        assert!(rows.iter().all(|r| r.date() == fixtures::quarter_end(3)));

        let rows = latest_rows(&table, &ServingConfig { excluded_stocks: vec![] });
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_one_prediction_per_served_stock() {
        let panel = fixtures::panel(&[3, 9961, 1, 2], 6);
        let predictions = serve(&panel, &ServingConfig::default());

        let stocks: Vec<_> = predictions.iter().map(|p| p.stock_id).collect();
        assert_eq!(stocks, vec![1, 2, 3]);
        for prediction in &predictions {
            assert_eq!(prediction.date, fixtures::quarter_end(5));
            assert!(prediction.label.is_finite());
        }
    }

    #[test]
    fn test_incomplete_latest_rows_are_served() {
        let mut records: Vec<StockPeriodRecord> = fixtures::panel(&[1, 2, 4], 6).records().cloned().collect();
        let last_of_stock_2 = 2 * 6 - 1;
        records[last_of_stock_2].set(Field::CashFlowPerShare, None);
        let last_of_stock_4 = records.len() - 1;
        records[last_of_stock_4].set(Field::BaiduIndex, None);
        // a stock with a single period has no returns and no factor forecasts
        records.push(fixtures::record(3, 0));
        let panel = StockPanel::from_records(records);

        let predictions = serve(&panel, &ServingConfig::default());
        let stocks: Vec<_> = predictions.iter().map(|p| p.stock_id).collect();
        assert_eq!(stocks, vec![1, 2, 3, 4]);
        assert!(predictions.iter().all(|p| p.label.is_finite()));
        assert_eq!(predictions[2].date, fixtures::quarter_end(0));
    }

    #[test]
    fn test_configured_exclusions() {
        let panel = fixtures::panel(&[1, 2, 9961], 5);
        let config = ServingConfig {
            excluded_stocks: vec![2],
        };
        let stocks: Vec<_> = serve(&panel, &config).iter().map(|p| p.stock_id).collect();
        assert_eq!(stocks, vec![1, 9961]);
    }
}
