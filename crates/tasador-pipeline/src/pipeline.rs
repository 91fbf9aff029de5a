//! End-to-end run: factor stage, composition, price stage, serving.

use tasador_features::derive_returns;
use tasador_traits::{Result, StockPanel, TasadorError};
use tracing::{info, warn};

use crate::composer::Composer;
use crate::config::PipelineConfig;
use crate::output::{PipelineOutput, factor_predictions};
use crate::serving::ServingExtractor;
use crate::stage1::FactorTrainer;
use crate::stage2::PriceTrainer;

/// Stocks with fewer periods than this never yield a return feature.
const MIN_PERIODS: usize = 2;

/// The two-stage valuation pipeline.
///
/// Every run retrains both stages from scratch on the given panel.
///
/// # Examples
///
/// ```rust,no_run
/// use tasador_pipeline::{Pipeline, PipelineConfig};
/// use tasador_traits::StockPanel;
///
/// let panel = StockPanel::default();
/// let pipeline = Pipeline::new(PipelineConfig::default());
/// assert!(pipeline.run(&panel).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the given configuration.
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Train both stages on `panel` and predict.
    ///
    /// # Errors
    ///
    /// - [`TasadorError::EmptyInput`] if the panel has no records
    /// - [`TasadorError::InsufficientData`] if a stage has no training rows
    /// - [`TasadorError::MissingColumn`] if a price-stage field is absent
    pub fn run(&self, panel: &StockPanel) -> Result<PipelineOutput> {
        if panel.is_empty() {
            return Err(TasadorError::EmptyInput);
        }
        info!(records = panel.len(), stocks = panel.n_stocks(), "starting pipeline run");

        let degenerate = panel
            .groups()
            .filter(|(_, records)| records.len() < MIN_PERIODS)
            .count();
        if degenerate > 0 {
            warn!(stocks = degenerate, "stocks with a single period are left out of training");
        }

        let groups = derive_returns(panel);
        let factors = FactorTrainer::new(self.config.factor.clone()).train(&groups)?;

        let table = Composer::new(&factors).compose(panel)?;
        let price = PriceTrainer::new(self.config.price.clone()).train(&table)?;

        let final_predictions = ServingExtractor::new(&price, &self.config.serving).extract(&table)?;
        let factor_predictions = factor_predictions(&table);

        info!(
            final_predictions = final_predictions.len(),
            factor_predictions = factor_predictions.len(),
            "pipeline run complete"
        );

        Ok(PipelineOutput {
            final_predictions,
            factor_predictions,
        })
    }
}
