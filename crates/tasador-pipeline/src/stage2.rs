//! Price stage: next-period close price from the composite table.

use ndarray::ArrayView1;
use tasador_eval::FitMetrics;
use tasador_models::{BoostingConfig, GradientBoostingRegressor};
use tasador_traits::{Regressor, Result, TasadorError};
use tracing::info;

use crate::composer::CompositeTable;

/// The fitted price model.
#[derive(Debug, Clone)]
pub struct PriceModel {
    model: GradientBoostingRegressor,
    metrics: FitMetrics,
}

impl PriceModel {
    /// In-sample fit of the model.
    pub const fn metrics(&self) -> &FitMetrics {
        &self.metrics
    }

    /// Forecast from a price-stage feature vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector width does not match training.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        self.model.predict_one(ArrayView1::from(features))
    }
}

/// Trains the price model.
#[derive(Debug, Clone, Default)]
pub struct PriceTrainer {
    config: BoostingConfig,
}

impl PriceTrainer {
    /// Create a trainer with the given boosting configuration.
    pub const fn new(config: BoostingConfig) -> Self {
        Self { config }
    }

    /// Fit on every complete, labelled row of the table.
    ///
    /// # Errors
    ///
    /// Returns [`TasadorError::InsufficientData`] if no row qualifies, or
    /// propagates a fitting error.
    pub fn train(&self, table: &CompositeTable) -> Result<PriceModel> {
        let data = table.training_set()?;
        if data.is_empty() {
            return Err(TasadorError::InsufficientData(
                "no complete labelled rows to train the price model".into(),
            ));
        }

        let mut model = GradientBoostingRegressor::new(self.config.clone());
        model.fit(&data)?;

        let fitted = model.predict(data.features())?;
        let metrics = FitMetrics::calculate(&data.labels().to_vec(), &fitted.to_vec());
        info!(
            r2 = metrics.r2,
            rmse = metrics.rmse,
            n_obs = metrics.n_obs,
            dropped = table.len() - data.n_samples(),
            "fitted price model"
        );

        Ok(PriceModel { model, metrics })
    }
}
