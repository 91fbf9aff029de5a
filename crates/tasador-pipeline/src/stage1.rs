//! Factor stage: next-period forecasts of the four valuation ratios.
//!
//! One random forest is fitted per target on the shared engineered feature
//! vector (base levels then base returns). A row trains a target when its
//! feature vector is complete and the next period of the same stock carries
//! the target value.

use ndarray::ArrayView1;
use tasador_eval::FitMetrics;
use tasador_features::{EngineeredGroup, factor_feature_names, next_period};
use tasador_models::{ForestConfig, RandomForest};
use tasador_traits::{Dataset, Field, Regressor, Result, TasadorError};
use tracing::info;

/// Number of factor models, one per entry of [`Field::TARGETS`].
pub const N_FACTORS: usize = Field::TARGETS.len();

/// A fitted forecaster of one valuation ratio.
#[derive(Debug, Clone)]
pub struct FactorModel {
    target: Field,
    model: RandomForest,
    metrics: FitMetrics,
}

impl FactorModel {
    /// The ratio this model forecasts.
    pub const fn target(&self) -> Field {
        self.target
    }

    /// In-sample fit of the model.
    pub const fn metrics(&self) -> &FitMetrics {
        &self.metrics
    }

    /// Whether the underlying forest is fitted.
    pub fn is_fitted(&self) -> bool {
        self.model.is_fitted()
    }

    /// Forecast from a factor feature vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector width does not match training.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        self.model.predict_one(ArrayView1::from(features))
    }
}

/// The four factor models in [`Field::TARGETS`] order.
#[derive(Debug, Clone)]
pub struct FactorModels {
    models: [FactorModel; N_FACTORS],
}

impl FactorModels {
    /// Model at a target index (0 = TTM, 1 = PE, 2 = PB, 3 = PCF).
    pub fn get(&self, index: usize) -> Option<&FactorModel> {
        self.models.get(index)
    }

    /// Model for a target field.
    pub fn for_target(&self, target: Field) -> Option<&FactorModel> {
        self.models.iter().find(|m| m.target == target)
    }

    /// Iterates over the models in target order.
    pub fn iter(&self) -> impl Iterator<Item = &FactorModel> {
        self.models.iter()
    }

    /// Fails unless every model is fitted.
    ///
    /// # Errors
    ///
    /// Returns [`TasadorError::ModelUnavailable`] naming the first unfitted
    /// target.
    pub fn ensure_fitted(&self) -> Result<()> {
        match self.models.iter().find(|m| !m.is_fitted()) {
            Some(m) => Err(TasadorError::ModelUnavailable(format!(
                "factor model for {} is not fitted",
                m.target
            ))),
            None => Ok(()),
        }
    }

    /// Forecasts all four ratios from one factor feature vector.
    ///
    /// # Errors
    ///
    /// Propagates the first model error.
    pub fn predict(&self, features: &[f64]) -> Result<[f64; N_FACTORS]> {
        let mut forecasts = [0.0; N_FACTORS];
        for (slot, model) in forecasts.iter_mut().zip(&self.models) {
            *slot = model.predict(features)?;
        }
        Ok(forecasts)
    }
}

/// Trains the factor models.
#[derive(Debug, Clone, Default)]
pub struct FactorTrainer {
    config: ForestConfig,
}

impl FactorTrainer {
    /// Create a trainer with the given forest configuration.
    pub const fn new(config: ForestConfig) -> Self {
        Self { config }
    }

    /// Training table for one target.
    ///
    /// Each stock contributes its rows that have a complete feature vector
    /// and a next-period target value. The last row of a stock never has a
    /// label and the first never has returns, so a stock needs at least
    /// three periods before it contributes a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be assembled.
    pub fn training_set(groups: &[EngineeredGroup], target: Field) -> Result<Dataset> {
        let mut features = Vec::new();
        let mut labels = Vec::new();

        for group in groups {
            let next = next_period(&group.rows, |row| row.record.value(target));
            for (row, label) in group.rows.iter().zip(next) {
                if let (Some(x), Some(y)) = (row.factor_features(), label) {
                    features.push(x);
                    labels.push(y);
                }
            }
        }

        Dataset::from_rows(features, labels, factor_feature_names())
    }

    /// Fits one forest per target, in target order, stopping at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`TasadorError::InsufficientData`] if a target has no training
    /// rows, or propagates a fitting error.
    pub fn train(&self, groups: &[EngineeredGroup]) -> Result<FactorModels> {
        let [ttm, pe, pb, pcf] = Field::TARGETS;
        Ok(FactorModels {
            models: [
                self.train_one(groups, ttm)?,
                self.train_one(groups, pe)?,
                self.train_one(groups, pb)?,
                self.train_one(groups, pcf)?,
            ],
        })
    }

    fn train_one(&self, groups: &[EngineeredGroup], target: Field) -> Result<FactorModel> {
        let data = Self::training_set(groups, target)?;
        if data.is_empty() {
            return Err(TasadorError::InsufficientData(format!(
                "no stock has enough complete periods to train the {target} model"
            )));
        }

        let mut model = RandomForest::new(self.config.clone());
        model.fit(&data)?;

        let fitted = model.predict(data.features())?;
        let metrics = FitMetrics::calculate(&data.labels().to_vec(), &fitted.to_vec());
        info!(
            target = %target,
            r2 = metrics.r2,
            rmse = metrics.rmse,
            n_obs = metrics.n_obs,
            "fitted factor model"
        );

        Ok(FactorModel {
            target,
            model,
            metrics,
        })
    }
}
