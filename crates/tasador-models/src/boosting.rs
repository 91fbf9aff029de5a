//! Gradient boosted regression trees.
//!
//! Each round fits a depth-limited tree to the current residuals on a row
//! subsample and adds its shrunken prediction to the ensemble. The starting
//! prediction is the label mean.

use ndarray::ArrayView1;
use rand::SeedableRng;
use rand::seq::index::sample;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tasador_traits::{Dataset, Regressor, Result, TasadorError, regressor::check_width};
use tracing::{debug, trace};

use crate::tree::{RegressionTree, TreeConfig};

/// Configuration for gradient boosting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostingConfig {
    /// Number of boosting rounds
    pub n_rounds: usize,
    /// Shrinkage applied to every tree
    pub learning_rate: f64,
    /// Fraction of rows sampled without replacement each round
    pub subsample: f64,
    /// Fraction of feature columns each tree may use
    pub colsample: f64,
    /// Growth rules for every tree
    pub tree: TreeConfig,
    /// Seed for the row and column samples
    pub seed: u64,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            n_rounds: 1000,
            learning_rate: 0.08,
            subsample: 0.75,
            colsample: 1.0,
            tree: TreeConfig {
                max_depth: Some(7),
                lambda: 1.0,
                min_split_gain: 0.0,
                ..TreeConfig::default()
            },
            seed: 0,
        }
    }
}

impl BoostingConfig {
    fn validate(&self) -> Result<()> {
        if self.n_rounds == 0 {
            return Err(TasadorError::InvalidData("boosting needs at least one round".into()));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(TasadorError::InvalidData(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        for (name, fraction) in [("subsample", self.subsample), ("colsample", self.colsample)] {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(TasadorError::InvalidData(format!(
                    "{name} must lie in (0, 1], got {fraction}"
                )));
            }
        }
        Ok(())
    }
}

/// Number of items kept when sampling `fraction` of `n`, at least one.
fn sample_size(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction).round() as usize).clamp(1, n)
}

/// Gradient boosted tree ensemble for squared error.
#[derive(Debug, Clone)]
pub struct GradientBoostingRegressor {
    config: BoostingConfig,
    base: f64,
    trees: Vec<RegressionTree>,
    n_features: Option<usize>,
}

impl GradientBoostingRegressor {
    /// Create a new, unfitted ensemble.
    pub const fn new(config: BoostingConfig) -> Self {
        Self {
            config,
            base: 0.0,
            trees: Vec::new(),
            n_features: None,
        }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &BoostingConfig {
        &self.config
    }

    /// Number of fitted rounds.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn raw_predict(&self, features: ArrayView1<'_, f64>) -> f64 {
        let boost: f64 = self.trees.iter().map(|tree| tree.predict_one(features)).sum();
        self.base + self.config.learning_rate * boost
    }
}

impl Default for GradientBoostingRegressor {
    fn default() -> Self {
        Self::new(BoostingConfig::default())
    }
}

impl Regressor for GradientBoostingRegressor {
    fn name(&self) -> &str {
        "gradient_boosting"
    }

    fn fit(&mut self, data: &Dataset) -> Result<()> {
        self.config.validate()?;
        if data.is_empty() {
            return Err(TasadorError::InsufficientData(
                "gradient boosting needs at least one sample".into(),
            ));
        }

        let n = data.n_samples();
        let n_cols = data.n_features();
        let features = data.features();
        let labels = data.labels();

        let base = labels.sum() / n as f64;
        let mut predictions = vec![base; n];
        let mut residuals = vec![0.0; n];
        let mut trees = Vec::with_capacity(self.config.n_rounds);
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        let n_rows = sample_size(n, self.config.subsample);
        let n_candidates = if n_cols == 0 {
            0
        } else {
            sample_size(n_cols, self.config.colsample)
        };

        for round in 0..self.config.n_rounds {
            for ((r, y), p) in residuals.iter_mut().zip(labels).zip(&predictions) {
                *r = y - p;
            }

            let mut rows = sample(&mut rng, n, n_rows).into_vec();
            rows.sort_unstable();
            let mut candidates = sample(&mut rng, n_cols, n_candidates).into_vec();
            candidates.sort_unstable();

            let tree = RegressionTree::fit(features, &residuals, &rows, &candidates, &self.config.tree, &mut rng);
            for (p, row) in predictions.iter_mut().zip(features.outer_iter()) {
                *p += self.config.learning_rate * tree.predict_one(row);
            }
            trees.push(tree);

            if round % 100 == 0 {
                let mse = residuals.iter().map(|r| r * r).sum::<f64>() / n as f64;
                trace!(round, mse, "boosting progress");
            }
        }

        debug!(rounds = trees.len(), samples = n, features = n_cols, base, "fitted gradient boosting");

        self.base = base;
        self.trees = trees;
        self.n_features = Some(n_cols);
        Ok(())
    }

    fn predict_one(&self, features: ArrayView1<'_, f64>) -> Result<f64> {
        check_width(self.name(), self.n_features, features)?;
        Ok(self.raw_predict(features))
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }
}
