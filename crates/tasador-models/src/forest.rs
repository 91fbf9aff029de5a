//! Bagged random forest regressor.

use ndarray::ArrayView1;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tasador_traits::{Dataset, Regressor, Result, TasadorError, regressor::check_width};
use tracing::debug;

use crate::tree::{RegressionTree, TreeConfig};

/// Configuration for a random forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees
    pub n_trees: usize,
    /// Whether each tree sees a bootstrap resample of the rows
    pub bootstrap: bool,
    /// Growth rules for every tree
    pub tree: TreeConfig,
    /// Base seed; tree `i` draws from `seed + i`
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            bootstrap: true,
            tree: TreeConfig::default(),
            seed: 42,
        }
    }
}

/// Random forest: the mean prediction of independently grown trees.
///
/// Trees are grown in parallel, but each one owns its random stream, so a
/// fixed seed gives identical forests regardless of thread scheduling.
///
/// # Examples
///
/// ```rust,no_run
/// use tasador_models::{ForestConfig, RandomForest};
/// use tasador_traits::{Dataset, Regressor};
///
/// let data = Dataset::from_rows(
///     vec![vec![1.0], vec![2.0], vec![3.0]],
///     vec![10.0, 20.0, 30.0],
///     vec!["x".to_string()],
/// )
/// .unwrap();
///
/// let mut forest = RandomForest::new(ForestConfig::default());
/// forest.fit(&data).unwrap();
/// let prediction = forest.predict_one(data.row(0)).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<RegressionTree>,
    n_features: Option<usize>,
}

impl RandomForest {
    /// Create a new forest with the given configuration.
    pub const fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_features: None,
        }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Fitted trees.
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl Regressor for RandomForest {
    fn name(&self) -> &str {
        "random_forest"
    }

    fn fit(&mut self, data: &Dataset) -> Result<()> {
        if data.is_empty() {
            return Err(TasadorError::InsufficientData(
                "random forest needs at least one sample".into(),
            ));
        }
        if self.config.n_trees == 0 {
            return Err(TasadorError::InvalidData("random forest needs at least one tree".into()));
        }

        let n = data.n_samples();
        let features = data.features();
        let targets: Vec<f64> = data.labels().to_vec();
        let candidates: Vec<usize> = (0..data.n_features()).collect();

        let trees: Vec<RegressionTree> = (0..self.config.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed.wrapping_add(i as u64));
                let rows: Vec<usize> = if self.config.bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                RegressionTree::fit(features, &targets, &rows, &candidates, &self.config.tree, &mut rng)
            })
            .collect();

        debug!(
            trees = trees.len(),
            samples = n,
            features = candidates.len(),
            max_depth = trees.iter().map(RegressionTree::depth).max().unwrap_or(0),
            "fitted random forest"
        );

        self.trees = trees;
        self.n_features = Some(data.n_features());
        Ok(())
    }

    fn predict_one(&self, features: ArrayView1<'_, f64>) -> Result<f64> {
        check_width(self.name(), self.n_features, features)?;
        let sum: f64 = self.trees.iter().map(|tree| tree.predict_one(features)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }
}
