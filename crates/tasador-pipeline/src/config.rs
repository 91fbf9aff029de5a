//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use tasador_models::{BoostingConfig, ForestConfig};
use tasador_traits::StockId;

/// Stock whose history is known to be incomplete.
pub const DEFAULT_EXCLUDED_STOCK: StockId = 9961;

/// Configuration for the serving step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServingConfig {
    /// Stocks never given a final prediction
    pub excluded_stocks: Vec<StockId>,
}

impl Default for ServingConfig {
    fn default() -> Self {
        Self {
            excluded_stocks: vec![DEFAULT_EXCLUDED_STOCK],
        }
    }
}

impl ServingConfig {
    /// Whether a stock is on the exclusion list.
    pub fn is_excluded(&self, stock_id: StockId) -> bool {
        self.excluded_stocks.contains(&stock_id)
    }
}

/// Configuration for a full pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Random forest settings shared by the four factor models
    pub factor: ForestConfig,
    /// Gradient boosting settings for the price model
    pub price: BoostingConfig,
    /// Serving settings
    pub serving: ServingConfig,
}

impl PipelineConfig {
    /// Use one seed for both model stages.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.factor.seed = seed;
        self.price.seed = seed;
        self
    }

    /// Replace the serving exclusion list.
    #[must_use]
    pub fn with_excluded_stocks(mut self, stocks: Vec<StockId>) -> Self {
        self.serving.excluded_stocks = stocks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_excludes_known_incomplete_stock() {
        let config = ServingConfig::default();
        assert!(config.is_excluded(9961));
        assert!(!config.is_excluded(1));
    }

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.factor.n_trees, 100);
        assert_eq!(config.factor.seed, 42);
        assert_eq!(config.price.n_rounds, 1000);
        assert_eq!(config.price.seed, 0);
    }

    #[test]
    fn test_overrides() {
        let config = PipelineConfig::default()
            .with_seed(7)
            .with_excluded_stocks(vec![1, 2]);
        assert_eq!(config.factor.seed, 7);
        assert_eq!(config.price.seed, 7);
        assert!(config.serving.is_excluded(2));
        assert!(!config.serving.is_excluded(9961));
    }
}
