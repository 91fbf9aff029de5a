//! Tree ensemble regressors for the Tasador valuation pipeline.
//!
//! Both pipeline stages fit one of the models here through the
//! [`Regressor`](tasador_traits::Regressor) trait: a bagged random forest for
//! the valuation factors and a gradient boosted ensemble for the next-period
//! close price. The two share a single regression tree implementation.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tasador_models::{BoostingConfig, GradientBoostingRegressor};
//! use tasador_traits::{Dataset, Regressor};
//!
//! let data = Dataset::from_rows(
//!     vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![2.0, 1.0]],
//!     vec![1.0, 2.0, 3.0],
//!     vec!["a".to_string(), "b".to_string()],
//! )
//! .unwrap();
//!
//! let mut model = GradientBoostingRegressor::new(BoostingConfig::default());
//! model.fit(&data).unwrap();
//! let forecast = model.predict_one(data.row(2)).unwrap();
//! ```

mod boosting;
mod forest;
mod tree;

// Re-export main types
pub use boosting::{BoostingConfig, GradientBoostingRegressor};
pub use forest::{ForestConfig, RandomForest};
pub use tree::{RegressionTree, TreeConfig};
