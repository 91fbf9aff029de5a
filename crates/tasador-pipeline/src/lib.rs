//! Two-stage valuation pipeline.
//!
//! The factor stage fits one random forest per valuation ratio (TTM, PE, PB,
//! PCF) to forecast its next-period value from current levels and
//! period-over-period returns. The price stage adds a discounted cash flow
//! estimate and the factor forecasts to a richer feature set and fits a
//! gradient boosted model for the next-period close. Serving predicts the
//! close following each stock's most recent period.
//!
//! # Example
//!
//! ```rust,no_run
//! use tasador_pipeline::{Pipeline, PipelineConfig};
//! use tasador_traits::StockPanel;
//!
//! # fn load() -> StockPanel { StockPanel::default() }
//! let panel = load();
//! let output = Pipeline::new(PipelineConfig::default()).run(&panel)?;
//! println!("{}", output.to_json(true)?);
//! # Ok::<(), tasador_traits::TasadorError>(())
//! ```

pub mod composer;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod serving;
pub mod stage1;
pub mod stage2;

#[cfg(test)]
mod fixtures;

// Re-export main types
pub use composer::{CompositeRow, CompositeTable, Composer, price_feature_names};
pub use config::{PipelineConfig, ServingConfig};
pub use output::{FactorPrediction, FinalPrediction, PipelineOutput};
pub use pipeline::Pipeline;
pub use serving::ServingExtractor;
pub use stage1::{FactorModel, FactorModels, FactorTrainer};
pub use stage2::{PriceModel, PriceTrainer};
