#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tasador/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # tasador
//!
//! Two-stage stock valuation and price prediction.
//!
//! tasador is an umbrella crate that re-exports all tasador sub-crates for
//! convenience. It trains a valuation-factor stage and a price stage on a
//! panel of per-stock, per-period records and predicts each stock's
//! next-period close.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tasador::{Pipeline, PipelineConfig, Result};
//! use tasador::source::Source;
//!
//! # async fn example() -> Result<()> {
//! let panel = Source::Stdin.load().await?;
//! let output = Pipeline::new(PipelineConfig::default()).run(&panel)?;
//! println!("{}", output.to_json(false)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Records, panel, dataset, the [`Regressor`] trait and errors
//! - [`features`] - Return features, next-period labels, discounted cash flow
//! - [`models`] - Random forest and gradient boosted trees
//! - [`eval`] - In-sample fit metrics
//! - [`source`] - Standard input and HTTP record sources
//! - [`pipeline`] - Stage training, composition and serving
//!
//! ## Architecture
//!
//! 1. **Feature derivation** adds period-over-period returns per stock
//! 2. **Factor stage** forecasts next-period TTM, PE, PB and PCF
//! 3. **Composition** adds DCF, price-stage fields and the factor forecasts
//! 4. **Price stage** forecasts next-period close
//! 5. **Serving** predicts from each stock's latest period

/// Version information for the tasador crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types and trait definitions.
pub mod traits {
    pub use tasador_traits::*;
}

// Re-export core types at top level for convenience
pub use tasador_traits::{
    Dataset, Date, Field, Regressor, Result, StockId, StockPanel, StockPeriodRecord, TasadorError,
};

// ============================================================================
// Features
// ============================================================================

/// Feature derivation.
///
/// Return features (`F / F_prev - 1`) within each stock, next-period labels,
/// and the 20-period discounted cash flow estimate.
pub mod features {
    pub use tasador_features::*;
}

// ============================================================================
// Models
// ============================================================================

/// Tree ensemble regressors.
pub mod models {
    pub use tasador_models::*;
}

// ============================================================================
// Evaluation
// ============================================================================

/// In-sample fit evaluation.
pub mod eval {
    pub use tasador_eval::*;
}

// ============================================================================
// Sources
// ============================================================================

/// Record sources.
pub mod source {
    pub use tasador_source::*;
}

// ============================================================================
// Pipeline
// ============================================================================

/// The two-stage pipeline.
pub mod pipeline {
    pub use tasador_pipeline::*;
}

pub use tasador_pipeline::{Pipeline, PipelineConfig, PipelineOutput};
