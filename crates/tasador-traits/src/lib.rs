#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tasador/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the Tasador valuation pipeline.
//!
//! This crate provides the foundational abstractions shared by every stage:
//! the stock-period record and panel, the field registry, the training
//! dataset, the regressor seam, and the common error type.

/// The version of the tasador-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod dataset;
pub mod error;
pub mod field;
mod frame;
pub mod regressor;
pub mod types;

// Re-exports
pub use dataset::Dataset;
pub use error::{Result, TasadorError};
pub use field::Field;
pub use regressor::Regressor;
pub use types::{Date, StockId, StockPanel, StockPeriodRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
