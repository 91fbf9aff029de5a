//! In-sample fit evaluation for Tasador models.
//!
//! Every fitted model is scored on the rows it was trained on. The scores
//! are diagnostics only; nothing is held out.
//!
//! # Example
//!
//! ```rust
//! use tasador_eval::FitMetrics;
//!
//! let metrics = FitMetrics::calculate(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
//! assert_eq!(metrics.r2, 1.0);
//! ```

pub mod metrics;

// Re-export main types
pub use metrics::{FitMetrics, mean_absolute_error, r_squared, root_mean_squared_error};
