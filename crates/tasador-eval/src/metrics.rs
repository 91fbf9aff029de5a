//! Goodness-of-fit metrics.
//!
//! This module provides the scores logged after every fit:
//! - Coefficient of determination (R²)
//! - Root mean squared error
//! - Mean absolute error

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Coefficient of determination `1 - SS_res / SS_tot`.
///
/// A constant target has no variance to explain: the score is 1.0 when the
/// predictions match it exactly and 0.0 otherwise. Empty input gives NaN.
pub fn r_squared(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return f64::NAN;
    }

    let mean = y_true.iter().take(n).sum::<f64>() / n as f64;
    let ss_tot: f64 = y_true.iter().take(n).map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(y, p)| (y - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        if ss_res == 0.0 { 1.0 } else { 0.0 }
    } else {
        1.0 - ss_res / ss_tot
    }
}

/// Root mean squared error. Empty input gives NaN.
pub fn root_mean_squared_error(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return f64::NAN;
    }

    let sse: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(y, p)| (y - p).powi(2))
        .sum();
    (sse / n as f64).sqrt()
}

/// Mean absolute error. Empty input gives NaN.
pub fn mean_absolute_error(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return f64::NAN;
    }

    let sae: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(y, p)| (y - p).abs())
        .sum();
    sae / n as f64
}

/// In-sample fit quality of one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Coefficient of determination
    pub r2: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Number of observations scored
    pub n_obs: usize,
}

impl FitMetrics {
    /// Calculate fit metrics from labels and predictions.
    ///
    /// Extra trailing values on the longer slice are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tasador_eval::FitMetrics;
    ///
    /// let metrics = FitMetrics::calculate(&[1.0, 2.0, 3.0, 4.0], &[1.5, 2.0, 3.0, 3.5]);
    /// assert_eq!(metrics.n_obs, 4);
    /// assert!(metrics.r2 > 0.7);
    /// ```
    pub fn calculate(y_true: &[f64], y_pred: &[f64]) -> Self {
        let (y_true, y_pred) = (ArrayView1::from(y_true), ArrayView1::from(y_pred));
        Self {
            r2: r_squared(y_true, y_pred),
            rmse: root_mean_squared_error(y_true, y_pred),
            mae: mean_absolute_error(y_true, y_pred),
            n_obs: y_true.len().min(y_pred.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_perfect_fit() {
        let metrics = FitMetrics::calculate(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert_relative_eq!(metrics.r2, 1.0);
        assert_relative_eq!(metrics.rmse, 0.0);
        assert_relative_eq!(metrics.mae, 0.0);
        assert_eq!(metrics.n_obs, 3);
    }

    #[test]
    fn test_mean_prediction_scores_zero() {
        let y = array![1.0, 2.0, 3.0];
        let p = array![2.0, 2.0, 2.0];
        assert_relative_eq!(r_squared(y.view(), p.view()), 0.0);
    }

    #[test]
    fn test_known_values() {
        let metrics = FitMetrics::calculate(&[1.0, 2.0, 3.0, 4.0], &[1.5, 2.0, 3.0, 3.5]);
        // ss_res = 0.5, ss_tot = 5
        assert_relative_eq!(metrics.r2, 0.9);
        assert_relative_eq!(metrics.rmse, 0.125_f64.sqrt());
        assert_relative_eq!(metrics.mae, 0.25);
    }

    #[test]
    fn test_constant_target() {
        let y = array![5.0, 5.0, 5.0];
        assert_relative_eq!(r_squared(y.view(), array![5.0, 5.0, 5.0].view()), 1.0);
        assert_relative_eq!(r_squared(y.view(), array![5.0, 4.0, 5.0].view()), 0.0);
    }

    #[test]
    fn test_empty_input() {
        let metrics = FitMetrics::calculate(&[], &[]);
        assert!(metrics.r2.is_nan());
        assert!(metrics.rmse.is_nan());
        assert!(metrics.mae.is_nan());
        assert_eq!(metrics.n_obs, 0);
    }
}
