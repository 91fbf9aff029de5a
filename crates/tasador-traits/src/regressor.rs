//! Regressor trait shared by the factor and price models.
//!
//! This module defines the `Regressor` trait, the seam between the pipeline
//! stages and the tree ensembles that back them. Both stages fit on the full
//! available table and predict one sample at a time.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{Dataset, Result, TasadorError};

/// A model mapping a feature vector to a scalar forecast.
///
/// Implementations must be thread-safe (`Send + Sync`) so fitted models can
/// be shared across the prediction loop.
///
/// # Example
///
/// ```no_run
/// use ndarray::ArrayView1;
/// use tasador_traits::{Dataset, Regressor, Result, TasadorError};
///
/// #[derive(Debug, Default)]
/// struct MeanRegressor {
///     mean: Option<f64>,
///     width: usize,
/// }
///
/// impl Regressor for MeanRegressor {
///     fn name(&self) -> &str {
///         "mean"
///     }
///
///     fn fit(&mut self, data: &Dataset) -> Result<()> {
///         self.mean = data.labels().mean();
///         self.width = data.n_features();
///         Ok(())
///     }
///
///     fn predict_one(&self, _features: ArrayView1<'_, f64>) -> Result<f64> {
///         self.mean.ok_or_else(|| TasadorError::NotFitted("mean".into()))
///     }
///
///     fn n_features(&self) -> Option<usize> {
///         self.mean.map(|_| self.width)
///     }
/// }
/// ```
pub trait Regressor: Send + Sync {
    /// Name of the model, used in logs.
    fn name(&self) -> &str;

    /// Fits the model on every row of `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset is empty or otherwise unusable.
    fn fit(&mut self, data: &Dataset) -> Result<()>;

    /// Predicts one sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the vector width does
    /// not match the training width.
    fn predict_one(&self, features: ArrayView1<'_, f64>) -> Result<f64>;

    /// Width of the feature vectors seen during fitting, `None` before.
    fn n_features(&self) -> Option<usize>;

    /// Whether [`fit`](Self::fit) has completed.
    fn is_fitted(&self) -> bool {
        self.n_features().is_some()
    }

    /// Predicts every row of a feature matrix.
    ///
    /// # Errors
    ///
    /// Propagates the first [`predict_one`](Self::predict_one) error.
    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        features
            .outer_iter()
            .map(|row| self.predict_one(row))
            .collect::<Result<Vec<_>>>()
            .map(Array1::from_vec)
    }
}

/// Checks a feature vector against a fitted model's width.
///
/// # Errors
///
/// Returns [`TasadorError::NotFitted`] if `fitted_width` is `None`, or
/// [`TasadorError::InvalidData`] on a width mismatch.
pub fn check_width(name: &str, fitted_width: Option<usize>, features: ArrayView1<'_, f64>) -> Result<()> {
    match fitted_width {
        None => Err(TasadorError::NotFitted(name.to_string())),
        Some(width) if width != features.len() => Err(TasadorError::InvalidData(format!(
            "{name} was fitted on {width} features, got {}",
            features.len()
        ))),
        Some(_) => Ok(()),
    }
}
