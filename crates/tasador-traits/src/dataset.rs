//! Feature matrix and label vector handed to a regressor.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{Result, TasadorError};

/// A supervised training table.
///
/// Rows are samples, columns follow `feature_names`. Every value is present:
/// rows with missing features or labels are filtered out before a dataset is
/// built.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Array1<f64>,
    feature_names: Vec<String>,
}

impl Dataset {
    /// Creates a dataset, checking that the shapes agree.
    ///
    /// # Errors
    ///
    /// Returns [`TasadorError::InvalidData`] if the number of labels differs
    /// from the number of rows, or the number of names from the number of
    /// columns.
    pub fn new(
        features: Array2<f64>,
        labels: Array1<f64>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(TasadorError::InvalidData(format!(
                "{} feature rows but {} labels",
                features.nrows(),
                labels.len()
            )));
        }
        if features.ncols() != feature_names.len() {
            return Err(TasadorError::InvalidData(format!(
                "{} feature columns but {} feature names",
                features.ncols(),
                feature_names.len()
            )));
        }

        Ok(Self {
            features,
            labels,
            feature_names,
        })
    }

    /// Builds a dataset from row vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if a row's width differs from `feature_names.len()`
    /// or the label count differs from the row count.
    pub fn from_rows(
        rows: Vec<Vec<f64>>,
        labels: Vec<f64>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        let n_features = feature_names.len();
        let n_samples = rows.len();

        let mut flat = Vec::with_capacity(n_samples * n_features);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_features {
                return Err(TasadorError::InvalidData(format!(
                    "row {i} has {} features, expected {n_features}",
                    row.len()
                )));
            }
            flat.extend(row);
        }

        let features = Array2::from_shape_vec((n_samples, n_features), flat)?;
        Self::new(features, Array1::from_vec(labels), feature_names)
    }

    /// Number of samples.
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features.
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Returns whether the dataset has no samples.
    pub fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }

    /// Feature matrix.
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    /// Label vector.
    pub fn labels(&self) -> ArrayView1<'_, f64> {
        self.labels.view()
    }

    /// One sample's feature row.
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.features.row(index)
    }

    /// Feature names in column order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
