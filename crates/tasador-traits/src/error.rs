//! Error types for the Tasador pipeline.
//!
//! This module defines the error type shared by every stage of the pipeline,
//! from input validation through model fitting and serving.

use thiserror::Error;

/// The main error type for Tasador operations.
///
/// This enum encompasses all error cases that can occur when loading stock
/// panels, deriving features, fitting regressors, and extracting predictions.
#[derive(Debug, Error)]
pub enum TasadorError {
    /// The input batch contained no records.
    #[error("No stock data available: the input batch is empty")]
    EmptyInput,

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from the data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error when a date is out of range or cannot be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Prediction was requested from a regressor that has not been fitted.
    #[error("Model not fitted: {0}")]
    NotFitted(String),

    /// A downstream stage was handed a model set that cannot be used.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Error building a feature matrix.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error (de)serializing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for TasadorError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for TasadorError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Tasador operations.
///
/// This is a convenience type that uses [`TasadorError`] as the error type.
pub type Result<T> = std::result::Result<T, TasadorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TasadorError::MissingColumn("close_price".to_string());
        assert_eq!(err.to_string(), "Missing required column: close_price");

        let err = TasadorError::NotFitted("random_forest".to_string());
        assert_eq!(err.to_string(), "Model not fitted: random_forest");

        assert_eq!(
            TasadorError::EmptyInput.to_string(),
            "No stock data available: the input batch is empty"
        );
    }

    #[test]
    fn test_error_from_string() {
        let err: TasadorError = "boom".into();
        assert!(matches!(err, TasadorError::Other(_)));

        let err: TasadorError = String::from("boom").into();
        assert_eq!(err.to_string(), "Error: boom");
    }

    #[test]
    fn test_error_from_json() {
        let parse = serde_json::from_str::<Vec<i32>>("[1,");
        let err: TasadorError = parse.unwrap_err().into();
        assert!(matches!(err, TasadorError::Json(_)));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(TasadorError::EmptyInput);
        assert!(err_result.is_err());
    }
}
