//! Error types for record sources.

use tasador_traits::TasadorError;
use thiserror::Error;

/// Errors that can occur while loading a batch of stock records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Endpoint returned HTTP {status}")]
    Status {
        /// Status code returned by the endpoint
        status: u16,
    },

    /// Reading standard input failed.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Required columns are absent from the batch.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A record could not be decoded.
    #[error("Record {index} is invalid: {source}")]
    InvalidRecord {
        /// Position of the record in the batch
        index: usize,
        /// Decoding failure
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Whether the error means the input was unavailable, as opposed to
    /// present but unusable.
    ///
    /// Unavailable input degrades to an empty batch.
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { .. } | Self::Io(_))
    }
}

impl From<SourceError> for TasadorError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::MissingColumn(columns) => Self::MissingColumn(columns),
            SourceError::InvalidRecord { .. } => Self::InvalidData(err.to_string()),
            SourceError::Request(_) | SourceError::Status { .. } | SourceError::Io(_) => {
                Self::DataFetch(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_pipeline_error() {
        let err: TasadorError = SourceError::MissingColumn("PE, PB".into()).into();
        assert!(matches!(err, TasadorError::MissingColumn(ref c) if c == "PE, PB"));

        let err: TasadorError = SourceError::Status { status: 503 }.into();
        assert!(matches!(err, TasadorError::DataFetch(_)));
    }

    #[test]
    fn test_unavailable_classification() {
        assert!(SourceError::Status { status: 404 }.is_unavailable());
        assert!(SourceError::Io(std::io::Error::other("closed")).is_unavailable());
        assert!(!SourceError::MissingColumn("TTM".into()).is_unavailable());
    }
}
