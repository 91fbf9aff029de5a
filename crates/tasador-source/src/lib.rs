//! Stock record sources for Tasador.
//!
//! This crate loads the batch of stock-period records the pipeline trains
//! and predicts on, either from standard input or from the reference HTTP
//! endpoint, and decodes it into a [`StockPanel`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use tasador_source::Source;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let panel = Source::Stdin.load().await?;
//!     println!("{} records for {} stocks", panel.len(), panel.n_stocks());
//!     Ok(())
//! }
//! ```
//!
//! # Unavailable input
//!
//! A read or request failure, a non-success status, and malformed JSON are
//! all logged and produce an empty panel. Deciding what an empty batch means
//! is left to the caller.

use std::fmt;
use std::str::FromStr;

use tasador_traits::StockPanel;
use tracing::warn;

mod client;
mod error;
mod parse;
mod stdin;

pub use client::{STOCKS_URL, StockClient};
pub use error::SourceError;
pub use parse::parse_records;
pub use stdin::read_stdin;

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Where the batch of records comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// The full standard input stream.
    #[default]
    Stdin,
    /// A GET request to [`STOCKS_URL`].
    Remote,
}

impl Source {
    /// Read the raw batch text.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream or endpoint cannot be read.
    pub async fn fetch(self) -> Result<String> {
        match self {
            Self::Stdin => read_stdin().await,
            Self::Remote => StockClient::new().fetch().await,
        }
    }

    /// Load and decode the batch.
    ///
    /// Unavailable input degrades to an empty panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch is readable but lacks required columns
    /// or holds an undecodable record.
    pub async fn load(self) -> Result<StockPanel> {
        let fetched = self.fetch().await;
        self.decode(fetched)
    }

    fn decode(self, fetched: Result<String>) -> Result<StockPanel> {
        match fetched {
            Ok(text) => parse_records(&text),
            Err(e) if e.is_unavailable() => {
                warn!(source = %self, error = %e, "input unavailable, continuing with an empty batch");
                Ok(StockPanel::default())
            }
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("stdin"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stdin" | "-" => Ok(Self::Stdin),
            "remote" | "http" => Ok(Self::Remote),
            other => Err(format!("unknown source {other:?}, expected \"stdin\" or \"remote\"")),
        }
    }
}
