//! Loader error types.

use std::path::PathBuf;

use credit_engine::portfolio::PortfolioError;
use thiserror::Error;

/// Errors raised while turning a loan tape into a portfolio.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The input file could not be opened.
    #[error("Failed to open loan file {path}: {source}")]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream is malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A grade table entry is not a probability.
    #[error("Invalid probability of default {value} for grade '{grade}': must be in [0, 1]")]
    InvalidGradeProbability {
        /// Grade label.
        grade: String,
        /// Offending probability.
        value: f64,
    },

    /// The LGD sampling range is not a sub-interval of [0, 1].
    #[error("Invalid LGD range [{low}, {high}): need 0 <= low < high <= 1")]
    InvalidLgdRange {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// Every row was dropped during cleaning.
    #[error("No usable loans after cleaning {rows_read} rows")]
    NoUsableRows {
        /// Data rows read from the input.
        rows_read: usize,
    },

    /// A cleaned row was rejected by the engine.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),
}

/// Result type alias using [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;
