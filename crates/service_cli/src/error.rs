//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `credit-risk` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The loan tape could not be turned into a portfolio.
    #[error("Data loading error: {0}")]
    Loader(#[from] adapter_loans::LoaderError),

    /// The simulation rejected its inputs.
    #[error("Simulation error: {0}")]
    Engine(#[from] credit_engine::EngineError),

    /// Writing a report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialisation failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
