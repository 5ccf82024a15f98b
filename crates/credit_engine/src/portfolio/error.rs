//! Portfolio error types.
//!
//! Raised when a loan record is constructed from out-of-range fields.

use thiserror::Error;

/// Errors that can occur while building loan records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortfolioError {
    /// Probability of default outside [0, 1] or not a number.
    #[error("Invalid probability of default: {0}")]
    InvalidProbability(f64),

    /// Loss given default fraction outside [0, 1] or not a number.
    #[error("Invalid loss given default fraction: {0}")]
    InvalidLossGivenDefault(f64),

    /// Exposure negative or not finite.
    #[error("Invalid exposure: {0}")]
    InvalidExposure(f64),

    /// Precomputed loss if default negative or not finite.
    #[error("Invalid loss if default: {0}")]
    InvalidLossIfDefault(f64),
}
