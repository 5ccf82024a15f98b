//! Engine error types.
//!
//! Every failure raised by the simulation pipeline is an [`EngineError`].
//! Validation is fail-fast: all checks run before the first random draw,
//! so an error never accompanies a partial result.

use thiserror::Error;

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// Broad classification of an [`EngineError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied argument is unusable (empty portfolio, bad counts).
    InvalidInput,
    /// A numeric field lies outside its admissible range.
    DataRange,
    /// Metrics were requested over zero scenarios.
    EmptyLossSequence,
}

/// Errors that can occur during simulation, metric computation or
/// stress testing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The portfolio contains no loans.
    #[error("Portfolio is empty")]
    EmptyPortfolio,

    /// The requested number of scenarios is not positive.
    #[error("Invalid scenario count {0}: must be positive")]
    InvalidScenarioCount(usize),

    /// A loan's probability of default lies outside [0, 1].
    #[error("Invalid probability of default {value} for loan {index}: must be in [0, 1]")]
    InvalidProbability {
        /// Position of the loan in the portfolio.
        index: usize,
        /// Offending probability.
        value: f64,
    },

    /// The stress multiplier is not a finite positive number.
    #[error("Invalid stress multiplier {0}: must be finite and positive")]
    InvalidStressMultiplier(f64),

    /// A scenario loss is negative or not finite.
    #[error("Invalid loss {value} at scenario {index}: must be finite and non-negative")]
    InvalidLoss {
        /// Scenario index.
        index: usize,
        /// Offending loss.
        value: f64,
    },

    /// Metrics were requested over an empty loss sequence.
    #[error("Loss sequence is empty")]
    EmptyLossSequence,

    /// Simulation configuration rejected at build time.
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfig {
        /// Parameter name.
        name: &'static str,
        /// Description of the problem.
        reason: String,
    },
}

impl EngineError {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPortfolio
            | Self::InvalidScenarioCount(_)
            | Self::InvalidStressMultiplier(_)
            | Self::InvalidConfig { .. } => ErrorKind::InvalidInput,
            Self::InvalidProbability { .. } | Self::InvalidLoss { .. } => ErrorKind::DataRange,
            Self::EmptyLossSequence => ErrorKind::EmptyLossSequence,
        }
    }
}
