//! Simulation configuration.
//!
//! This module provides configuration types and a builder for the loss
//! simulation: scenario count, execution mode and seed.

use crate::error::{EngineError, Result};
use crate::parallel::DEFAULT_BATCH_SIZE;
use crate::rng::CreditRng;

/// How the scenario loop is executed.
///
/// Both modes are deterministic for a given seed, but they consume the
/// random stream differently and therefore produce different (equally
/// valid) loss sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionMode {
    /// Single shared stream on the calling thread.
    ///
    /// Scenarios are evaluated in index order and, within a scenario, one
    /// uniform is drawn per loan in portfolio order.
    Sequential,

    /// Fixed-size batches evaluated on the Rayon pool.
    ///
    /// One `u64` seed per batch is drawn from the caller's stream up front,
    /// in batch order. Each batch then runs its own stream with the
    /// sequential draw order. Output depends on `batch_size` but never on
    /// the number of threads.
    Parallel {
        /// Scenarios per batch (must be positive).
        batch_size: usize,
    },
}

impl Default for ExecutionMode {
    fn default() -> Self {
        Self::Sequential
    }
}

impl ExecutionMode {
    /// Parallel mode with [`DEFAULT_BATCH_SIZE`].
    pub fn parallel() -> Self {
        Self::Parallel {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Validates the mode.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` for a zero batch size.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Parallel { batch_size: 0 } => Err(EngineError::InvalidConfig {
                name: "batch_size",
                reason: "must be positive".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Simulation configuration.
///
/// Immutable; use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use credit_engine::mc::{ExecutionMode, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .scenario_count(10_000)
///     .execution(ExecutionMode::parallel())
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.scenario_count(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    scenario_count: usize,
    execution: ExecutionMode,
    seed: Option<u64>,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of scenarios per run.
    #[inline]
    pub fn scenario_count(&self) -> usize {
        self.scenario_count
    }

    /// Execution mode of the scenario loop.
    #[inline]
    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }

    /// Optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Builds the root random stream: seeded when a seed is configured,
    /// otherwise from entropy.
    pub fn rng(&self) -> CreditRng {
        match self.seed {
            Some(seed) => CreditRng::from_seed(seed),
            None => CreditRng::from_entropy(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidScenarioCount` if the scenario count is zero
    /// - `InvalidConfig` if the parallel batch size is zero
    pub fn validate(&self) -> Result<()> {
        if self.scenario_count == 0 {
            return Err(EngineError::InvalidScenarioCount(self.scenario_count));
        }
        self.execution.validate()
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    scenario_count: Option<usize>,
    execution: ExecutionMode,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of scenarios.
    #[inline]
    pub fn scenario_count(mut self, scenario_count: usize) -> Self {
        self.scenario_count = Some(scenario_count);
        self
    }

    /// Sets the execution mode.
    #[inline]
    pub fn execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if the scenario count is missing or zero, or
    /// the execution mode is invalid.
    pub fn build(self) -> Result<SimulationConfig> {
        let scenario_count = self.scenario_count.ok_or(EngineError::InvalidConfig {
            name: "scenario_count",
            reason: "must be specified".to_string(),
        })?;

        let config = SimulationConfig {
            scenario_count,
            execution: self.execution,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
