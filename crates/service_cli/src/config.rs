//! Run configuration.
//!
//! Loaded from a TOML file (`credit-risk.toml` by default) with
//! environment variable overrides. Command-line flags are applied on top by
//! the `run` command.
//!
//! ```toml
//! [simulation]
//! scenario_count = 10000
//! stress_multiplier = 1.5
//! seed = 42
//! execution = "parallel"
//! batch_size = 256
//!
//! [data]
//! input = "data/loan_data.csv"
//! lgd_seed = 42
//! lgd_range = { low = 0.4, high = 0.6 }
//!
//! [data.grades]
//! A = 0.01
//! B = 0.02
//!
//! [output]
//! dir = "outputs"
//! histogram_bins = 50
//! ```

use std::path::{Path, PathBuf};

use adapter_loans::{GradeTable, LgdRange, LoaderConfig, DEFAULT_LGD_SEED};
use credit_engine::mc::{ExecutionMode, SimulationConfig};
use credit_engine::parallel::DEFAULT_BATCH_SIZE;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "credit-risk.toml";

/// Prefix of the environment overrides.
pub const ENV_PREFIX: &str = "CREDIT_RISK_";

/// Scenario loop execution strategy.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    /// Single thread, single stream.
    #[default]
    Sequential,
    /// Rayon batches with per-batch streams.
    Parallel,
}

/// `[simulation]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSection {
    /// Scenarios per run.
    pub scenario_count: usize,
    /// Factor applied to every PD in the stressed run.
    pub stress_multiplier: f64,
    /// Root seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Execution strategy.
    pub execution: Execution,
    /// Scenarios per batch in parallel mode.
    pub batch_size: usize,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            scenario_count: 10_000,
            stress_multiplier: 1.5,
            seed: Some(42),
            execution: Execution::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// `[data]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataSection {
    /// Loan tape path.
    pub input: PathBuf,
    /// Grade to PD table.
    pub grades: GradeTable,
    /// LGD sampling range.
    pub lgd_range: LgdRange,
    /// Seed of the LGD stream.
    pub lgd_seed: u64,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/loan_data.csv"),
            grades: GradeTable::default(),
            lgd_range: LgdRange::default(),
            lgd_seed: DEFAULT_LGD_SEED,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    /// Directory receiving the report files.
    pub dir: PathBuf,
    /// Number of histogram bins.
    pub histogram_bins: usize,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("outputs"),
            histogram_bins: 50,
        }
    }
}

/// Complete run configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Simulation parameters.
    pub simulation: SimulationSection,
    /// Input data parameters.
    pub data: DataSection,
    /// Report parameters.
    pub output: OutputSection,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `CREDIT_RISK_*` environment variable overrides.
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparsable values are ignored with a warning.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("SCENARIOS") {
            match v.parse() {
                Ok(n) => self.simulation.scenario_count = n,
                Err(_) => warn!(value = %v, "ignoring invalid CREDIT_RISK_SCENARIOS"),
            }
        }
        if let Some(v) = var("STRESS_MULTIPLIER") {
            match v.parse() {
                Ok(m) => self.simulation.stress_multiplier = m,
                Err(_) => warn!(value = %v, "ignoring invalid CREDIT_RISK_STRESS_MULTIPLIER"),
            }
        }
        if let Some(v) = var("SEED") {
            if v.eq_ignore_ascii_case("entropy") {
                self.simulation.seed = None;
            } else {
                match v.parse() {
                    Ok(seed) => self.simulation.seed = Some(seed),
                    Err(_) => warn!(value = %v, "ignoring invalid CREDIT_RISK_SEED"),
                }
            }
        }
        if let Some(v) = var("EXECUTION") {
            self.simulation.execution = match v.to_lowercase().as_str() {
                "sequential" => Execution::Sequential,
                "parallel" => Execution::Parallel,
                _ => {
                    warn!(value = %v, "ignoring invalid CREDIT_RISK_EXECUTION");
                    self.simulation.execution
                }
            };
        }
        if let Some(v) = var("BATCH_SIZE") {
            match v.parse() {
                Ok(n) => self.simulation.batch_size = n,
                Err(_) => warn!(value = %v, "ignoring invalid CREDIT_RISK_BATCH_SIZE"),
            }
        }
        if let Some(v) = var("INPUT") {
            self.data.input = PathBuf::from(v);
        }
        if let Some(v) = var("OUTPUT_DIR") {
            self.output.dir = PathBuf::from(v);
        }

        self
    }

    /// Validate the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let sim = &self.simulation;

        if sim.scenario_count == 0 {
            errors.push("simulation.scenario_count must be greater than 0".to_string());
        }
        if !sim.stress_multiplier.is_finite() || sim.stress_multiplier <= 0.0 {
            errors.push(format!(
                "simulation.stress_multiplier {} must be finite and positive",
                sim.stress_multiplier
            ));
        }
        if sim.execution == Execution::Parallel && sim.batch_size == 0 {
            errors.push("simulation.batch_size must be greater than 0".to_string());
        }

        if self.data.input.as_os_str().is_empty() {
            errors.push("data.input cannot be empty".to_string());
        }
        if let Err(e) = self.data.lgd_range.validate() {
            errors.push(format!("data.lgd_range: {e}"));
        }
        if self.data.grades.is_empty() {
            errors.push("data.grades must map at least one grade".to_string());
        }

        if self.output.dir.as_os_str().is_empty() {
            errors.push("output.dir cannot be empty".to_string());
        }
        if self.output.histogram_bins == 0 {
            errors.push("output.histogram_bins must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Execution mode for the engine.
    pub fn execution_mode(&self) -> ExecutionMode {
        match self.simulation.execution {
            Execution::Sequential => ExecutionMode::Sequential,
            Execution::Parallel => ExecutionMode::Parallel {
                batch_size: self.simulation.batch_size,
            },
        }
    }

    /// Engine simulation configuration.
    pub fn simulation_config(&self) -> credit_engine::Result<SimulationConfig> {
        let builder = SimulationConfig::builder()
            .scenario_count(self.simulation.scenario_count)
            .execution(self.execution_mode());
        match self.simulation.seed {
            Some(seed) => builder.seed(seed).build(),
            None => builder.build(),
        }
    }

    /// Loader configuration for the data adapter.
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            grades: self.data.grades.clone(),
            lgd_range: self.data.lgd_range,
            lgd_seed: self.data.lgd_seed,
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {path}: {message}")]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
