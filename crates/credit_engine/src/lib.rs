//! # Credit Engine
//!
//! Monte Carlo tail-risk engine for credit loan portfolios.
//!
//! Each loan carries a probability of default (PD) and a loss if default.
//! The engine draws independent Bernoulli defaults per scenario, turns the
//! resulting loss distribution into tail metrics (VaR and Expected
//! Shortfall at 95% and 99%) and compares a baseline run against a run
//! with every PD scaled by a stress multiplier.
//!
//! ## Architecture
//!
//! ```text
//! Portfolio ──► LossSimulator ──► ScenarioLosses ──► RiskMetricsCalculator ──► RiskMetrics
//!     │              ▲                                                            │
//!     └─ stressed(m) ┘  StressScenarioRunner (baseline ∥ stressed) ──► ComparisonReport
//! ```
//!
//! - [`portfolio`]: validated loan records and portfolios
//! - [`rng`]: seeded random streams with deterministic forking
//! - [`mc`]: simulation configuration and the loss simulator
//! - [`metrics`]: percentile, VaR and Expected Shortfall
//! - [`stress`]: PD-stress orchestration and side-by-side reporting
//! - [`parallel`]: Rayon batch helpers
//!
//! ## Usage Example
//!
//! ```rust
//! use credit_engine::prelude::*;
//!
//! let portfolio: Portfolio = [(0.02, 0.5, 10_000.0), (0.12, 0.45, 4_000.0)]
//!     .into_iter()
//!     .map(|(pd, lgd, ead)| LoanRecord::new(pd, lgd, ead).unwrap())
//!     .collect();
//!
//! let mut rng = CreditRng::from_seed(42);
//! let losses = LossSimulator::default()
//!     .simulate(&portfolio, 10_000, &mut rng)
//!     .unwrap();
//! let metrics = RiskMetricsCalculator::compute(&losses).unwrap();
//!
//! assert!(metrics.var_95 <= metrics.var_99);
//! assert!(metrics.es_99 >= metrics.var_99);
//! ```
//!
//! ## Determinism
//!
//! Results depend only on the seed, the portfolio, the scenario count and
//! the [`ExecutionMode`](mc::ExecutionMode). They never depend on the
//! number of Rayon worker threads.

#![deny(missing_docs)]

pub mod error;
pub mod mc;
pub mod metrics;
pub mod parallel;
pub mod portfolio;
pub mod rng;
pub mod stress;

pub use error::{EngineError, ErrorKind, Result};

/// Commonly used types.
pub mod prelude {
    pub use crate::error::{EngineError, ErrorKind};
    pub use crate::mc::{ExecutionMode, LossSimulator, ScenarioLosses, SimulationConfig};
    pub use crate::metrics::{MetricName, RiskMetrics, RiskMetricsCalculator};
    pub use crate::portfolio::{LoanRecord, Portfolio, PortfolioError};
    pub use crate::rng::CreditRng;
    pub use crate::stress::{ComparisonReport, StressRunOutput, StressScenarioRunner};
}
