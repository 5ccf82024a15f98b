//! # Monte Carlo Loss Simulation
//!
//! - [`LossSimulator`]: independent Bernoulli default draws per loan per
//!   scenario, aggregated into a [`ScenarioLosses`] buffer
//! - [`SimulationConfig`]: scenario count, [`ExecutionMode`] and seed
//!
//! ## Draw order
//!
//! In [`ExecutionMode::Sequential`] the caller's stream is consumed as
//! `scenario 0: loan 0..n, scenario 1: loan 0..n, ...`. In
//! [`ExecutionMode::Parallel`] the caller's stream yields one seed per
//! batch and each batch replays the sequential order on its own stream.

mod config;
mod losses;
mod simulator;

pub use config::{ExecutionMode, SimulationConfig, SimulationConfigBuilder};
pub use losses::{HistogramBin, ScenarioLosses};
pub use simulator::LossSimulator;
