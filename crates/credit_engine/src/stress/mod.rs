//! Baseline-versus-stressed scenario analysis.
//!
//! [`StressScenarioRunner`] runs the simulate → metrics pipeline twice,
//! once on the portfolio as given and once with every probability of
//! default scaled by a multiplier and capped at 1, and pairs the results
//! in a [`ComparisonReport`].

mod report;
mod runner;

pub use report::{ComparisonReport, MetricComparison};
pub use runner::{StressRunOutput, StressScenarioRunner};
