//! Stress scenario orchestration.

use tracing::{debug, info};

use super::report::ComparisonReport;
use crate::error::{EngineError, Result};
use crate::mc::{LossSimulator, ScenarioLosses};
use crate::metrics::{RiskMetrics, RiskMetricsCalculator};
use crate::portfolio::Portfolio;
use crate::rng::CreditRng;

/// Everything produced by one stress run.
#[derive(Clone, Debug, PartialEq)]
pub struct StressRunOutput {
    /// Base and stressed metrics side by side.
    pub report: ComparisonReport,
    /// Metrics of the baseline run.
    pub base_metrics: RiskMetrics,
    /// Metrics of the stressed run.
    pub stressed_metrics: RiskMetrics,
    /// Raw baseline losses, e.g. for histogram rendering.
    pub base_losses: ScenarioLosses,
    /// Raw stressed losses.
    pub stressed_losses: ScenarioLosses,
}

/// Runs the baseline and the PD-stressed pipeline and compares them.
///
/// The caller's stream is forked once and both branches replay that
/// child stream from the same state, so every scenario sees the same
/// uniform draws in both runs. Raising probabilities can then only add
/// defaults: for a multiplier of at least 1 each stressed scenario loses
/// at least as much as its baseline counterpart. Each branch owns its
/// copy of the stream and the two run concurrently on the Rayon pool.
///
/// # Examples
///
/// ```
/// use credit_engine::mc::LossSimulator;
/// use credit_engine::metrics::MetricName;
/// use credit_engine::portfolio::{LoanRecord, Portfolio};
/// use credit_engine::rng::CreditRng;
/// use credit_engine::stress::StressScenarioRunner;
///
/// let portfolio = Portfolio::new(vec![
///     LoanRecord::new(0.02, 0.5, 10_000.0).unwrap(),
///     LoanRecord::new(0.12, 0.4, 5_000.0).unwrap(),
/// ]);
/// let runner = StressScenarioRunner::new(LossSimulator::default());
/// let output = runner
///     .run(&portfolio, 1_000, 1.5, &mut CreditRng::from_seed(42))
///     .unwrap();
///
/// assert_eq!(output.base_losses.len(), 1_000);
/// assert!(output.report.get(MetricName::Var99).is_some());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StressScenarioRunner {
    simulator: LossSimulator,
}

impl StressScenarioRunner {
    /// Creates a runner around the given simulator.
    pub fn new(simulator: LossSimulator) -> Self {
        Self { simulator }
    }

    /// Returns the simulator used for both branches.
    #[inline]
    pub fn simulator(&self) -> &LossSimulator {
        &self.simulator
    }

    /// Runs baseline and stressed simulations and builds the report.
    ///
    /// All inputs are validated before `rng` is touched.
    ///
    /// # Errors
    ///
    /// - `InvalidStressMultiplier` if the multiplier is not finite and
    ///   positive
    /// - any error from [`LossSimulator::simulate`] or
    ///   [`RiskMetricsCalculator::compute`], unchanged
    pub fn run(
        &self,
        portfolio: &Portfolio,
        scenario_count: usize,
        stress_multiplier: f64,
        rng: &mut CreditRng,
    ) -> Result<StressRunOutput> {
        if !stress_multiplier.is_finite() || stress_multiplier <= 0.0 {
            return Err(EngineError::InvalidStressMultiplier(stress_multiplier));
        }
        self.simulator.validate(portfolio, scenario_count)?;

        info!(
            loans = portfolio.len(),
            scenario_count,
            stress_multiplier,
            seed = rng.seed(),
            "running stress scenario"
        );

        let stressed_portfolio = portfolio.stressed(stress_multiplier);
        let mut base_rng = rng.fork();
        let mut stressed_rng = base_rng.clone();

        let (base, stressed) = rayon::join(
            || self.evaluate(portfolio, scenario_count, &mut base_rng),
            || self.evaluate(&stressed_portfolio, scenario_count, &mut stressed_rng),
        );
        let (base_losses, base_metrics) = base?;
        let (stressed_losses, stressed_metrics) = stressed?;

        debug!(
            base_mean = base_metrics.mean_loss,
            stressed_mean = stressed_metrics.mean_loss,
            "stress scenario complete"
        );

        Ok(StressRunOutput {
            report: ComparisonReport::new(&base_metrics, &stressed_metrics),
            base_metrics,
            stressed_metrics,
            base_losses,
            stressed_losses,
        })
    }

    fn evaluate(
        &self,
        portfolio: &Portfolio,
        scenario_count: usize,
        rng: &mut CreditRng,
    ) -> Result<(ScenarioLosses, RiskMetrics)> {
        let losses = self.simulator.simulate(portfolio, scenario_count, rng)?;
        let metrics = RiskMetricsCalculator::compute(&losses)?;
        Ok((losses, metrics))
    }
}
