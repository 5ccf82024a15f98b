//! Monte Carlo default simulation.
//!
//! Each scenario resolves every loan with an independent Bernoulli draw:
//! a uniform `u` in [0, 1) is drawn per loan and the loan defaults iff
//! `u < pd`. The scenario loss is the sum of `loss_if_default` over the
//! defaulted loans, accumulated in portfolio order.

use tracing::debug;

use super::config::ExecutionMode;
use super::losses::ScenarioLosses;
use crate::error::{EngineError, Result};
use crate::parallel::{batch_count, process_batches_mut};
use crate::portfolio::{LoanRecord, Portfolio};
use crate::rng::CreditRng;

/// Draws scenario default indicators and aggregates portfolio loss.
///
/// # Examples
///
/// ```rust
/// use credit_engine::mc::LossSimulator;
/// use credit_engine::portfolio::{LoanRecord, Portfolio};
/// use credit_engine::rng::CreditRng;
///
/// let portfolio = Portfolio::new(vec![LoanRecord::with_loss_if_default(1.0, 500.0).unwrap()]);
/// let mut rng = CreditRng::from_seed(42);
///
/// let losses = LossSimulator::default().simulate(&portfolio, 3, &mut rng).unwrap();
/// assert_eq!(losses.as_slice(), &[500.0, 500.0, 500.0]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LossSimulator {
    execution: ExecutionMode,
}

impl LossSimulator {
    /// Creates a simulator with the given execution mode.
    pub fn new(execution: ExecutionMode) -> Self {
        Self { execution }
    }

    /// Returns the execution mode.
    #[inline]
    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }

    /// Simulates `scenario_count` independent scenarios.
    ///
    /// Validation completes before the first draw, so on error `rng` has
    /// not been advanced.
    ///
    /// # Errors
    ///
    /// - `EmptyPortfolio` if the portfolio holds no loans
    /// - `InvalidScenarioCount` if `scenario_count` is zero
    /// - `InvalidProbability` if any PD lies outside [0, 1]
    /// - `InvalidConfig` if the parallel batch size is zero
    pub fn simulate(
        &self,
        portfolio: &Portfolio,
        scenario_count: usize,
        rng: &mut CreditRng,
    ) -> Result<ScenarioLosses> {
        self.validate(portfolio, scenario_count)?;

        debug!(
            loans = portfolio.len(),
            scenario_count,
            execution = ?self.execution,
            seed = rng.seed(),
            "simulating portfolio losses"
        );

        let loans = portfolio.loans();
        let mut losses = vec![0.0; scenario_count];

        match self.execution {
            ExecutionMode::Sequential => fill_scenarios(loans, &mut losses, rng),
            ExecutionMode::Parallel { batch_size } => {
                let seeds: Vec<u64> = (0..batch_count(scenario_count, batch_size))
                    .map(|_| rng.next_seed())
                    .collect();

                process_batches_mut(&mut losses, batch_size, |batch, _, chunk| {
                    let mut batch_rng = CreditRng::from_seed(seeds[batch]);
                    fill_scenarios(loans, chunk, &mut batch_rng);
                });
            }
        }

        Ok(ScenarioLosses::new(losses))
    }

    /// Checks the inputs [`simulate`](Self::simulate) would reject,
    /// without drawing.
    ///
    /// # Errors
    ///
    /// Same as [`simulate`](Self::simulate).
    pub fn validate(&self, portfolio: &Portfolio, scenario_count: usize) -> Result<()> {
        if portfolio.is_empty() {
            return Err(EngineError::EmptyPortfolio);
        }
        if scenario_count == 0 {
            return Err(EngineError::InvalidScenarioCount(scenario_count));
        }
        if let Some((index, loan)) = portfolio
            .iter()
            .enumerate()
            .find(|(_, loan)| !(0.0..=1.0).contains(&loan.probability_of_default()))
        {
            return Err(EngineError::InvalidProbability {
                index,
                value: loan.probability_of_default(),
            });
        }
        self.execution.validate()
    }
}

/// Fills `out` scenario by scenario from a single stream.
fn fill_scenarios(loans: &[LoanRecord], out: &mut [f64], rng: &mut CreditRng) {
    let mut draws = vec![0.0; loans.len()];
    for slot in out.iter_mut() {
        rng.fill_uniform(&mut draws);
        *slot = scenario_loss(loans, &draws);
    }
}

#[inline]
fn scenario_loss(loans: &[LoanRecord], draws: &[f64]) -> f64 {
    loans
        .iter()
        .zip(draws)
        .filter(|(loan, &u)| u < loan.probability_of_default())
        .fold(0.0, |acc, (loan, _)| acc + loan.loss_if_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(pd: f64, loss: f64) -> LoanRecord {
        LoanRecord::with_loss_if_default(pd, loss).unwrap()
    }

    fn mixed_portfolio() -> Portfolio {
        Portfolio::new(vec![
            loan(0.01, 10_000.0),
            loan(0.07, 4_000.0),
            loan(0.20, 2_500.0),
            loan(0.30, 1_000.0),
        ])
    }

    #[test]
    fn test_returns_requested_length() {
        let mut rng = CreditRng::from_seed(42);
        let losses = LossSimulator::default()
            .simulate(&mixed_portfolio(), 1234, &mut rng)
            .unwrap();

        assert_eq!(losses.len(), 1234);
        assert!(losses.iter().all(|&l| l >= 0.0));
    }

    #[test]
    fn test_sequential_draw_order() {
        let portfolio = mixed_portfolio();
        let mut rng = CreditRng::from_seed(7);
        let losses = LossSimulator::default()
            .simulate(&portfolio, 20, &mut rng)
            .unwrap();

        // Replay: one uniform per loan, loans in order, scenarios in order.
        let mut replay = CreditRng::from_seed(7);
        for &actual in losses.iter() {
            let mut expected = 0.0;
            for l in portfolio.iter() {
                if replay.gen_uniform() < l.probability_of_default() {
                    expected += l.loss_if_default();
                }
            }
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_parallel_batches_use_pre_drawn_seeds() {
        let portfolio = mixed_portfolio();
        let simulator = LossSimulator::new(ExecutionMode::Parallel { batch_size: 8 });
        let mut rng = CreditRng::from_seed(11);
        let losses = simulator.simulate(&portfolio, 20, &mut rng).unwrap();

        let mut root = CreditRng::from_seed(11);
        let seeds: Vec<u64> = (0..3).map(|_| root.next_seed()).collect();
        let mut expected = Vec::new();
        for (batch, &seed) in seeds.iter().enumerate() {
            let len = if batch == 2 { 4 } else { 8 };
            let mut chunk = vec![0.0; len];
            fill_scenarios(portfolio.loans(), &mut chunk, &mut CreditRng::from_seed(seed));
            expected.extend(chunk);
        }

        assert_eq!(losses.as_slice(), expected.as_slice());
        // The caller's stream advanced by exactly one seed per batch.
        assert_eq!(rng.gen_uniform(), root.gen_uniform());
    }

    #[test]
    fn test_parallel_is_thread_count_independent() {
        let portfolio = mixed_portfolio();
        let simulator = LossSimulator::new(ExecutionMode::Parallel { batch_size: 16 });

        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| {
                simulator
                    .simulate(&portfolio, 500, &mut CreditRng::from_seed(3))
                    .unwrap()
            });
        let many = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| {
                simulator
                    .simulate(&portfolio, 500, &mut CreditRng::from_seed(3))
                    .unwrap()
            });

        assert_eq!(single, many);
    }

    #[test]
    fn test_zero_probability_never_defaults() {
        let portfolio = Portfolio::new(vec![loan(0.0, 100.0), loan(0.0, 200.0)]);
        let losses = LossSimulator::default()
            .simulate(&portfolio, 1000, &mut CreditRng::from_seed(1))
            .unwrap();

        assert!(losses.iter().all(|&l| l == 0.0));
    }

    #[test]
    fn test_unit_probability_always_defaults() {
        let portfolio = Portfolio::new(vec![loan(1.0, 100.0), loan(1.0, 250.0)]);
        let losses = LossSimulator::new(ExecutionMode::parallel())
            .simulate(&portfolio, 1000, &mut CreditRng::from_seed(1))
            .unwrap();

        assert!(losses.iter().all(|&l| l == 350.0));
    }

    #[test]
    fn test_empty_portfolio_rejected() {
        let result =
            LossSimulator::default().simulate(&Portfolio::default(), 10, &mut CreditRng::from_seed(1));
        assert_eq!(result, Err(EngineError::EmptyPortfolio));
    }

    #[test]
    fn test_zero_scenarios_rejected() {
        let result =
            LossSimulator::default().simulate(&mixed_portfolio(), 0, &mut CreditRng::from_seed(1));
        assert_eq!(result, Err(EngineError::InvalidScenarioCount(0)));
    }

    #[test]
    fn test_out_of_range_probability_rejected_without_drawing() {
        let portfolio = Portfolio::new(vec![
            loan(0.1, 1.0),
            LoanRecord::with_raw_probability(1.5, 1.0),
        ]);
        let mut rng = CreditRng::from_seed(9);
        let result = LossSimulator::default().simulate(&portfolio, 10, &mut rng);

        assert_eq!(
            result,
            Err(EngineError::InvalidProbability {
                index: 1,
                value: 1.5
            })
        );
        assert_eq!(rng.gen_uniform(), CreditRng::from_seed(9).gen_uniform());
    }

    #[test]
    fn test_nan_probability_rejected() {
        let portfolio = Portfolio::new(vec![LoanRecord::with_raw_probability(f64::NAN, 1.0)]);
        let result = LossSimulator::default().simulate(&portfolio, 10, &mut CreditRng::from_seed(9));
        assert!(matches!(
            result,
            Err(EngineError::InvalidProbability { index: 0, .. })
        ));
    }

    #[test]
    fn test_validation_failure_leaves_rng_untouched() {
        let mut rng = CreditRng::from_seed(9);
        let _ = LossSimulator::default().simulate(&mixed_portfolio(), 0, &mut rng);
        assert_eq!(rng.gen_uniform(), CreditRng::from_seed(9).gen_uniform());
    }
}
