//! Risk metric computation.

use tracing::debug;

use super::RiskMetrics;
use crate::error::{EngineError, Result};

/// Computes [`RiskMetrics`] from a sequence of scenario losses.
///
/// # Definitions
///
/// - `VaR_q` is the q-th percentile with linear interpolation between
///   order statistics (rank `q/100 × (n − 1)`).
/// - `ES_q` is the mean of **every** loss greater than or equal to
///   `VaR_q`. Ties at the threshold are all included, so the tail can hold
///   more than `(100 − q)%` of the scenarios when losses cluster there.
///
/// # Examples
///
/// ```
/// use credit_engine::metrics::RiskMetricsCalculator;
///
/// let metrics = RiskMetricsCalculator::compute(&[500.0, 500.0, 500.0]).unwrap();
/// assert_eq!(metrics.var_99, 500.0);
/// assert_eq!(metrics.es_95, 500.0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RiskMetricsCalculator;

impl RiskMetricsCalculator {
    /// Computes mean, VaR, ES and worst case.
    ///
    /// # Errors
    ///
    /// - `EmptyLossSequence` if there are no losses
    /// - `InvalidLoss` if a loss is negative or not finite
    pub fn compute<L>(losses: &L) -> Result<RiskMetrics>
    where
        L: AsRef<[f64]> + ?Sized,
    {
        let losses = losses.as_ref();
        if losses.is_empty() {
            return Err(EngineError::EmptyLossSequence);
        }
        if let Some((index, &value)) = losses
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(EngineError::InvalidLoss { index, value });
        }

        let mut sorted = losses.to_vec();
        sorted.sort_by(f64::total_cmp);

        let var_95 = percentile(&sorted, 95.0).ok_or(EngineError::EmptyLossSequence)?;
        let var_99 = percentile(&sorted, 99.0).ok_or(EngineError::EmptyLossSequence)?;

        let metrics = RiskMetrics {
            mean_loss: shifted_mean(&sorted, sorted[0]),
            var_95,
            var_99,
            es_95: tail_mean(&sorted, var_95),
            es_99: tail_mean(&sorted, var_99),
            worst_case_loss: sorted[sorted.len() - 1],
        };

        debug!(scenarios = losses.len(), ?metrics, "computed risk metrics");
        Ok(metrics)
    }
}

/// Percentile of a **sorted** slice with linear interpolation.
///
/// Uses the closest-ranks definition (Hyndman and Fan type 7) with a
/// two-sided interpolation formula, so equal neighbouring order
/// statistics always interpolate to exactly that value.
///
/// Returns `None` if `sorted` is empty.
///
/// ```
/// use credit_engine::metrics::percentile;
///
/// assert_eq!(percentile(&[1.0, 2.0, 3.0], 50.0), Some(2.0));
/// assert_eq!(percentile(&[], 95.0), None);
/// ```
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    match sorted {
        [] => return None,
        [only] => return Some(*only),
        _ => {}
    }

    let n = sorted.len();
    let rank = (q / 100.0) * (n - 1) as f64;
    let lower = (rank.floor() as usize).min(n - 1);
    let upper = (lower + 1).min(n - 1);
    let t = rank - lower as f64;

    let (a, b) = (sorted[lower], sorted[upper]);
    let diff = b - a;
    if t >= 0.5 {
        Some(b - diff * (1.0 - t))
    } else {
        Some(a + diff * t)
    }
}

/// Mean of the losses at or above `threshold`, taken from a sorted slice.
///
/// Accumulated as offsets from the threshold, so a tail made of values
/// equal to the threshold yields the threshold exactly.
fn tail_mean(sorted: &[f64], threshold: f64) -> f64 {
    let start = sorted.partition_point(|&v| v < threshold);
    shifted_mean(&sorted[start..], threshold)
}

/// Mean of `values` accumulated relative to `origin`.
fn shifted_mean(values: &[f64], origin: f64) -> f64 {
    let offset = values.iter().fold(0.0, |acc, &v| acc + (v - origin));
    origin + offset / values.len() as f64
}
