//! Tail-risk statistics over simulated scenario losses.
//!
//! - Mean loss
//! - Value-at-Risk at 95% and 99% (linear-interpolated percentiles)
//! - Expected Shortfall at 95% and 99% (mean of losses at or above VaR)
//! - Worst-case loss

mod calculator;

pub use calculator::{percentile, RiskMetricsCalculator};

/// Names of the reported risk metrics, in report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetricName {
    /// Arithmetic mean of scenario losses.
    MeanLoss,
    /// 95th percentile loss.
    Var95,
    /// 99th percentile loss.
    Var99,
    /// Mean of losses at or above VaR 95%.
    Es95,
    /// Mean of losses at or above VaR 99%.
    Es99,
    /// Largest scenario loss.
    WorstCaseLoss,
}

impl MetricName {
    /// Every metric, in report order.
    pub const ALL: [MetricName; 6] = [
        MetricName::MeanLoss,
        MetricName::Var95,
        MetricName::Var99,
        MetricName::Es95,
        MetricName::Es99,
        MetricName::WorstCaseLoss,
    ];

    /// Display label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            MetricName::MeanLoss => "Mean Loss",
            MetricName::Var95 => "VaR 95%",
            MetricName::Var99 => "VaR 99%",
            MetricName::Es95 => "ES 95%",
            MetricName::Es99 => "ES 99%",
            MetricName::WorstCaseLoss => "Worst Case Loss",
        }
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary statistics of one loss distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetrics {
    /// Arithmetic mean loss.
    pub mean_loss: f64,
    /// Value-at-Risk, 95% confidence.
    pub var_95: f64,
    /// Value-at-Risk, 99% confidence.
    pub var_99: f64,
    /// Expected Shortfall, 95% confidence.
    pub es_95: f64,
    /// Expected Shortfall, 99% confidence.
    pub es_99: f64,
    /// Maximum scenario loss.
    pub worst_case_loss: f64,
}

impl RiskMetrics {
    /// Returns the value of a metric by name.
    pub fn get(&self, name: MetricName) -> f64 {
        match name {
            MetricName::MeanLoss => self.mean_loss,
            MetricName::Var95 => self.var_95,
            MetricName::Var99 => self.var_99,
            MetricName::Es95 => self.es_95,
            MetricName::Es99 => self.es_99,
            MetricName::WorstCaseLoss => self.worst_case_loss,
        }
    }

    /// `(name, value)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricName, f64)> + '_ {
        MetricName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}
