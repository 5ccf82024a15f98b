//! Base-versus-stressed comparison report.

use crate::metrics::{MetricName, RiskMetrics};

/// One metric under both scenarios.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricComparison {
    /// Metric name.
    pub metric: MetricName,
    /// Value under the baseline probabilities.
    pub base: f64,
    /// Value under the stressed probabilities.
    pub stressed: f64,
}

impl MetricComparison {
    /// Stressed minus base.
    #[inline]
    pub fn change(&self) -> f64 {
        self.stressed - self.base
    }
}

/// Side-by-side risk metrics, one entry per metric in report order.
///
/// # Examples
///
/// ```
/// use credit_engine::metrics::{MetricName, RiskMetrics};
/// use credit_engine::stress::ComparisonReport;
///
/// let base = RiskMetrics {
///     mean_loss: 1.0, var_95: 2.0, var_99: 3.0,
///     es_95: 2.5, es_99: 3.5, worst_case_loss: 4.0,
/// };
/// let stressed = RiskMetrics { mean_loss: 1.5, ..base };
///
/// let report = ComparisonReport::new(&base, &stressed);
/// assert_eq!(report.get(MetricName::MeanLoss).map(|c| c.stressed), Some(1.5));
/// assert_eq!(report.entries().len(), 6);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonReport {
    entries: Vec<MetricComparison>,
}

impl ComparisonReport {
    /// Pairs every metric of `base` with the same metric of `stressed`.
    pub fn new(base: &RiskMetrics, stressed: &RiskMetrics) -> Self {
        let entries = MetricName::ALL
            .into_iter()
            .map(|metric| MetricComparison {
                metric,
                base: base.get(metric),
                stressed: stressed.get(metric),
            })
            .collect();
        Self { entries }
    }

    /// Entries in report order.
    #[inline]
    pub fn entries(&self) -> &[MetricComparison] {
        &self.entries
    }

    /// Iterates over entries in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, MetricComparison> {
        self.entries.iter()
    }

    /// Looks up one metric.
    pub fn get(&self, metric: MetricName) -> Option<&MetricComparison> {
        self.entries.iter().find(|c| c.metric == metric)
    }
}

impl<'a> IntoIterator for &'a ComparisonReport {
    type Item = &'a MetricComparison;
    type IntoIter = std::slice::Iter<'a, MetricComparison>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scale: f64) -> RiskMetrics {
        RiskMetrics {
            mean_loss: 1.0 * scale,
            var_95: 2.0 * scale,
            var_99: 3.0 * scale,
            es_95: 4.0 * scale,
            es_99: 5.0 * scale,
            worst_case_loss: 6.0 * scale,
        }
    }

    #[test]
    fn test_report_pairs_every_metric() {
        let report = ComparisonReport::new(&metrics(1.0), &metrics(2.0));
        let names: Vec<MetricName> = report.iter().map(|c| c.metric).collect();
        assert_eq!(names, MetricName::ALL.to_vec());

        for entry in &report {
            assert_eq!(entry.stressed, entry.base * 2.0);
            assert_eq!(entry.change(), entry.base);
        }
    }

    #[test]
    fn test_get_single_metric() {
        let report = ComparisonReport::new(&metrics(1.0), &metrics(3.0));
        let worst = report.get(MetricName::WorstCaseLoss).unwrap();
        assert_eq!((worst.base, worst.stressed), (6.0, 18.0));
        assert_eq!(worst.change(), 12.0);
    }
}
