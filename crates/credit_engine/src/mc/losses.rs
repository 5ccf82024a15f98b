//! Per-scenario portfolio losses.

/// A single equal-width histogram bin.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge (inclusive for the last bin only).
    pub upper: f64,
    /// Number of scenarios falling in the bin.
    pub count: usize,
    /// `count` divided by the number of scenarios.
    pub frequency: f64,
}

/// Total portfolio loss for each simulated scenario, indexed by scenario.
///
/// Produced by [`LossSimulator`](super::LossSimulator) with exactly the
/// requested number of entries, all finite and non-negative.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioLosses {
    values: Vec<f64>,
}

impl ScenarioLosses {
    /// Wraps losses supplied by the caller, e.g. from an external run.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of scenarios.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no scenarios.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Losses in scenario order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over losses in scenario order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Consumes the sequence, returning the underlying buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Buckets the losses into `num_bins` equal-width bins spanning
    /// [min, max].
    ///
    /// Returns an empty vector for an empty sequence or zero bins, and a
    /// single bin when every loss is identical.
    pub fn histogram(&self, num_bins: usize) -> Vec<HistogramBin> {
        if self.values.is_empty() || num_bins == 0 {
            return Vec::new();
        }

        let (min_val, max_val) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let n = self.values.len() as f64;

        if max_val <= min_val {
            return vec![HistogramBin {
                lower: min_val,
                upper: max_val,
                count: self.values.len(),
                frequency: 1.0,
            }];
        }

        let bin_width = (max_val - min_val) / num_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..num_bins)
            .map(|i| HistogramBin {
                lower: min_val + i as f64 * bin_width,
                upper: if i == num_bins - 1 {
                    max_val
                } else {
                    min_val + (i + 1) as f64 * bin_width
                },
                count: 0,
                frequency: 0.0,
            })
            .collect();

        for &val in &self.values {
            let idx = (((val - min_val) / bin_width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        for bin in &mut bins {
            bin.frequency = bin.count as f64 / n;
        }

        bins
    }
}

impl From<Vec<f64>> for ScenarioLosses {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[f64]> for ScenarioLosses {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl<'a> IntoIterator for &'a ScenarioLosses {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_scenario() {
        let losses = ScenarioLosses::new((0..1000).map(|i| i as f64).collect());
        let bins = losses.histogram(50);

        assert_eq!(bins.len(), 50);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 1000);
        let total_freq: f64 = bins.iter().map(|b| b.frequency).sum();
        assert!((total_freq - 1.0).abs() < 1e-10, "total_freq={}", total_freq);
    }

    #[test]
    fn test_histogram_max_lands_in_last_bin() {
        let losses = ScenarioLosses::new(vec![0.0, 0.0, 10.0]);
        let bins = losses.histogram(5);

        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[4].count, 1);
        assert_eq!(bins[4].upper, 10.0);
    }

    #[test]
    fn test_histogram_degenerate() {
        let losses = ScenarioLosses::new(vec![500.0; 3]);
        let bins = losses.histogram(50);

        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[0].frequency, 1.0);
    }

    #[test]
    fn test_histogram_empty() {
        assert!(ScenarioLosses::default().histogram(10).is_empty());
        assert!(ScenarioLosses::new(vec![1.0]).histogram(0).is_empty());
    }

    #[test]
    fn test_accessors() {
        let losses: ScenarioLosses = vec![1.0, 2.0].into();
        assert_eq!(losses.len(), 2);
        assert_eq!(losses.as_slice(), &[1.0, 2.0]);
        assert_eq!(losses.iter().sum::<f64>(), 3.0);
        assert_eq!(losses.into_vec(), vec![1.0, 2.0]);
    }
}
