//! Credit grade to probability-of-default mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, Result};

/// Default one-year PD per letter grade.
pub const DEFAULT_GRADE_PDS: [(&str, f64); 7] = [
    ("A", 0.01),
    ("B", 0.02),
    ("C", 0.04),
    ("D", 0.07),
    ("E", 0.12),
    ("F", 0.20),
    ("G", 0.30),
];

/// Lookup table from grade label to probability of default.
///
/// Labels are matched exactly (case-sensitive). Rows whose grade is not in
/// the table are dropped by the loader.
///
/// # Examples
///
/// ```
/// use adapter_loans::GradeTable;
///
/// let table = GradeTable::default();
/// assert_eq!(table.probability("C"), Some(0.04));
/// assert_eq!(table.probability("H"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct GradeTable {
    probabilities: BTreeMap<String, f64>,
}

impl Default for GradeTable {
    fn default() -> Self {
        Self {
            probabilities: DEFAULT_GRADE_PDS
                .iter()
                .map(|&(grade, pd)| (grade.to_string(), pd))
                .collect(),
        }
    }
}

impl GradeTable {
    /// Builds a table from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGradeProbability` for any PD outside [0, 1].
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut probabilities = BTreeMap::new();
        for (grade, pd) in entries {
            let grade = grade.into();
            if !(0.0..=1.0).contains(&pd) {
                return Err(LoaderError::InvalidGradeProbability { grade, value: pd });
            }
            probabilities.insert(grade, pd);
        }
        Ok(Self { probabilities })
    }

    /// PD for `grade`, if mapped.
    #[inline]
    pub fn probability(&self, grade: &str) -> Option<f64> {
        self.probabilities.get(grade).copied()
    }

    /// Number of mapped grades.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Whether no grade is mapped.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Iterates over `(grade, pd)` in grade order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.probabilities.iter().map(|(g, &pd)| (g.as_str(), pd))
    }
}

impl TryFrom<BTreeMap<String, f64>> for GradeTable {
    type Error = LoaderError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self> {
        Self::new(map)
    }
}

impl From<GradeTable> for BTreeMap<String, f64> {
    fn from(table: GradeTable) -> Self {
        table.probabilities
    }
}
