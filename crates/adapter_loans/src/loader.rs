//! Loan tape loader.
//!
//! Reads a loan CSV, drops unusable rows, maps grades to PDs and assigns
//! each surviving loan a loss-given-default fraction drawn uniformly from
//! a configurable range with a dedicated seeded stream.
//!
//! Rows are dropped, in this order, when:
//! 1. `loan_amount`, `interest_rate`, `grade` or `loan_status` is empty
//! 2. `loan_amount` or `interest_rate` is not a finite number
//! 3. `loan_amount` is negative
//! 4. `grade` has no entry in the [`GradeTable`]
//!
//! LGDs are drawn only after cleaning, one per surviving row in file order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use credit_engine::portfolio::{LoanRecord, Portfolio};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LoaderError, Result};
use crate::grade::GradeTable;

/// Columns the loader requires in the header row.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "loan_amount",
    "interest_rate",
    "grade",
    "sub_grade",
    "loan_status",
];

/// Default seed of the LGD stream.
pub const DEFAULT_LGD_SEED: u64 = 42;

/// Half-open range `[low, high)` from which LGD fractions are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LgdRange {
    /// Inclusive lower bound.
    pub low: f64,
    /// Exclusive upper bound.
    pub high: f64,
}

impl Default for LgdRange {
    fn default() -> Self {
        Self {
            low: 0.4,
            high: 0.6,
        }
    }
}

impl LgdRange {
    /// Checks `0 <= low < high <= 1`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLgdRange` otherwise.
    pub fn validate(&self) -> Result<()> {
        let ok = self.low >= 0.0 && self.high <= 1.0 && self.low < self.high;
        if ok {
            Ok(())
        } else {
            Err(LoaderError::InvalidLgdRange {
                low: self.low,
                high: self.high,
            })
        }
    }
}

/// Loader settings.
#[derive(Clone, Debug, PartialEq)]
pub struct LoaderConfig {
    /// Grade to PD mapping.
    pub grades: GradeTable,
    /// LGD sampling range.
    pub lgd_range: LgdRange,
    /// Seed of the LGD stream.
    pub lgd_seed: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            grades: GradeTable::default(),
            lgd_range: LgdRange::default(),
            lgd_seed: DEFAULT_LGD_SEED,
        }
    }
}

/// Portfolio built from a loan tape, with cleaning statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedPortfolio {
    /// Loans in file order.
    pub portfolio: Portfolio,
    /// Data rows read (header excluded).
    pub rows_read: usize,
    /// Rows removed during cleaning.
    pub rows_dropped: usize,
}

/// Raw row as found in the file. Every field is optional so that missing
/// values count as drops instead of parse failures. `sub_grade` must be
/// present in the header but is not used.
#[derive(Debug, Deserialize)]
struct RawLoanRow {
    loan_amount: Option<String>,
    interest_rate: Option<String>,
    grade: Option<String>,
    loan_status: Option<String>,
}

/// A row that survived cleaning, before LGD assignment.
struct CleanRow {
    amount: f64,
    pd: f64,
}

#[derive(Debug, Default)]
struct DropCounts {
    missing_field: usize,
    not_numeric: usize,
    negative_amount: usize,
    unknown_grade: usize,
}

impl DropCounts {
    fn total(&self) -> usize {
        self.missing_field + self.not_numeric + self.negative_amount + self.unknown_grade
    }
}

/// Builds portfolios from loan CSV files.
///
/// # Examples
///
/// ```
/// use adapter_loans::LoanLoader;
///
/// let csv = "\
/// loan_amount,interest_rate,grade,sub_grade,loan_status
/// 10000,0.11,B,B2,Current
/// 5000,0.19,E,E1,Fully Paid
/// ";
///
/// let loaded = LoanLoader::default().load_reader(csv.as_bytes()).unwrap();
/// assert_eq!(loaded.portfolio.len(), 2);
/// assert_eq!(loaded.portfolio.loans()[1].probability_of_default(), 0.12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoanLoader {
    config: LoaderConfig,
}

impl LoanLoader {
    /// Creates a loader with the given settings.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Loads a portfolio from a CSV file.
    ///
    /// # Errors
    ///
    /// See [`load_reader`](Self::load_reader); additionally `Io` if the file
    /// cannot be opened.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<LoadedPortfolio> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loading loan tape");
        self.load_reader(file)
    }

    /// Loads a portfolio from any CSV byte stream with a header row.
    ///
    /// # Errors
    ///
    /// - `InvalidLgdRange` if the configured LGD range is unusable
    /// - `MissingColumn` if a required column is absent
    /// - `Csv` if the stream is malformed
    /// - `NoUsableRows` if every row is dropped
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<LoadedPortfolio> {
        self.config.lgd_range.validate()?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|&&col| !headers.iter().any(|h| h == col))
        {
            return Err(LoaderError::MissingColumn(*missing));
        }

        let mut rows_read = 0;
        let mut drops = DropCounts::default();
        let mut clean = Vec::new();

        for record in csv_reader.deserialize::<RawLoanRow>() {
            let row = record?;
            rows_read += 1;
            match self.clean_row(row) {
                Ok(row) => clean.push(row),
                Err(reason) => reason.record(&mut drops),
            }
        }

        debug!(
            missing_field = drops.missing_field,
            not_numeric = drops.not_numeric,
            negative_amount = drops.negative_amount,
            unknown_grade = drops.unknown_grade,
            "cleaned loan tape"
        );

        if clean.is_empty() {
            return Err(LoaderError::NoUsableRows { rows_read });
        }

        let lgd = Uniform::new(self.config.lgd_range.low, self.config.lgd_range.high);
        let mut rng = StdRng::seed_from_u64(self.config.lgd_seed);

        let portfolio = clean
            .into_iter()
            .map(|row| LoanRecord::new(row.pd, lgd.sample(&mut rng), row.amount))
            .collect::<std::result::Result<Portfolio, _>>()?;

        let rows_dropped = drops.total();
        info!(
            rows_read,
            rows_dropped,
            loans = portfolio.len(),
            total_loss_if_default = portfolio.total_loss_if_default(),
            "loan tape loaded"
        );

        Ok(LoadedPortfolio {
            portfolio,
            rows_read,
            rows_dropped,
        })
    }

    fn clean_row(&self, row: RawLoanRow) -> std::result::Result<CleanRow, DropReason> {
        let (Some(amount), Some(rate), Some(grade), Some(_status)) = (
            non_empty(row.loan_amount),
            non_empty(row.interest_rate),
            non_empty(row.grade),
            non_empty(row.loan_status),
        ) else {
            return Err(DropReason::MissingField);
        };

        let (Some(amount), Some(_rate)) = (parse_number(&amount), parse_number(&rate)) else {
            return Err(DropReason::NotNumeric);
        };
        if amount < 0.0 {
            return Err(DropReason::NegativeAmount);
        }

        let pd = self
            .config
            .grades
            .probability(&grade)
            .ok_or(DropReason::UnknownGrade)?;

        Ok(CleanRow { amount, pd })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DropReason {
    MissingField,
    NotNumeric,
    NegativeAmount,
    UnknownGrade,
}

impl DropReason {
    fn record(self, counts: &mut DropCounts) {
        match self {
            Self::MissingField => counts.missing_field += 1,
            Self::NotNumeric => counts.not_numeric += 1,
            Self::NegativeAmount => counts.negative_amount += 1,
            Self::UnknownGrade => counts.unknown_grade += 1,
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

fn parse_number(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Loads a portfolio from `path` with default settings.
///
/// # Errors
///
/// See [`LoanLoader::load_path`].
pub fn load_portfolio(path: impl AsRef<Path>) -> Result<LoadedPortfolio> {
    LoanLoader::default().load_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER: &str = "loan_amount,interest_rate,grade,sub_grade,loan_status\n";

    fn load(body: &str) -> Result<LoadedPortfolio> {
        LoanLoader::default().load_reader(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn test_grade_mapping_and_exposure() {
        let loaded = load("1000,0.1,A,A1,Current\n2000,0.2,G,G5,Charged Off\n").unwrap();
        let loans = loaded.portfolio.loans();

        assert_eq!(loaded.rows_read, 2);
        assert_eq!(loaded.rows_dropped, 0);
        assert_eq!(loans[0].probability_of_default(), 0.01);
        assert_eq!(loans[1].probability_of_default(), 0.30);
        assert_eq!(loans[0].exposure(), 1000.0);
        assert_eq!(loans[1].exposure(), 2000.0);
    }

    #[test]
    fn test_lgd_within_range_and_loss_consistent() {
        let body: String = (0..200)
            .map(|i| format!("{},0.1,C,C1,Current\n", 1000 + i))
            .collect();
        let loaded = load(&body).unwrap();

        for loan in loaded.portfolio.iter() {
            let lgd = loan.loss_given_default();
            assert!((0.4..0.6).contains(&lgd), "lgd={}", lgd);
            assert_relative_eq!(
                loan.loss_if_default(),
                loan.exposure() * lgd,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_lgd_draws_follow_seeded_stream() {
        let loaded = load("1000,0.1,A,A1,Current\n500,0.1,B,B1,Current\n").unwrap();

        let dist = Uniform::new(0.4, 0.6);
        let mut rng = StdRng::seed_from_u64(DEFAULT_LGD_SEED);
        for loan in loaded.portfolio.iter() {
            assert_eq!(loan.loss_given_default(), dist.sample(&mut rng));
        }
    }

    #[test]
    fn test_dropped_rows_do_not_consume_draws() {
        let with_drops = load("1000,0.1,A,A1,Current\n,0.1,B,B1,Current\n500,0.1,B,B1,Current\n")
            .unwrap();
        let without = load("1000,0.1,A,A1,Current\n500,0.1,B,B1,Current\n").unwrap();

        assert_eq!(with_drops.rows_dropped, 1);
        assert_eq!(with_drops.portfolio, without.portfolio);
    }

    #[test]
    fn test_drop_rules() {
        let body = "\
1000,0.1,A,A1,Current
,0.1,A,A1,Current
1000,,A,A1,Current
1000,0.1,,A1,Current
1000,0.1,A,A1,
abc,0.1,A,A1,Current
1000,n/a,A,A1,Current
-50,0.1,A,A1,Current
1000,0.1,Z,Z1,Current
1000,0.1,a,a1,Current
2500,0.1,F,,Current
";
        let loaded = load(body).unwrap();

        assert_eq!(loaded.rows_read, 11);
        assert_eq!(loaded.rows_dropped, 9);
        assert_eq!(loaded.portfolio.len(), 2);
        // Missing sub_grade is tolerated.
        assert_eq!(loaded.portfolio.loans()[1].probability_of_default(), 0.20);
    }

    #[test]
    fn test_extra_columns_and_whitespace() {
        let csv = "id,loan_amount,interest_rate,grade,sub_grade,loan_status,term\n\
                   7, 1500 , 0.13 , D ,D3,Current,36\n";
        let loaded = LoanLoader::default().load_reader(csv.as_bytes()).unwrap();

        assert_eq!(loaded.portfolio.len(), 1);
        assert_eq!(loaded.portfolio.loans()[0].probability_of_default(), 0.07);
        assert_eq!(loaded.portfolio.loans()[0].exposure(), 1500.0);
    }

    #[test]
    fn test_missing_column() {
        let csv = "loan_amount,interest_rate,grade,loan_status\n1000,0.1,A,Current\n";
        let result = LoanLoader::default().load_reader(csv.as_bytes());
        assert!(matches!(result, Err(LoaderError::MissingColumn("sub_grade"))));
    }

    #[test]
    fn test_no_usable_rows() {
        let result = load("1000,0.1,Z,Z1,Current\n");
        assert!(matches!(result, Err(LoaderError::NoUsableRows { rows_read: 1 })));

        let result = load("");
        assert!(matches!(result, Err(LoaderError::NoUsableRows { rows_read: 0 })));
    }

    #[test]
    fn test_invalid_lgd_range() {
        let loader = LoanLoader::new(LoaderConfig {
            lgd_range: LgdRange {
                low: 0.6,
                high: 0.6,
            },
            ..LoaderConfig::default()
        });
        let result = loader.load_reader(format!("{HEADER}1000,0.1,A,A1,Current\n").as_bytes());
        assert!(matches!(result, Err(LoaderError::InvalidLgdRange { .. })));
    }

    #[test]
    fn test_custom_grades_and_seed() {
        let loader = LoanLoader::new(LoaderConfig {
            grades: GradeTable::new([("A", 0.5)]).unwrap(),
            lgd_seed: 7,
            ..LoaderConfig::default()
        });
        let csv = format!("{HEADER}1000,0.1,A,A1,Current\n1000,0.1,B,B1,Current\n");
        let loaded = loader.load_reader(csv.as_bytes()).unwrap();

        assert_eq!(loaded.portfolio.len(), 1);
        assert_eq!(loaded.portfolio.loans()[0].probability_of_default(), 0.5);

        let default_seed = LoanLoader::default().load_reader(csv.as_bytes()).unwrap();
        assert_ne!(
            loaded.portfolio.loans()[0].loss_given_default(),
            default_seed.portfolio.loans()[0].loss_given_default()
        );
    }
}
