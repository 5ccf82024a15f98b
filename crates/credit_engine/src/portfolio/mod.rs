//! Loan records and the portfolio container consumed by the simulator.
//!
//! Portfolios are built once by the data-preparation layer and are
//! read-only for the engine. Stressing a portfolio produces a new one.

mod error;
mod loan;

pub use error::PortfolioError;
pub use loan::LoanRecord;

/// Ordered collection of loans.
///
/// The order is significant: the simulator draws one uniform per loan in
/// this order, so reordering loans changes the realised loss sequence for
/// a given seed.
///
/// # Examples
///
/// ```
/// use credit_engine::portfolio::{LoanRecord, Portfolio};
///
/// let portfolio: Portfolio = vec![
///     LoanRecord::new(0.01, 0.5, 10_000.0).unwrap(),
///     LoanRecord::new(0.07, 0.4, 5_000.0).unwrap(),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(portfolio.len(), 2);
/// assert_eq!(portfolio.total_loss_if_default(), 7_000.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Portfolio {
    loans: Vec<LoanRecord>,
}

impl Portfolio {
    /// Wraps an ordered list of loans.
    pub fn new(loans: Vec<LoanRecord>) -> Self {
        Self { loans }
    }

    /// Appends a loan.
    pub fn push(&mut self, loan: LoanRecord) {
        self.loans.push(loan);
    }

    /// Number of loans.
    #[inline]
    pub fn len(&self) -> usize {
        self.loans.len()
    }

    /// Whether the portfolio holds no loans.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    /// Loans in portfolio order.
    #[inline]
    pub fn loans(&self) -> &[LoanRecord] {
        &self.loans
    }

    /// Iterates over loans in portfolio order.
    pub fn iter(&self) -> std::slice::Iter<'_, LoanRecord> {
        self.loans.iter()
    }

    /// Loss if every loan defaults at once.
    pub fn total_loss_if_default(&self) -> f64 {
        self.loans.iter().map(LoanRecord::loss_if_default).sum()
    }

    /// Builds the stressed portfolio: each PD becomes
    /// `min(pd × multiplier, 1.0)`, all other fields unchanged.
    ///
    /// The multiplier is not validated here; the stress runner rejects
    /// non-positive values before calling this.
    pub fn stressed(&self, multiplier: f64) -> Self {
        self.loans.iter().map(|loan| loan.stressed(multiplier)).collect()
    }
}

impl FromIterator<LoanRecord> for Portfolio {
    fn from_iter<I: IntoIterator<Item = LoanRecord>>(iter: I) -> Self {
        Self {
            loans: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a LoanRecord;
    type IntoIter = std::slice::Iter<'a, LoanRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.loans.iter()
    }
}
