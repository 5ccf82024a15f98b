//! Loan records.

use super::error::PortfolioError;

#[inline]
fn is_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// A single loan as seen by the simulation engine.
///
/// Holds the probability of default (PD), the loss given default (LGD)
/// fraction and the exposure at default (EAD). The loss realised when
/// the loan defaults is fixed at construction: `exposure × lgd`.
///
/// # Examples
///
/// ```
/// use credit_engine::portfolio::LoanRecord;
///
/// let loan = LoanRecord::new(0.02, 0.5, 10_000.0).unwrap();
/// assert_eq!(loan.loss_if_default(), 5_000.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanRecord {
    probability_of_default: f64,
    loss_given_default: f64,
    exposure: f64,
    loss_if_default: f64,
}

impl LoanRecord {
    /// Creates a loan record from PD, LGD fraction and exposure.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError` if:
    /// - PD or LGD is outside [0, 1] (NaN included)
    /// - exposure is negative or not finite
    pub fn new(
        probability_of_default: f64,
        loss_given_default: f64,
        exposure: f64,
    ) -> Result<Self, PortfolioError> {
        if !is_unit_interval(probability_of_default) {
            return Err(PortfolioError::InvalidProbability(probability_of_default));
        }
        if !is_unit_interval(loss_given_default) {
            return Err(PortfolioError::InvalidLossGivenDefault(loss_given_default));
        }
        if !exposure.is_finite() || exposure < 0.0 {
            return Err(PortfolioError::InvalidExposure(exposure));
        }
        Ok(Self {
            probability_of_default,
            loss_given_default,
            exposure,
            loss_if_default: exposure * loss_given_default,
        })
    }

    /// Creates a loan record from a PD and a precomputed loss if default.
    ///
    /// The record is stored with an LGD of 1 and the loss as exposure, so
    /// `loss_if_default()` returns the supplied value unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use credit_engine::portfolio::LoanRecord;
    ///
    /// let loan = LoanRecord::with_loss_if_default(1.0, 500.0).unwrap();
    /// assert_eq!(loan.loss_if_default(), 500.0);
    /// ```
    pub fn with_loss_if_default(
        probability_of_default: f64,
        loss_if_default: f64,
    ) -> Result<Self, PortfolioError> {
        if !loss_if_default.is_finite() || loss_if_default < 0.0 {
            return Err(PortfolioError::InvalidLossIfDefault(loss_if_default));
        }
        Self::new(probability_of_default, 1.0, loss_if_default)
    }

    /// Bypasses validation so engine tests can feed out-of-range PDs.
    #[cfg(test)]
    pub(crate) fn with_raw_probability(probability_of_default: f64, loss_if_default: f64) -> Self {
        Self {
            probability_of_default,
            loss_given_default: 1.0,
            exposure: loss_if_default,
            loss_if_default,
        }
    }

    /// Probability of default over the modelled horizon.
    #[inline]
    pub fn probability_of_default(&self) -> f64 {
        self.probability_of_default
    }

    /// Fraction of exposure lost on default.
    #[inline]
    pub fn loss_given_default(&self) -> f64 {
        self.loss_given_default
    }

    /// Exposure at default.
    #[inline]
    pub fn exposure(&self) -> f64 {
        self.exposure
    }

    /// Loss realised if this loan defaults.
    #[inline]
    pub fn loss_if_default(&self) -> f64 {
        self.loss_if_default
    }

    /// Returns a copy with the PD scaled by `multiplier` and capped at 1.
    ///
    /// Every other field is carried over unchanged.
    pub fn stressed(&self, multiplier: f64) -> Self {
        Self {
            probability_of_default: (self.probability_of_default * multiplier).min(1.0),
            ..self.clone()
        }
    }
}
