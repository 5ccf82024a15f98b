//! # Loan Adapter
//!
//! Data preparation for the credit engine: turns a raw loan tape into a
//! [`Portfolio`](credit_engine::portfolio::Portfolio).
//!
//! ## Modules
//!
//! - [`grade`]: grade to probability-of-default lookup
//! - [`loader`]: CSV cleaning and LGD assignment
//! - [`error`]: loader errors
//!
//! The grade table and the LGD stream are explicit configuration. The
//! engine never sees grades, only the derived numeric fields.

#![warn(missing_docs)]

pub mod error;
pub mod grade;
pub mod loader;

pub use error::{LoaderError, Result};
pub use grade::{GradeTable, DEFAULT_GRADE_PDS};
pub use loader::{
    load_portfolio, LgdRange, LoadedPortfolio, LoanLoader, LoaderConfig, DEFAULT_LGD_SEED,
};
