//! Check command implementation
//!
//! Validates the configuration and the loan tape without simulating.

use adapter_loans::LoanLoader;
use tracing::info;

use crate::config::AppConfig;
use crate::Result;

/// Portfolio statistics reported by `check`.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioCheck {
    /// Data rows in the tape.
    pub rows_read: usize,
    /// Rows dropped during cleaning.
    pub rows_dropped: usize,
    /// Loans kept.
    pub loans: usize,
    /// Sum of exposures.
    pub total_exposure: f64,
    /// Loss if every loan defaults.
    pub total_loss_if_default: f64,
    /// Sum of `pd × loss_if_default`.
    pub expected_loss: f64,
}

/// Validates `config` and loads the portfolio it points at.
pub fn inspect(config: &AppConfig) -> Result<PortfolioCheck> {
    config.validate()?;
    config.simulation_config()?;

    let loaded = LoanLoader::new(config.loader_config()).load_path(&config.data.input)?;
    let portfolio = &loaded.portfolio;

    Ok(PortfolioCheck {
        rows_read: loaded.rows_read,
        rows_dropped: loaded.rows_dropped,
        loans: portfolio.len(),
        total_exposure: portfolio.iter().map(|l| l.exposure()).sum(),
        total_loss_if_default: portfolio.total_loss_if_default(),
        expected_loss: portfolio
            .iter()
            .map(|l| l.probability_of_default() * l.loss_if_default())
            .sum(),
    })
}

/// Run the check command
pub fn run(config: AppConfig) -> Result<()> {
    info!("Checking configuration...");
    let check = inspect(&config)?;

    println!("Configuration OK");
    println!("  Input:              {}", config.data.input.display());
    println!("  Rows read:          {}", check.rows_read);
    println!("  Rows dropped:       {}", check.rows_dropped);
    println!("  Loans:              {}", check.loans);
    println!("  Total exposure:     {:.2}", check.total_exposure);
    println!("  Loss if default:    {:.2}", check.total_loss_if_default);
    println!("  Expected loss:      {:.2}", check.expected_loss);
    println!("  Grades:");
    for (grade, pd) in config.data.grades.iter() {
        println!("    {:<4} {:.4}", grade, pd);
    }
    Ok(())
}
