//! Credit Risk CLI - Portfolio Stress Testing
//!
//! Operational entry point for the credit loss engine.
//!
//! # Commands
//!
//! - `credit-risk run` - Simulate baseline and stressed losses and write reports
//! - `credit-risk check` - Validate configuration and the loan tape
//!
//! # Configuration
//!
//! Settings are resolved in order: built-in defaults, `credit-risk.toml`,
//! `CREDIT_RISK_*` environment variables, then command-line flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::run::RunArgs;
use config::{AppConfig, DEFAULT_CONFIG_FILE};

/// Credit portfolio Monte Carlo stress testing
#[derive(Parser)]
#[command(name = "credit-risk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run baseline and stressed simulations and write the reports
    Run(RunArgs),

    /// Check configuration and input data
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = AppConfig::load_or_default(&cli.config)?.with_env_override();
    debug!(path = %cli.config.display(), ?config, "configuration resolved");

    match cli.command {
        Commands::Run(args) => commands::run::run(config, &args),
        Commands::Check => commands::check::run(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "credit-risk",
            "-v",
            "run",
            "--input",
            "loans.csv",
            "-n",
            "5000",
            "-m",
            "2.0",
            "--execution",
            "parallel",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.input, Some(PathBuf::from("loans.csv")));
                assert_eq!(args.scenarios, Some(5000));
                assert_eq!(args.stress_multiplier, Some(2.0));
                assert_eq!(args.execution, Some(config::Execution::Parallel));
                assert_eq!(args.format, output::OutputFormat::Json);
            }
            Commands::Check => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_check_with_config() {
        let cli = Cli::try_parse_from(["credit-risk", "check", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert!(matches!(cli.command, Commands::Check));
    }
}
