//! Run command implementation
//!
//! Loads the loan tape, runs the baseline and stressed simulations and
//! writes the reports.

use std::path::PathBuf;

use adapter_loans::LoanLoader;
use clap::Args;
use credit_engine::mc::LossSimulator;
use credit_engine::stress::{StressRunOutput, StressScenarioRunner};
use tracing::info;

use crate::config::{AppConfig, Execution};
use crate::output::{self, OutputFormat, ReportFiles};
use crate::Result;

/// Flags of the `run` command. Each one overrides the configuration file.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Path to the loan CSV
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Number of Monte Carlo scenarios
    #[arg(short = 'n', long)]
    pub scenarios: Option<usize>,

    /// Factor applied to every probability of default in the stressed run
    #[arg(short = 'm', long)]
    pub stress_multiplier: Option<f64>,

    /// Root seed of the simulation
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Scenario loop execution strategy
    #[arg(short, long, value_enum)]
    pub execution: Option<Execution>,

    /// Scenarios per batch in parallel mode
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Output directory for report files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Summary format on stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Skip writing report files
    #[arg(long)]
    pub no_write: bool,
}

impl RunArgs {
    /// Applies the flags on top of `config`.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(input) = &self.input {
            config.data.input = input.clone();
        }
        if let Some(n) = self.scenarios {
            config.simulation.scenario_count = n;
        }
        if let Some(m) = self.stress_multiplier {
            config.simulation.stress_multiplier = m;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(execution) = self.execution {
            config.simulation.execution = execution;
        }
        if let Some(batch_size) = self.batch_size {
            config.simulation.batch_size = batch_size;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        config
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Engine output.
    pub output: StressRunOutput,
    /// Root seed actually used.
    pub seed: u64,
    /// Files written, if any.
    pub files: Option<ReportFiles>,
}

/// Executes the full pipeline for a validated configuration.
pub fn execute(config: &AppConfig, write_files: bool) -> Result<RunOutcome> {
    config.validate()?;

    let loaded = LoanLoader::new(config.loader_config()).load_path(&config.data.input)?;
    let simulation = config.simulation_config()?;
    let mut rng = simulation.rng();
    let seed = rng.seed();

    info!(
        loans = loaded.portfolio.len(),
        scenarios = simulation.scenario_count(),
        stress_multiplier = config.simulation.stress_multiplier,
        seed,
        execution = ?simulation.execution(),
        "starting simulation"
    );

    let runner = StressScenarioRunner::new(LossSimulator::new(simulation.execution()));
    let output = runner.run(
        &loaded.portfolio,
        simulation.scenario_count(),
        config.simulation.stress_multiplier,
        &mut rng,
    )?;

    info!(
        var_95 = output.base_metrics.var_95,
        var_99 = output.base_metrics.var_99,
        "baseline VaR levels"
    );

    let files = if write_files {
        let files = output::write_reports(
            &config.output.dir,
            &output.report,
            &output.base_losses,
            config.output.histogram_bins,
        )?;
        info!(
            summary = %files.summary.display(),
            histogram = %files.histogram.display(),
            "reports written"
        );
        Some(files)
    } else {
        None
    };

    Ok(RunOutcome {
        output,
        seed,
        files,
    })
}

/// Run the run command
pub fn run(config: AppConfig, args: &RunArgs) -> Result<()> {
    let config = args.apply(config);
    let outcome = execute(&config, !args.no_write)?;

    println!("Simulation completed.");
    println!("{}", output::render(&outcome.output.report, args.format)?);
    info!(seed = outcome.seed, "rerun with --seed to reproduce");
    if let Some(files) = &outcome.files {
        info!(dir = %config.output.dir.display(), summary = %files.summary.display(), "done");
    }
    Ok(())
}
