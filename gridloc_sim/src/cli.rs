// gridloc_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

use crate::simulation::RunOptions;

/// gridloc: histogram-filter localization on a toroidal color map.
///
/// Runs a scenario file through the filter, or simulates a ground-truth agent
/// on the scenario's map and localizes it from its own noisy readings.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/reference.toml")]
    pub scenario: PathBuf,

    /// Directory of prefab TOML files that scenarios can reference with `from`.
    #[arg(long, default_value = "assets/catalog")]
    pub catalog: PathBuf,

    /// Override the probability that a reading is correct.
    #[arg(long)]
    pub sensor_right: Option<f64>,

    /// Override the probability that a commanded move is executed.
    #[arg(long)]
    pub p_move: Option<f64>,

    /// Simulate a ground-truth agent instead of replaying recorded measurements.
    #[arg(long, default_value_t = false)]
    pub simulate: bool,

    /// Seed for the simulated run.
    #[arg(long, requires = "simulate")]
    pub seed: Option<u64>,

    /// Number of random commands for a simulated run without scripted motions.
    #[arg(long, requires = "simulate")]
    pub steps: Option<usize>,

    /// Write the run report as TOML to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info,gridloc_sim=debug,gridloc_core=info")]
    pub log_filter: String,

    /// List the prefab catalog keys and exit.
    #[arg(long, default_value_t = false)]
    pub list: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            scenario: self.scenario.clone(),
            catalog: self.catalog.clone(),
            sensor_right: self.sensor_right,
            p_move: self.p_move,
            simulate: self.simulate,
            seed: self.seed,
            steps: self.steps,
        }
    }
}
