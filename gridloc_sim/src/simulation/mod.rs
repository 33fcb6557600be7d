// gridloc_sim/src/simulation/mod.rs

pub mod config;
pub mod core;
pub mod report;

use std::path::PathBuf;

use gridloc_core::prelude::*;
use std::result::Result;
use tracing::{info, warn};

use crate::error::SimError;
use self::config::{load_scenario, PrefabCatalog, Scenario};
use self::core::agent::{simulate, CommandSource};
use self::core::prng::SimulationRng;
use self::report::{check_expected, RunReport};

/// Commands drawn when simulating a scenario that lists neither motions nor a step count.
pub const DEFAULT_SIMULATED_STEPS: usize = 10;

/// Everything a single run needs besides the files on disk.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub scenario: PathBuf,
    pub catalog: PathBuf,
    pub sensor_right: Option<f64>,
    pub p_move: Option<f64>,
    /// Replace the scenario's measurements with a simulated ground-truth run.
    pub simulate: bool,
    pub seed: Option<u64>,
    pub steps: Option<usize>,
}

/// Loads, resolves and runs one scenario.
pub fn run(options: &RunOptions) -> Result<RunReport, SimError> {
    let catalog = PrefabCatalog::load(&options.catalog);
    let mut config = load_scenario(&options.scenario, &catalog)?;
    if let Some(sensor_right) = options.sensor_right {
        config.filter.sensor_right = sensor_right;
    }
    if let Some(p_move) = options.p_move {
        config.filter.p_move = p_move;
    }

    let scenario = config.build()?;
    if options.simulate {
        run_simulated(&scenario, options)
    } else {
        run_recorded(&scenario)
    }
}

/// Runs the filter on the measurements and motions listed in the scenario and
/// checks the result against the expected belief, if one is given.
pub fn run_recorded(scenario: &Scenario) -> Result<RunReport, SimError> {
    info!(
        "Running scenario '{}' over {} recorded steps.",
        scenario.name,
        scenario.motions.len()
    );
    let belief = estimate_with(
        &scenario.map,
        &scenario.measurements,
        &scenario.motions,
        &scenario.params,
    )?;

    if let Some(expected) = &scenario.expected {
        check_expected(&belief, &expected.belief, &expected.tolerance)?;
        info!("Belief matches the expected answer.");
    }

    Ok(RunReport::new(
        &scenario.name,
        scenario.motions.len(),
        &scenario.params,
        &belief,
        None,
    ))
}

/// Simulates a ground-truth agent, then runs the filter on what it sensed.
pub fn run_simulated(scenario: &Scenario, options: &RunOptions) -> Result<RunReport, SimError> {
    let sim = scenario.simulation.clone().unwrap_or_default();
    let seed = options.seed.unwrap_or(sim.seed);
    let commands = if scenario.motions.is_empty() {
        CommandSource::Random {
            steps: options
                .steps
                .or(sim.steps)
                .unwrap_or(DEFAULT_SIMULATED_STEPS),
        }
    } else {
        if options.steps.is_some() {
            warn!("Ignoring --steps: scenario '{}' lists its own motions.", scenario.name);
        }
        CommandSource::Scripted(scenario.motions.clone())
    };
    if scenario.expected.is_some() {
        warn!("Skipping the expected-belief check for a simulated run.");
    }

    info!(
        "Simulating scenario '{}' from cell {:?} with seed {}.",
        scenario.name, sim.start, seed
    );
    let mut rng = SimulationRng::from_seed(seed);
    let [row, col] = sim.start;
    let truth = simulate(&scenario.map, &scenario.params, (row, col), commands, &mut rng)?;

    let belief = estimate_with(
        &scenario.map,
        &truth.measurements,
        &truth.motions,
        &scenario.params,
    )?;

    Ok(RunReport::new(
        &scenario.name,
        truth.motions.len(),
        &scenario.params,
        &belief,
        truth.final_cell(),
    ))
}
