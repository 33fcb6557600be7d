// gridloc_sim/src/simulation/config/structs.rs

use gridloc_core::prelude::*;
use std::result::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SimError;

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// # ScenarioConfig
/// The root of the data parsed from a scenario `.toml` file, after every
/// `from = "..."` reference has been resolved against the prefab catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub map: MapConfig,
    pub filter: FilterParams,
    #[serde(default)]
    pub measurements: Vec<Label>,
    #[serde(default)]
    pub motions: Vec<MotionConfig>,
    #[serde(default)]
    pub expected: Option<ExpectedConfig>,
    #[serde(default)]
    pub simulation: Option<SimulationConfig>,
}

/// The color map, one string per row. See `ColorMap::parse_rows` for the row syntax.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    pub rows: Vec<String>,
}

/// A motion command: either a named move (`"right"`) or a `[d_row, d_col]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MotionConfig {
    Named(String),
    Offset([i64; 2]),
}

impl MotionConfig {
    pub fn to_displacement(&self) -> Result<Displacement, LocalizationError> {
        match self {
            MotionConfig::Named(name) => name.parse(),
            MotionConfig::Offset([d_row, d_col]) => Ok(Displacement::new(*d_row, *d_col)),
        }
    }
}

/// A known answer the run is checked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedConfig {
    pub belief: Vec<Vec<f64>>,
    #[serde(default)]
    pub tolerance: Tolerance,
}

/// Ground-truth simulation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    #[serde(default)]
    pub seed: u64,
    /// Starting cell of the simulated agent, `[row, col]`.
    #[serde(default)]
    pub start: [usize; 2],
    /// Number of random commands when the scenario lists no motions.
    #[serde(default)]
    pub steps: Option<usize>,
}

// =========================================================================
// == Validated Scenario ==
// =========================================================================

/// A scenario converted into core types, ready to be run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub map: ColorMap,
    pub params: FilterParams,
    pub measurements: Vec<Label>,
    pub motions: Vec<Displacement>,
    pub expected: Option<ExpectedConfig>,
    pub simulation: Option<SimulationConfig>,
}

impl ScenarioConfig {
    /// Converts the raw configuration into core types, validating along the way.
    pub fn build(&self) -> Result<Scenario, SimError> {
        let map = ColorMap::parse_rows(&self.map.rows)?;
        self.filter.validate()?;

        let motions = self
            .motions
            .iter()
            .map(MotionConfig::to_displacement)
            .collect::<Result<Vec<_>, _>>()?;

        for label in self.measurements.iter().filter(|l| !map.contains_label(l)) {
            warn!(
                "Scenario '{}' measures '{}', which no map cell carries.",
                self.name, label
            );
        }

        if let Some(expected) = &self.expected {
            let shape = GridShape::of_rows(&expected.belief)?;
            if shape != map.shape() {
                return Err(SimError::Scenario(format!(
                    "expected belief is {shape} but the map is {}",
                    map.shape()
                )));
            }
        }

        if let Some(sim) = &self.simulation {
            let [row, col] = sim.start;
            if map.label_at(row, col).is_none() {
                return Err(SimError::Scenario(format!(
                    "simulation start ({row}, {col}) lies outside the {} map",
                    map.shape()
                )));
            }
        }

        Ok(Scenario {
            name: self.name.clone(),
            map,
            params: self.filter,
            measurements: self.measurements.clone(),
            motions,
            expected: self.expected.clone(),
            simulation: self.simulation.clone(),
        })
    }
}
