// gridloc_sim/src/simulation/config/mod.rs

//! This module handles loading, resolving, and validating scenario
//! configuration from disk, including the prefab catalog system.

mod catalog;
mod resolver;

pub mod structs;

use figment::{
    providers::{Format, Toml},
    value::Value,
    Figment,
};
use std::path::Path;
use tracing::info;

use crate::error::SimError;

// Re-export public types
pub use catalog::PrefabCatalog;
pub use resolver::{resolve_value, ResolveError};
pub use structs::{
    ExpectedConfig, MapConfig, MotionConfig, Scenario, ScenarioConfig, SimulationConfig,
};

/// Loads a scenario file, resolves it against `catalog`, and deserializes it.
pub fn load_scenario(path: &Path, catalog: &PrefabCatalog) -> Result<ScenarioConfig, SimError> {
    if !path.is_file() {
        return Err(SimError::ScenarioNotFound(path.to_path_buf()));
    }
    info!("Loading scenario from: {}", path.display());

    let raw: Value = Figment::new().merge(Toml::file(path)).extract()?;
    resolve_scenario(&raw, catalog)
}

/// Resolves an already parsed scenario value and deserializes it.
pub fn resolve_scenario(raw: &Value, catalog: &PrefabCatalog) -> Result<ScenarioConfig, SimError> {
    let resolved = resolve_value(raw, catalog)?;
    let config: ScenarioConfig = resolved.deserialize()?;
    info!(
        "Successfully resolved and deserialized scenario: '{}'",
        &config.name
    );
    Ok(config)
}
