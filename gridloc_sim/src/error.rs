// gridloc_sim/src/error.rs

use std::path::PathBuf;

use gridloc_core::error::LocalizationError;
use thiserror::Error;

use crate::simulation::config::ResolveError;

/// Everything that can abort a scenario run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario file not found: {}", .0.display())]
    ScenarioNotFound(PathBuf),

    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),

    #[error("failed to resolve scenario against the catalog: {0}")]
    Resolve(#[from] ResolveError),

    #[error("invalid scenario: {0}")]
    Scenario(String),

    #[error(transparent)]
    Localization(#[from] LocalizationError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(
        "belief at cell ({row}, {col}) is {actual:.5}, expected {expected:.5} within {tolerance}"
    )]
    ExpectationFailed {
        row: usize,
        col: usize,
        actual: f64,
        expected: f64,
        tolerance: f64,
    },
}
