// gridloc_core/src/estimation/mod.rs

use crate::distribution::Distribution;
use crate::error::{LocalizationError, Result};
use crate::mapping::ColorMap;
use crate::messages::FilterInput;
use crate::params::FilterParams;
use crate::types::{Displacement, Label};
use std::any::Any;

/// The contract for any algorithm that performs the "belief estimator" role.
/// Its sole responsibility is to track where the agent might be.
pub trait BeliefEstimator: Send + Sync {
    /// The single, unified method for processing all types of input data.
    /// On error the current belief is left as it was before the call.
    fn process(&mut self, input: &FilterInput) -> Result<()>;

    /// Returns a reference to the current belief.
    fn belief(&self) -> &Distribution;

    /// Allows for dynamic downcasting to access algorithm-specific methods if needed.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub mod filters;

pub use filters::histogram::HistogramFilter;

/// Runs the histogram filter over paired motions and measurements from a
/// uniform prior and returns the final belief.
///
/// Step `i` applies `motions[i]` and then senses `measurements[i]`. With no
/// steps the uniform prior is returned unchanged. A degenerate update aborts
/// the run and reports the failing step index.
pub fn estimate(
    map: &ColorMap,
    measurements: &[Label],
    motions: &[Displacement],
    sensor_right: f64,
    p_move: f64,
) -> Result<Distribution> {
    let params = FilterParams::new(sensor_right, p_move)?;
    estimate_with(map, measurements, motions, &params)
}

/// [`estimate`] with a full parameter set, including the displacement policy.
pub fn estimate_with(
    map: &ColorMap,
    measurements: &[Label],
    motions: &[Displacement],
    params: &FilterParams,
) -> Result<Distribution> {
    if measurements.len() != motions.len() {
        return Err(LocalizationError::InvalidParameter {
            name: "measurements",
            reason: format!(
                "{} measurements but {} motions; each step needs one of each",
                measurements.len(),
                motions.len()
            ),
        });
    }

    let mut filter = HistogramFilter::new(map.clone(), params)?;
    filter.run(motions.iter().copied().zip(measurements.iter().cloned()))?;
    Ok(filter.into_belief())
}
