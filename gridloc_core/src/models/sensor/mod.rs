// gridloc_core/src/models/sensor/mod.rs

use crate::distribution::Distribution;
use crate::error::Result;
use crate::mapping::ColorMap;
use crate::types::Label;
use dyn_clone::DynClone;
use nalgebra::DMatrix;
use std::any::Any;
use std::fmt::Debug;
use tracing::trace;

// --- SENSOR MODEL TRAIT ---
// The correction half of the filter. `bel(x) = eta * p(z | x) * bel'(x)`
pub trait SensorModel: DynClone + Debug + Send + Sync {
    /// `p(z | x)`: likelihood of reading `observation` while standing on a cell labelled `cell`.
    fn likelihood(&self, cell: &Label, observation: &Label) -> f64;

    /// Bayes update of `belief` against the known map, followed by renormalization.
    ///
    /// Fails with `InvalidShape` if the belief and map disagree on dimensions and
    /// with `DegenerateDistribution` if the posterior mass collapses to zero.
    fn correct(
        &self,
        belief: &Distribution,
        map: &ColorMap,
        observation: &Label,
    ) -> Result<Distribution> {
        map.check_shape(belief.shape(), "belief")?;

        let prior = belief.as_matrix();
        let labels = map.cells();
        let weights = DMatrix::from_fn(prior.nrows(), prior.ncols(), |r, c| {
            prior[(r, c)] * self.likelihood(&labels[(r, c)], observation)
        });
        trace!(%observation, normalizer = weights.sum(), "corrected belief");

        Distribution::normalized(weights)
    }

    fn as_any(&self) -> &dyn Any;
}

// This macro automatically generates the implementation of `Clone` for `Box<dyn SensorModel>`.
dyn_clone::clone_trait_object!(SensorModel);

pub mod color;

pub use color::ColorSensor;

/// One correction step with the two-outcome color sensor.
pub fn correct(
    dist: &Distribution,
    map: &ColorMap,
    observation: &Label,
    sensor_right: f64,
) -> Result<Distribution> {
    ColorSensor::new(sensor_right)?.correct(dist, map, observation)
}
