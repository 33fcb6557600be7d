// gridloc_core/src/estimation/filters/histogram.rs

use std::any::Any;

use tracing::debug;

use crate::distribution::Distribution;
use crate::error::Result;
use crate::estimation::BeliefEstimator;
use crate::mapping::ColorMap;
use crate::messages::FilterInput;
use crate::models::motion::{MotionModel, ToroidalMotion};
use crate::models::sensor::{ColorSensor, SensorModel};
use crate::params::FilterParams;
use crate::types::{Displacement, Label};

/// A discrete Bayes filter over the cells of a known color map.
///
/// The filter holds exactly one belief snapshot. Each input replaces it with a
/// new snapshot; no history is kept.
#[derive(Debug, Clone)]
pub struct HistogramFilter {
    map: ColorMap,
    motion: Box<dyn MotionModel>,
    sensor: Box<dyn SensorModel>,
    /// The belief restored by `reset`.
    prior: Distribution,
    belief: Distribution,
    /// Number of completed motion + observation steps.
    steps: usize,
}

impl HistogramFilter {
    /// Creates a filter with the toroidal motion model and the color sensor,
    /// starting from a uniform belief.
    pub fn new(map: ColorMap, params: &FilterParams) -> Result<Self> {
        params.validate()?;
        let motion = ToroidalMotion::new(params.p_move)?.with_policy(params.displacement_policy);
        let sensor = ColorSensor::new(params.sensor_right)?;
        Ok(Self::with_models(map, Box::new(motion), Box::new(sensor)))
    }

    /// Creates a filter from arbitrary models, starting from a uniform belief.
    pub fn with_models(
        map: ColorMap,
        motion: Box<dyn MotionModel>,
        sensor: Box<dyn SensorModel>,
    ) -> Self {
        let prior = Distribution::uniform(map.shape());
        Self {
            map,
            motion,
            sensor,
            belief: prior.clone(),
            prior,
            steps: 0,
        }
    }

    /// Replaces the starting belief. The prior must cover the map exactly.
    pub fn with_prior(mut self, prior: Distribution) -> Result<Self> {
        self.map.check_shape(prior.shape(), "prior")?;
        self.belief = prior.clone();
        self.prior = prior;
        self.steps = 0;
        Ok(self)
    }

    pub fn map(&self) -> &ColorMap {
        &self.map
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn into_belief(self) -> Distribution {
        self.belief
    }

    /// Returns to the starting belief and clears the step counter.
    pub fn reset(&mut self) {
        self.belief = self.prior.clone();
        self.steps = 0;
    }

    /// Applies a motion command to the current belief.
    pub fn predict(&mut self, displacement: Displacement) -> Result<()> {
        self.belief = self.motion.predict(&self.belief, displacement)?;
        Ok(())
    }

    /// Fuses one observation into the current belief.
    pub fn correct(&mut self, observation: &Label) -> Result<()> {
        self.belief = self.corrected(&self.belief, observation)?;
        Ok(())
    }

    /// One filter step: predict with `motion`, then correct with `observation`.
    /// If either half fails the belief is left untouched.
    pub fn step(&mut self, motion: Displacement, observation: &Label) -> Result<()> {
        let predicted = self.motion.predict(&self.belief, motion)?;
        let corrected = self.corrected(&predicted, observation)?;

        debug!(
            step = self.steps,
            %motion,
            %observation,
            most_likely = ?corrected.most_likely(),
            "histogram filter step"
        );
        self.belief = corrected;
        self.steps += 1;
        Ok(())
    }

    /// Runs every `(motion, observation)` pair in order and returns the final belief.
    /// Stops at the first error.
    pub fn run<I>(&mut self, steps: I) -> Result<&Distribution>
    where
        I: IntoIterator<Item = (Displacement, Label)>,
    {
        for (motion, observation) in steps {
            self.step(motion, &observation)?;
        }
        Ok(&self.belief)
    }

    fn corrected(&self, belief: &Distribution, observation: &Label) -> Result<Distribution> {
        self.sensor
            .correct(belief, &self.map, observation)
            .map_err(|e| e.at_step(self.steps))
    }
}

// --- The Public Trait Implementation ---
impl BeliefEstimator for HistogramFilter {
    fn process(&mut self, input: &FilterInput) -> Result<()> {
        match input {
            FilterInput::Motion(displacement) => self.predict(*displacement),
            FilterInput::Observation(observation) => self.correct(observation),
            FilterInput::Step {
                motion,
                observation,
            } => self.step(*motion, observation),
        }
    }

    fn belief(&self) -> &Distribution {
        &self.belief
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
