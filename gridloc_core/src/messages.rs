// gridloc_core/src/messages.rs

use crate::types::{Displacement, Label};

/// The universal input packet for all `BeliefEstimator` implementations.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterInput {
    /// A prediction only: the agent was commanded to move.
    Motion(Displacement),
    /// A correction only: the agent read the color of its cell.
    Observation(Label),
    /// One full filter step. The motion is always applied before the observation.
    Step {
        motion: Displacement,
        observation: Label,
    },
}

impl FilterInput {
    pub fn step(motion: impl Into<Displacement>, observation: impl Into<Label>) -> Self {
        Self::Step {
            motion: motion.into(),
            observation: observation.into(),
        }
    }
}
