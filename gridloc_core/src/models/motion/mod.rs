// gridloc_core/src/models/motion/mod.rs

use crate::distribution::Distribution;
use crate::error::Result;
use crate::types::Displacement;
use dyn_clone::DynClone;
use std::any::Any;
use std::fmt::Debug;

// --- MOTION MODEL TRAIT ---
// The prediction half of the filter. `bel'(x) = sum_x' p(x | u, x') bel(x')`
/// Describes how a commanded displacement moves probability mass around the grid.
///
/// Implementations must conserve mass: the output sums to whatever the input
/// summed to, so no renormalization happens after a prediction.
pub trait MotionModel: DynClone + Debug + Send + Sync {
    /// Probability that a commanded displacement is actually executed.
    fn p_move(&self) -> f64;

    /// Predicts the belief after attempting `displacement`. Pure: `belief` is
    /// left untouched and a new snapshot is returned.
    fn predict(&self, belief: &Distribution, displacement: Displacement) -> Result<Distribution>;

    fn as_any(&self) -> &dyn Any;
}

// This macro automatically generates the implementation of `Clone` for `Box<dyn MotionModel>`.
dyn_clone::clone_trait_object!(MotionModel);

pub mod toroidal;

pub use toroidal::ToroidalMotion;

/// One prediction step with the toroidal, no-overshoot motion model.
///
/// `new[r][c] = dist[r][c] * (1 - p_move) + dist[(r - dr) mod H][(c - dc) mod W] * p_move`
pub fn predict(
    dist: &Distribution,
    displacement: Displacement,
    p_move: f64,
) -> Result<Distribution> {
    ToroidalMotion::new(p_move)?.predict(dist, displacement)
}
