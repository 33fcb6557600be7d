// gridloc_core/src/models/motion/toroidal.rs

use std::any::Any;

use nalgebra::DMatrix;
use tracing::trace;

use crate::distribution::Distribution;
use crate::error::Result;
use crate::models::motion::MotionModel;
use crate::params::check_probability;
use crate::types::{Displacement, DisplacementPolicy};

/// The agent either executes the commanded displacement (probability `p_move`)
/// or stays where it is. It never overshoots. Moving off one edge of the grid
/// re-enters from the opposite edge.
#[derive(Debug, Clone)] // Make sure it's cloneable for the dyn-clone
pub struct ToroidalMotion {
    p_move: f64,
    policy: DisplacementPolicy,
}

impl ToroidalMotion {
    pub fn new(p_move: f64) -> Result<Self> {
        Ok(Self {
            p_move: check_probability("p_move", p_move)?,
            policy: DisplacementPolicy::Wrap,
        })
    }

    pub fn with_policy(mut self, policy: DisplacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DisplacementPolicy {
        self.policy
    }
}

impl MotionModel for ToroidalMotion {
    fn p_move(&self) -> f64 {
        self.p_move
    }

    fn predict(&self, belief: &Distribution, displacement: Displacement) -> Result<Distribution> {
        self.policy.check(displacement)?;

        let shape = belief.shape();
        // Reduce the shift onto the torus first, so the source index below never overflows.
        let (d_row, d_col) = shape.wrap(displacement.d_row, displacement.d_col);
        if d_row == 0 && d_col == 0 {
            // Both branches read the same cell.
            trace!(%displacement, "motion wraps to a no-op");
            return Ok(belief.clone());
        }

        let prior = belief.as_matrix();
        let stay = 1.0 - self.p_move;
        let mass = DMatrix::from_fn(shape.rows, shape.cols, |r, c| {
            let source = (
                (r + shape.rows - d_row) % shape.rows,
                (c + shape.cols - d_col) % shape.cols,
            );
            prior[(r, c)] * stay + prior[source] * self.p_move
        });
        trace!(%displacement, p_move = self.p_move, "predicted belief");

        Ok(Distribution::from_conserved(mass))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
