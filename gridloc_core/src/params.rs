// gridloc_core/src/params.rs

use serde::{Deserialize, Serialize};

use crate::error::{LocalizationError, Result};
use crate::types::DisplacementPolicy;

/// Validates that `value` is a probability in `[0, 1]`.
pub fn check_probability(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(LocalizationError::parameter(
            name,
            format!("must lie in [0, 1], got {value}"),
        ))
    }
}

/// Noise parameters of the filter. Fixed before a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterParams {
    /// Probability that a reading matches the true cell color.
    pub sensor_right: f64,
    /// Probability that a commanded move is executed.
    pub p_move: f64,
    #[serde(default)]
    pub displacement_policy: DisplacementPolicy,
}

impl FilterParams {
    pub fn new(sensor_right: f64, p_move: f64) -> Result<Self> {
        let params = Self {
            sensor_right,
            p_move,
            displacement_policy: DisplacementPolicy::Wrap,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_policy(mut self, policy: DisplacementPolicy) -> Self {
        self.displacement_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_probability("sensor_right", self.sensor_right)?;
        check_probability("p_move", self.p_move)?;
        Ok(())
    }
}

/// Floating point tolerances used when checking distribution invariants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Allowed deviation of the total mass from 1.0.
    pub mass: f64,
    /// Allowed per-cell deviation when comparing against an expected grid.
    pub entry: f64,
    /// Allowed deviation of the total mass of a result compared against a fixture.
    pub fixture: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            mass: 1e-9,
            entry: 1e-3,
            fixture: 1e-4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_bounds() {
        assert!(check_probability("p", 0.0).is_ok());
        assert!(check_probability("p", 1.0).is_ok());
        assert!(check_probability("p", -0.01).is_err());
        assert!(check_probability("p", 1.01).is_err());
        assert!(check_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn test_filter_params_reject_out_of_range() {
        assert!(FilterParams::new(0.7, 0.8).is_ok());
        let err = FilterParams::new(1.2, 0.8).unwrap_err();
        assert!(err.to_string().contains("sensor_right"));
        let err = FilterParams::new(0.7, -0.1).unwrap_err();
        assert!(err.to_string().contains("p_move"));
    }
}
