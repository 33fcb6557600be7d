// gridloc_core/src/models/sensor/color.rs

use std::any::Any;

use crate::error::Result;
use crate::models::sensor::SensorModel;
use crate::params::check_probability;
use crate::types::Label;

/// A color sensor that reports the true label with probability `sensor_right`
/// and a wrong one otherwise.
#[derive(Debug, Clone)]
pub struct ColorSensor {
    sensor_right: f64,
}

impl ColorSensor {
    pub fn new(sensor_right: f64) -> Result<Self> {
        Ok(Self {
            sensor_right: check_probability("sensor_right", sensor_right)?,
        })
    }

    pub fn sensor_right(&self) -> f64 {
        self.sensor_right
    }
}

impl SensorModel for ColorSensor {
    fn likelihood(&self, cell: &Label, observation: &Label) -> f64 {
        if cell == observation {
            self.sensor_right
        } else {
            1.0 - self.sensor_right
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Distribution;
    use crate::error::LocalizationError;
    use crate::mapping::ColorMap;
    use crate::models::sensor::correct;
    use crate::types::GridShape;
    use approx::assert_abs_diff_eq;

    fn map() -> ColorMap {
        ColorMap::parse_rows(&["RGGRR", "RRGRR", "RRGGR", "RRRRR"]).unwrap()
    }

    fn green() -> Label {
        Label::from("G")
    }

    #[test]
    fn test_posterior_is_normalized() {
        let map = map();
        let prior = Distribution::uniform(map.shape());
        for sensor_right in [0.05, 0.5, 0.7, 0.99] {
            let out = correct(&prior, &map, &green(), sensor_right).unwrap();
            assert_abs_diff_eq!(out.total_mass(), 1.0, epsilon = 1e-12);
            assert!(out.as_matrix().iter().all(|p| *p >= 0.0));
        }
    }

    #[test]
    fn test_uniform_prior_posterior_matches_hand_computation() {
        // 5 green cells, 15 red cells, sensor_right 0.7.
        let map = map();
        let out = correct(&Distribution::uniform(map.shape()), &map, &green(), 0.7).unwrap();
        let z = 5.0 * 0.7 + 15.0 * 0.3;
        assert_abs_diff_eq!(out.get(0, 1).unwrap(), 0.7 / z, epsilon = 1e-12);
        assert_abs_diff_eq!(out.get(0, 0).unwrap(), 0.3 / z, epsilon = 1e-12);
    }

    #[test]
    fn test_reliable_sensor_sharpens_matching_cells() {
        let map = ColorMap::parse_rows(&["GGR", "GRR"]).unwrap();
        // 0.7 of the prior mass sits on the green cells.
        let prior = Distribution::from_rows(&[vec![0.3, 0.2, 0.1], vec![0.2, 0.1, 0.1]]).unwrap();
        let out = correct(&prior, &map, &green(), 0.8).unwrap();
        let green_mass =
            |d: &Distribution| d.get(0, 0).unwrap() + d.get(0, 1).unwrap() + d.get(1, 0).unwrap();
        assert!(green_mass(&out) > green_mass(&prior));
        for (r, c) in [(0, 0), (0, 1), (1, 0)] {
            assert!(out.get(r, c).unwrap() > prior.get(r, c).unwrap());
        }
    }

    #[test]
    fn test_uninformative_sensor_keeps_prior() {
        let map = map();
        let prior = Distribution::from_weights(&vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]; 4]).unwrap();
        let out = correct(&prior, &map, &green(), 0.5).unwrap();
        assert!(out.approx_eq(&prior, 1e-12));
    }

    #[test]
    fn test_perfect_sensor_contradiction_is_degenerate() {
        let map = ColorMap::parse_rows(&["RG", "GR"]).unwrap();
        let prior = Distribution::from_rows(&[vec![0.5, 0.0], vec![0.0, 0.5]]).unwrap();
        let err = correct(&prior, &map, &green(), 1.0).unwrap_err();
        assert_eq!(
            err,
            LocalizationError::DegenerateDistribution {
                step: None,
                normalizer: 0.0
            }
        );
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let prior = Distribution::uniform(GridShape::new(2, 2).unwrap());
        let err = correct(&prior, &map(), &green(), 0.7).unwrap_err();
        assert!(matches!(err, LocalizationError::InvalidShape(_)));
    }

    #[test]
    fn test_invalid_sensor_right_is_rejected() {
        assert!(ColorSensor::new(1.0001).is_err());
        assert!(ColorSensor::new(f64::INFINITY).is_err());
    }
}
