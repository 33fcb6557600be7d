// gridloc_sim/src/simulation/report.rs

use std::fmt;
use std::path::Path;

use gridloc_core::prelude::{Distribution, FilterParams, Tolerance};
use serde::Serialize;
use tracing::info;

use crate::error::SimError;

/// The summary of one scenario run, printable and serializable to TOML.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub scenario: String,
    pub steps: usize,
    pub sensor_right: f64,
    pub p_move: f64,
    pub most_likely: [usize; 2],
    pub most_likely_probability: f64,
    pub entropy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub true_cell: Option<[usize; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub belief_at_truth: Option<f64>,
    pub belief: Vec<Vec<f64>>,
    #[serde(skip)]
    rendered: String,
}

impl RunReport {
    pub fn new(
        scenario: &str,
        steps: usize,
        params: &FilterParams,
        belief: &Distribution,
        true_cell: Option<(usize, usize)>,
    ) -> Self {
        let (row, col) = belief.most_likely();
        Self {
            scenario: scenario.to_string(),
            steps,
            sensor_right: params.sensor_right,
            p_move: params.p_move,
            most_likely: [row, col],
            most_likely_probability: belief.get(row, col).unwrap_or_default(),
            entropy: belief.entropy(),
            true_cell: true_cell.map(|(r, c)| [r, c]),
            belief_at_truth: true_cell.and_then(|(r, c)| belief.get(r, c)),
            belief: belief.to_rows(),
            rendered: belief.to_string(),
        }
    }

    pub fn to_toml(&self) -> Result<String, SimError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), SimError> {
        std::fs::write(path, self.to_toml()?)?;
        info!("Wrote run report to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "scenario '{}': {} steps, sensor_right = {}, p_move = {}",
            self.scenario, self.steps, self.sensor_right, self.p_move
        )?;
        writeln!(f, "{}", self.rendered)?;
        write!(
            f,
            "most likely cell: ({}, {}) with p = {:.5}, entropy = {:.4} nats",
            self.most_likely[0], self.most_likely[1], self.most_likely_probability, self.entropy
        )?;
        if let (Some([r, c]), Some(p)) = (self.true_cell, self.belief_at_truth) {
            write!(f, "\ntrue cell: ({r}, {c}) with p = {p:.5}")?;
        }
        Ok(())
    }
}

/// Compares `belief` against a known answer, cell by cell and in total mass.
/// Reports the first offending cell in row-major order.
pub fn check_expected(
    belief: &Distribution,
    expected: &[Vec<f64>],
    tolerance: &Tolerance,
) -> Result<(), SimError> {
    let shape = belief.shape();
    if expected.len() != shape.rows || expected.iter().any(|row| row.len() != shape.cols) {
        return Err(SimError::Scenario(format!(
            "expected belief does not match the {shape} result"
        )));
    }

    for (row, values) in expected.iter().enumerate() {
        for (col, expected) in values.iter().enumerate() {
            let actual = belief.get(row, col).unwrap_or(f64::NAN);
            // NaN never passes.
            if !((actual - expected).abs() <= tolerance.entry) {
                return Err(SimError::ExpectationFailed {
                    row,
                    col,
                    actual,
                    expected: *expected,
                    tolerance: tolerance.entry,
                });
            }
        }
    }

    let total = belief.total_mass();
    if (total - 1.0).abs() > tolerance.fixture {
        return Err(SimError::Scenario(format!(
            "belief sums to {total}, expected 1 within {}",
            tolerance.fixture
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn belief() -> Distribution {
        Distribution::from_rows(&[vec![0.1, 0.6], vec![0.2, 0.1]]).unwrap()
    }

    #[test]
    fn test_report_summarizes_belief() {
        let params = FilterParams::new(0.7, 0.8).unwrap();
        let report = RunReport::new("demo", 3, &params, &belief(), Some((1, 0)));
        assert_eq!(report.most_likely, [0, 1]);
        assert_eq!(report.most_likely_probability, 0.6);
        assert_eq!(report.belief_at_truth, Some(0.2));

        let text = report.to_string();
        assert!(text.contains("[[0.10000,0.60000],\n [0.20000,0.10000]]"));
        assert!(text.contains("true cell: (1, 0) with p = 0.20000"));
    }

    #[test]
    fn test_report_serializes_to_toml() {
        let params = FilterParams::new(0.7, 0.8).unwrap();
        let report = RunReport::new("demo", 3, &params, &belief(), None);
        let parsed: toml::Table = toml::from_str(&report.to_toml().unwrap()).unwrap();
        assert_eq!(parsed["scenario"].as_str(), Some("demo"));
        assert_eq!(parsed["steps"].as_integer(), Some(3));
        assert_eq!(parsed["belief"].as_array().map(Vec::len), Some(2));
        assert!(!parsed.contains_key("true_cell"));
        assert!(!parsed.contains_key("rendered"));
    }

    #[test]
    fn test_check_expected_names_first_bad_cell() {
        let tol = Tolerance::default();
        assert!(check_expected(&belief(), &[vec![0.1, 0.6], vec![0.2, 0.1]], &tol).is_ok());
        assert!(check_expected(&belief(), &[vec![0.1005, 0.6], vec![0.2, 0.1]], &tol).is_ok());

        let err =
            check_expected(&belief(), &[vec![0.1, 0.6], vec![0.25, 0.05]], &tol).unwrap_err();
        assert!(matches!(
            err,
            SimError::ExpectationFailed { row: 1, col: 0, .. }
        ));

        let err = check_expected(&belief(), &[vec![0.1, 0.6]], &tol).unwrap_err();
        assert!(matches!(err, SimError::Scenario(_)));
    }
}
