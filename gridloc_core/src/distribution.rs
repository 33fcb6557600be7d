// gridloc_core/src/distribution.rs

//! The belief of the filter: a probability mass per grid cell.

use std::fmt;

use nalgebra::DMatrix;

use crate::error::{LocalizationError, Result};
use crate::params::Tolerance;
use crate::types::GridShape;

/// An immutable snapshot of probability mass over an H x W grid.
///
/// Every value of this type handed out by the library has non-negative,
/// finite entries that sum to 1.0 within [`Tolerance::mass`]. Updates never
/// mutate a snapshot; they build a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    mass: DMatrix<f64>,
}

impl Distribution {
    /// The uninformed prior, `1 / (H * W)` in every cell.
    pub fn uniform(shape: GridShape) -> Self {
        let p = 1.0 / shape.cells() as f64;
        Self {
            mass: DMatrix::from_element(shape.rows, shape.cols, p),
        }
    }

    /// Builds a distribution from row-major values that already sum to one.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        Self::from_rows_with_tolerance(rows, Tolerance::default().mass)
    }

    /// Accepts rows whose total lies within `tolerance` of one. A total that is
    /// off by more than the default mass tolerance is rescaled to one.
    pub fn from_rows_with_tolerance(rows: &[Vec<f64>], tolerance: f64) -> Result<Self> {
        let mass = checked_matrix(rows)?;
        let total = mass.sum();
        if !((total - 1.0).abs() <= tolerance) {
            return Err(LocalizationError::parameter(
                "distribution",
                format!("entries sum to {total}, expected 1 within {tolerance:e}"),
            ));
        }
        if (total - 1.0).abs() > Tolerance::default().mass {
            return Self::normalized(mass);
        }
        Ok(Self { mass })
    }

    /// Normalizes arbitrary non-negative weights into a distribution.
    pub fn from_weights(rows: &[Vec<f64>]) -> Result<Self> {
        Self::normalized(checked_matrix(rows)?)
    }

    /// Divides `weights` by their total. A zero or non-finite total is degenerate.
    pub(crate) fn normalized(weights: DMatrix<f64>) -> Result<Self> {
        let normalizer = weights.sum();
        if normalizer <= 0.0 || !normalizer.is_finite() {
            return Err(LocalizationError::DegenerateDistribution {
                step: None,
                normalizer,
            });
        }
        Ok(Self {
            mass: weights / normalizer,
        })
    }

    /// Wraps a matrix produced by a mass-conserving operator.
    pub(crate) fn from_conserved(mass: DMatrix<f64>) -> Self {
        debug_assert!((mass.sum() - 1.0).abs() < 1e-6);
        Self { mass }
    }

    pub fn shape(&self) -> GridShape {
        GridShape {
            rows: self.mass.nrows(),
            cols: self.mass.ncols(),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.mass.get((row, col)).copied()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.mass
    }

    pub fn total_mass(&self) -> f64 {
        self.mass.sum()
    }

    /// The cell carrying the most mass. Ties resolve to the first cell in row-major order.
    pub fn most_likely(&self) -> (usize, usize) {
        let shape = self.shape();
        let mut best = (0, 0);
        for row in 0..shape.rows {
            for col in 0..shape.cols {
                if self.mass[(row, col)] > self.mass[best] {
                    best = (row, col);
                }
            }
        }
        best
    }

    /// Shannon entropy in nats. Zero-mass cells contribute nothing.
    pub fn entropy(&self) -> f64 {
        -self
            .mass
            .iter()
            .filter(|p| **p > 0.0)
            .map(|p| p * p.ln())
            .sum::<f64>()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.mass
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    /// True when both grids have the same shape and every cell differs by at most `tol`.
    pub fn approx_eq(&self, other: &Distribution, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .mass
                .iter()
                .zip(other.mass.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

fn checked_matrix(rows: &[Vec<f64>]) -> Result<DMatrix<f64>> {
    let shape = GridShape::of_rows(rows)?;
    for (r, row) in rows.iter().enumerate() {
        for (c, p) in row.iter().enumerate() {
            if !p.is_finite() || *p < 0.0 {
                return Err(LocalizationError::parameter(
                    "distribution",
                    format!("cell ({r}, {c}) holds {p}, expected a finite non-negative value"),
                ));
            }
        }
    }
    Ok(DMatrix::from_fn(shape.rows, shape.cols, |r, c| rows[r][c]))
}

impl fmt::Display for Distribution {
    /// Prints rows of five-decimal values, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.mass.row_iter().enumerate() {
            if r > 0 {
                write!(f, ",\n ")?;
            }
            let cells: Vec<String> = row.iter().map(|p| format!("{p:.5}")).collect();
            write!(f, "[{}]", cells.join(","))?;
        }
        write!(f, "]")
    }
}
