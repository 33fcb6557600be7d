// gridloc_core/src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LocalizationError, Result};

// --- Grid Geometry ---
/// Dimensions of the grid, `rows` (H) by `cols` (W). Both are always positive
/// once a map or distribution has been constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LocalizationError::InvalidShape(format!(
                "grid must have at least one row and one column, got {rows}x{cols}"
            )));
        }
        Ok(Self { rows, cols })
    }

    /// Shape of a row-major nested vector. Rejects empty and ragged input.
    pub fn of_rows<T>(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(LocalizationError::InvalidShape(format!(
                "row {idx} has {} columns, expected {cols}",
                row.len()
            )));
        }
        Self::new(rows.len(), cols)
    }

    /// Total number of cells, `H * W`.
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Wraps a signed cell coordinate onto the torus.
    pub fn wrap(&self, row: i64, col: i64) -> (usize, usize) {
        (
            row.rem_euclid(self.rows as i64) as usize,
            col.rem_euclid(self.cols as i64) as usize,
        )
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// --- Motion Commands ---
/// A commanded displacement in grid cells. `d_row` is positive downward,
/// `d_col` positive to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub d_row: i64,
    pub d_col: i64,
}

impl Displacement {
    pub const STAY: Self = Self::new(0, 0);
    pub const RIGHT: Self = Self::new(0, 1);
    pub const LEFT: Self = Self::new(0, -1);
    pub const DOWN: Self = Self::new(1, 0);
    pub const UP: Self = Self::new(-1, 0);

    /// The named vocabulary, in a fixed order.
    pub const NAMED: [(&'static str, Displacement); 5] = [
        ("stay", Self::STAY),
        ("right", Self::RIGHT),
        ("left", Self::LEFT),
        ("down", Self::DOWN),
        ("up", Self::UP),
    ];

    pub const fn new(d_row: i64, d_col: i64) -> Self {
        Self { d_row, d_col }
    }

    /// True for the stay command and the four unit neighbour moves.
    pub fn is_unit(&self) -> bool {
        matches!((self.d_row, self.d_col), (-1..=1, 0) | (0, -1..=1))
    }

    pub fn name(&self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, d)| d == self)
            .map(|(name, _)| *name)
    }
}

impl From<(i64, i64)> for Displacement {
    fn from((d_row, d_col): (i64, i64)) -> Self {
        Self::new(d_row, d_col)
    }
}

impl FromStr for Displacement {
    type Err = LocalizationError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        Self::NAMED
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, d)| *d)
            .ok_or_else(|| {
                LocalizationError::parameter(
                    "motion",
                    format!("unknown move '{s}', expected one of stay/right/left/down/up"),
                )
            })
    }
}

impl fmt::Display for Displacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "({}, {})", self.d_row, self.d_col),
        }
    }
}

/// How a motion model treats displacements outside the named vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplacementPolicy {
    /// Any integer displacement, wrapped modulo the grid size.
    #[default]
    Wrap,
    /// Only stay and the four unit moves are accepted.
    UnitOnly,
}

impl DisplacementPolicy {
    pub fn check(&self, displacement: Displacement) -> Result<()> {
        match self {
            Self::Wrap => Ok(()),
            Self::UnitOnly if displacement.is_unit() => Ok(()),
            Self::UnitOnly => Err(LocalizationError::parameter(
                "displacement",
                format!("{displacement} is not a unit move"),
            )),
        }
    }
}

// --- Observations ---
/// A color label of a map cell, and equally a sensor reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<char> for Label {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
