// gridloc_core/src/mapping/mod.rs

use std::collections::BTreeSet;

use nalgebra::DMatrix;

use crate::error::{LocalizationError, Result};
use crate::types::{GridShape, Label};

// --- Map Data Structures ---
/// The known, static color map of the world. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    cells: DMatrix<Label>,
}

impl ColorMap {
    /// Builds a map from row-major labels. Rejects empty and ragged input.
    pub fn from_rows(rows: Vec<Vec<Label>>) -> Result<Self> {
        let shape = GridShape::of_rows(&rows)?;
        let cells = DMatrix::from_row_iterator(shape.rows, shape.cols, rows.into_iter().flatten());
        Ok(Self { cells })
    }

    /// Parses text rows. A row containing whitespace is split into
    /// whitespace-separated labels, otherwise every character is one label.
    ///
    /// `["R G", "G R"]` and `["RG", "GR"]` describe the same map.
    pub fn parse_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let parsed = rows
            .iter()
            .map(|row| {
                let row = row.as_ref().trim();
                if row.contains(char::is_whitespace) {
                    row.split_whitespace().map(Label::from).collect()
                } else {
                    row.chars().map(Label::from).collect()
                }
            })
            .collect();
        Self::from_rows(parsed)
    }

    pub fn shape(&self) -> GridShape {
        GridShape {
            rows: self.cells.nrows(),
            cols: self.cells.ncols(),
        }
    }

    pub fn label_at(&self, row: usize, col: usize) -> Option<&Label> {
        self.cells.get((row, col))
    }

    pub(crate) fn cells(&self) -> &DMatrix<Label> {
        &self.cells
    }

    /// The distinct labels used by the map, sorted.
    pub fn alphabet(&self) -> Vec<Label> {
        self.cells
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn contains_label(&self, label: &Label) -> bool {
        self.cells.iter().any(|l| l == label)
    }

    /// Fails with `InvalidShape` unless `shape` matches this map.
    pub fn check_shape(&self, shape: GridShape, what: &str) -> Result<()> {
        if shape != self.shape() {
            return Err(LocalizationError::InvalidShape(format!(
                "{what} is {shape} but the color map is {}",
                self.shape()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_and_spaced_rows_agree() {
        let compact = ColorMap::parse_rows(&["RGGRR", "RRGRR"]).unwrap();
        let spaced = ColorMap::parse_rows(&["R G G R R", "R R G R R"]).unwrap();
        assert_eq!(compact, spaced);
        assert_eq!(compact.shape(), GridShape { rows: 2, cols: 5 });
        assert_eq!(compact.label_at(0, 1), Some(&Label::from("G")));
        assert_eq!(compact.label_at(1, 0), Some(&Label::from("R")));
    }

    #[test]
    fn test_multi_character_labels() {
        let map = ColorMap::parse_rows(&["red green", "green blue"]).unwrap();
        assert_eq!(
            map.alphabet(),
            vec![Label::from("blue"), Label::from("green"), Label::from("red")]
        );
        assert!(map.contains_label(&Label::from("blue")));
        assert!(!map.contains_label(&Label::from("R")));
    }

    #[test]
    fn test_empty_and_ragged_maps_are_rejected() {
        assert!(matches!(
            ColorMap::parse_rows::<&str>(&[]),
            Err(LocalizationError::InvalidShape(_))
        ));
        assert!(matches!(
            ColorMap::parse_rows(&["RG", "R"]),
            Err(LocalizationError::InvalidShape(_))
        ));
        assert!(matches!(
            ColorMap::parse_rows(&[""]),
            Err(LocalizationError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_check_shape() {
        let map = ColorMap::parse_rows(&["RG", "GR"]).unwrap();
        assert!(map.check_shape(GridShape { rows: 2, cols: 2 }, "prior").is_ok());
        let err = map
            .check_shape(GridShape { rows: 3, cols: 2 }, "prior")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid shape: prior is 3x2 but the color map is 2x2"
        );
    }
}
