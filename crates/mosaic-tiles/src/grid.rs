//! Row-major grid of tile colors.

use crate::color::ColorCode;

/// The sampler's output: one [`ColorCode`] per tile, rows top to bottom,
/// columns left to right.
///
/// Every row has the same length. A grid may be empty (zero rows) when the
/// source image is smaller than one tile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorGrid {
    rows: Vec<Vec<ColorCode>>,
    columns: usize,
}

impl ColorGrid {
    /// Build a grid from rows.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that all rows have the same length.
    pub fn from_rows(rows: Vec<Vec<ColorCode>>) -> Self {
        let columns = rows.first().map_or(0, Vec::len);
        Self::with_columns(columns, rows)
    }

    /// Build a grid whose column count is known up front.
    ///
    /// A grid with zero rows still reports `columns`, so an image shorter
    /// than one tile keeps the width it was sampled at.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that every row has `columns` entries.
    pub fn with_columns(columns: usize, rows: Vec<Vec<ColorCode>>) -> Self {
        debug_assert!(
            rows.iter().all(|row| row.len() == columns),
            "all rows must have {} columns",
            columns
        );
        Self { rows, columns }
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Number of tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len() * self.columns
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The code at `(row, column)`, if in bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<&ColorCode> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Rows in order, each a slice of codes in column order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[ColorCode]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Codes as text, for serialization.
    pub fn to_strings(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|code| code.as_str().to_string()).collect())
            .collect()
    }

    pub fn into_rows(self) -> Vec<Vec<ColorCode>> {
        self.rows
    }
}
