//! Row-major matrix storage for per-process resource tables.

use thiserror::Error;

/// Shape violations when building a [`Matrix`] from row data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// A row's length disagrees with the declared column count.
    #[error("row {row} has {actual} entries, expected {expected}")]
    RowLength {
        /// Index of the offending row.
        row: usize,
        /// Declared column count.
        expected: usize,
        /// Actual entries in the row.
        actual: usize,
    },
}

/// A dense `rows x cols` table of resource unit counts.
///
/// Storage is a single row-major buffer, so every row is a contiguous
/// slice and cloning always yields fully independent storage. Rows index
/// processes and columns index resource types throughout the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u64>,
}

impl Matrix {
    /// Create a `rows x cols` matrix with every entry zero.
    pub fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Build a matrix from per-row data, validating that every row has
    /// exactly `cols` entries.
    pub fn from_rows(rows: Vec<Vec<u64>>, cols: usize) -> Result<Self, ShapeError> {
        let row_count = rows.len();
        let mut data = Vec::with_capacity(row_count * cols);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(ShapeError::RowLength {
                    row: index,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols,
            data,
        })
    }

    /// Number of rows (processes).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (resource types).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow one row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[u64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Borrow one row mutably.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row_mut(&mut self, row: usize) -> &mut [u64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Overwrite every entry from another matrix of identical shape
    /// without reallocating.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn copy_from(&mut self, other: &Matrix) {
        assert_eq!(
            (self.rows, self.cols),
            (other.rows, other.cols),
            "copy_from requires identical shapes"
        );
        self.data.copy_from_slice(&other.data);
    }

    /// Sum of one column across all rows.
    pub fn column_sum(&self, col: usize) -> u64 {
        assert!(col < self.cols, "column {col} out of range");
        (0..self.rows).map(|row| self.row(row)[col]).sum()
    }
}
