//! Dense 2D grid of `f64` backed by `ndarray`

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Rectangular array with at least one row and one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Grid {
    data: Array2<f64>,
}

impl Grid {
    /// Build from nested rows.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for no rows, empty rows, or rows of differing length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| BridgeError::invalid("grid must have at least one row"))?;
        if cols == 0 {
            return Err(BridgeError::invalid("grid must have at least one column"));
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(BridgeError::invalid(format!(
                "grid is not rectangular: row {} has {} columns, expected {}",
                index,
                row.len(),
                cols
            )));
        }

        let n_rows = rows.len();
        Self::from_shape_vec(n_rows, cols, rows.into_iter().flatten().collect())
    }

    /// Build from a shape and a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero extent or a buffer of the wrong length.
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(BridgeError::invalid(format!(
                "buffer of length {} does not match shape {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        let data = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| BridgeError::invalid(e.to_string()))?;
        Self::from_array(data)
    }

    /// Wrap an existing array.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when either extent is zero.
    pub fn from_array(data: Array2<f64>) -> Result<Self> {
        let (rows, cols) = data.dim();
        if rows == 0 || cols == 0 {
            return Err(BridgeError::invalid(format!(
                "grid extents must be at least 1, got {}x{}",
                rows, cols
            )));
        }
        Ok(Self { data })
    }

    /// All-zero grid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero extent.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::from_array(Array2::zeros((rows, cols)))
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Value at `(row, col)`; panics when out of bounds like array indexing
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[[row, col]] = value;
    }

    /// Read-only view of the underlying array
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Consume into the underlying array
    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// Values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Nested rows, the inverse of [`Grid::from_rows`]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Apply `f` to every cell
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.mapv(f),
        }
    }

    /// Largest value, ignoring NaN
    pub fn max(&self) -> f64 {
        self.iter().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest value, ignoring NaN
    pub fn min(&self) -> f64 {
        self.iter().fold(f64::INFINITY, f64::min)
    }

    /// Number of non-zero cells
    pub fn count_nonzero(&self) -> usize {
        self.iter().filter(|v| *v != 0.0).count()
    }

    /// Stretch to `[0, 255]` and round, for display.
    ///
    /// A constant grid maps to all zeros.
    pub fn to_u8(&self) -> Vec<u8> {
        let (min, max) = (self.min(), self.max());
        let range = max - min;
        self.iter()
            .map(|v| {
                if !(range > 0.0) || v.is_nan() {
                    0
                } else {
                    ((v - min) / range * 255.0).round() as u8
                }
            })
            .collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Grid {
    type Error = BridgeError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<f64>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}
