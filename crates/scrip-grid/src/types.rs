//! Core types for grid conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Staggering convention of the source model grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridConvention {
    /// Arakawa-C ocean grid: T-point centers, F-point corners of the same shape.
    #[default]
    Ocean,
    /// Atmosphere M/U/V staggering: corners built from U longitudes and V latitudes.
    Atmosphere,
}

impl GridConvention {
    /// Lowercase name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ocean => "ocean",
            Self::Atmosphere => "atmosphere",
        }
    }
}

impl FromStr for GridConvention {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ocean" | "nemo" => Ok(Self::Ocean),
            "atmosphere" | "wrf" => Ok(Self::Atmosphere),
            other => Err(GridError::UnsupportedConvention(other.to_string())),
        }
    }
}

impl fmt::Display for GridConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dimensions of the cell-center grid.
///
/// `nx` counts cells along x (longitude), `ny` along y (latitude).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub nx: usize,
    pub ny: usize,
}

impl GridShape {
    /// Create a new grid shape.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    /// Total number of cells (`grid_size`).
    pub fn size(&self) -> usize {
        self.nx * self.ny
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0
    }

    /// The `grid_dims` pair, x first.
    pub fn dims(&self) -> [usize; 2] {
        [self.nx, self.ny]
    }

    /// Flat record index of cell `(i, j)`: x-major, y fastest.
    pub fn flat_index(&self, i: usize, j: usize) -> usize {
        i * self.ny + j
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.nx, self.ny)
    }
}

/// A dense row-major 2-D array.
///
/// Fields read from a file arrive as `[ny, nx]` (row = y). Inside the
/// converter they are transposed so that row = x and column = y.
#[derive(Debug, Clone, PartialEq)]
pub struct Field2D<T = f64> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Field2D<T> {
    /// Wrap row-major data, checking its length against the dimensions.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> GridResult<Self> {
        if data.len() != rows * cols {
            return Err(GridError::invalid_field(format!(
                "{} values cannot fill a {}x{} field",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// A field with every element set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build a field by evaluating `f(row, col)` for every element.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Swap rows and columns.
    pub fn transposed(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |r, c| self.get(c, r))
    }

    /// Apply `f` element-wise, preserving the shape.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Field2D<U> {
        Field2D {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Drop the first `n` columns.
    pub fn drop_leading_cols(&self, n: usize) -> Self {
        let n = n.min(self.cols);
        Self::from_fn(self.rows, self.cols - n, |r, c| self.get(r, c + n))
    }

    /// Drop the first `n` rows.
    pub fn drop_leading_rows(&self, n: usize) -> Self {
        let n = n.min(self.rows);
        Self {
            rows: self.rows - n,
            cols: self.cols,
            data: self.data[n * self.cols..].to_vec(),
        }
    }
}

/// Position of a vertex within a cell, anti-clockwise from the upper right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    UpperRight = 0,
    UpperLeft = 1,
    LowerLeft = 2,
    LowerRight = 3,
}

impl Corner {
    /// Index along the `grid_corners` axis.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Number of corners per cell (`grid_corners`).
pub const GRID_CORNERS: usize = 4;

/// One coordinate (longitude or latitude) of every corner, `[nx, ny, 4]`.
///
/// The corner axis varies fastest, so the backing vector is already laid
/// out as `[grid_size, grid_corners]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerArray {
    shape: GridShape,
    data: Vec<f64>,
}

impl CornerArray {
    /// A zero-filled array for the given grid.
    pub fn zeros(shape: GridShape) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.size() * GRID_CORNERS],
        }
    }

    #[inline]
    fn offset(&self, i: usize, j: usize, corner: Corner) -> usize {
        self.shape.flat_index(i, j) * GRID_CORNERS + corner.index()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize, corner: Corner) -> f64 {
        self.data[self.offset(i, j, corner)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, corner: Corner, value: f64) {
        let idx = self.offset(i, j, corner);
        self.data[idx] = value;
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
}
