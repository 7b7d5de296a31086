//! Shared types: the point matrix, flat point buffers, and the error taxonomy.

use nalgebra::DMatrix;
use std::ops::Range;

/// Matrix of sample points; each row is one d-dimensional point.
pub type PointMatrix = DMatrix<f64>;

/// Errors from malformed inputs at the API boundary.
///
/// Configuration errors surface immediately to the caller; no partial or
/// best-effort statistic is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A range index was built over zero points.
    EmptyPointSet,
    /// One of the two samples has no rows.
    EmptySample,
    /// Points have zero coordinates per row.
    ZeroDimension,
    /// The two samples disagree on the number of coordinates per point.
    DimensionMismatch {
        /// Columns of the first sample.
        left: usize,
        /// Columns of the second sample.
        right: usize,
    },
    /// The `(n1, n2)` partition does not cover the matrix rows, or one part is empty.
    BadPartition {
        /// Claimed size of the first sample.
        n1: usize,
        /// Claimed size of the second sample.
        n2: usize,
        /// Actual number of matrix rows.
        rows: usize,
    },
    /// A coordinate is NaN or infinite.
    NonFiniteCoordinate {
        /// Row of the offending coordinate.
        row: usize,
        /// Column of the offending coordinate.
        col: usize,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyPointSet => {
                write!(f, "need at least one point to build a range index")
            }
            ConfigError::EmptySample => write!(f, "both samples must contain at least one point"),
            ConfigError::ZeroDimension => write!(f, "points must have at least one coordinate"),
            ConfigError::DimensionMismatch { left, right } => {
                write!(f, "samples disagree on dimensionality: {} vs {}", left, right)
            }
            ConfigError::BadPartition { n1, n2, rows } => {
                write!(
                    f,
                    "partition ({}, {}) is invalid for a matrix of {} rows",
                    n1, n2, rows
                )
            }
            ConfigError::NonFiniteCoordinate { row, col } => {
                write!(f, "non-finite coordinate at row {}, column {}", row, col)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Row-major point storage, the common currency of counters and indexes.
///
/// Permutation trials gather shuffled rows into reused `FlatPoints` buffers,
/// so steady-state trials allocate nothing.
#[derive(Debug, Clone)]
pub(crate) struct FlatPoints {
    coords: Vec<f64>,
    dim: usize,
}

impl FlatPoints {
    pub(crate) fn with_capacity(n: usize, dim: usize) -> Self {
        Self {
            coords: Vec::with_capacity(n * dim),
            dim,
        }
    }

    /// Copy every row of `m`.
    pub(crate) fn from_matrix(m: &PointMatrix) -> Self {
        Self::from_matrix_rows(m, 0..m.nrows())
    }

    /// Copy the given row range of `m`.
    pub(crate) fn from_matrix_rows(m: &PointMatrix, rows: Range<usize>) -> Self {
        let dim = m.ncols();
        let mut points = Self::with_capacity(rows.len(), dim);
        for row in rows {
            for col in 0..dim {
                points.coords.push(m[(row, col)]);
            }
        }
        points
    }

    /// Concatenate two point sets of equal dimensionality.
    pub(crate) fn concat(&self, other: &FlatPoints) -> FlatPoints {
        debug_assert_eq!(self.dim, other.dim);
        let mut coords = Vec::with_capacity(self.coords.len() + other.coords.len());
        coords.extend_from_slice(&self.coords);
        coords.extend_from_slice(&other.coords);
        FlatPoints {
            coords,
            dim: self.dim,
        }
    }

    /// Replace this buffer's contents with the selected rows of `src`.
    pub(crate) fn gather(&mut self, src: &FlatPoints, rows: &[usize]) {
        debug_assert_eq!(self.dim, src.dim);
        self.coords.clear();
        for &row in rows {
            self.coords.extend_from_slice(src.row(row));
        }
    }

    pub(crate) fn n(&self) -> usize {
        self.coords.len() / self.dim
    }

    pub(crate) fn dim(&self) -> usize {
        self.dim
    }

    pub(crate) fn row(&self, i: usize) -> &[f64] {
        &self.coords[i * self.dim..(i + 1) * self.dim]
    }

    pub(crate) fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.coords.chunks_exact(self.dim)
    }
}

/// Reject zero-dimensional and non-finite input.
pub(crate) fn validate_matrix(m: &PointMatrix) -> Result<(), ConfigError> {
    if m.ncols() == 0 {
        return Err(ConfigError::ZeroDimension);
    }
    for row in 0..m.nrows() {
        for col in 0..m.ncols() {
            if !m[(row, col)].is_finite() {
                return Err(ConfigError::NonFiniteCoordinate { row, col });
            }
        }
    }
    Ok(())
}

/// Validate two samples given as separate matrices.
pub(crate) fn validate_sample_pair(x: &PointMatrix, y: &PointMatrix) -> Result<(), ConfigError> {
    if x.nrows() == 0 || y.nrows() == 0 {
        return Err(ConfigError::EmptySample);
    }
    if x.ncols() != y.ncols() {
        return Err(ConfigError::DimensionMismatch {
            left: x.ncols(),
            right: y.ncols(),
        });
    }
    validate_matrix(x)?;
    validate_matrix(y)
}

/// Validate a stacked matrix with its `(n1, n2)` prefix/suffix partition.
pub(crate) fn validate_partition(m: &PointMatrix, n1: usize, n2: usize) -> Result<(), ConfigError> {
    if n1 == 0 || n2 == 0 || n1 + n2 != m.nrows() {
        return Err(ConfigError::BadPartition {
            n1,
            n2,
            rows: m.nrows(),
        });
    }
    validate_matrix(m)
}
