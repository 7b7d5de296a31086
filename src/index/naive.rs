//! Linear-scan fallback with exact boundary semantics.

use super::{RangeCount, RangeQuery};
use crate::types::{ConfigError, FlatPoints, PointMatrix};

/// Brute-force range index: a linear scan over an immutable copy of the
/// points, honoring open/closed boundaries exactly (no epsilon nudge).
///
/// Used to cross-check [`SpatialRangeIndex`](super::SpatialRangeIndex) and
/// for inputs too small to justify tree construction.
#[derive(Debug, Clone)]
pub struct NaiveRangeIndex {
    points: FlatPoints,
}

impl NaiveRangeIndex {
    /// Build an index over the rows of `points`.
    ///
    /// # Errors
    ///
    /// Same construction contract as
    /// [`SpatialRangeIndex::build`](super::SpatialRangeIndex::build):
    /// `ConfigError::EmptyPointSet` on zero rows, `ZeroDimension` on zero
    /// columns.
    pub fn build(points: &PointMatrix) -> Result<Self, ConfigError> {
        if points.nrows() == 0 {
            return Err(ConfigError::EmptyPointSet);
        }
        if points.ncols() == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        Ok(Self {
            points: FlatPoints::from_matrix(points),
        })
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.n()
    }

    /// Always `false`: construction rejects empty point sets.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl RangeCount for NaiveRangeIndex {
    fn count_in_range(&self, query: &RangeQuery) -> usize {
        assert_eq!(
            query.dim(),
            self.points.dim(),
            "query dimensionality must match the indexed points"
        );
        self.points.rows().filter(|p| query.admits(p)).count()
    }

    fn points_in_range(&self, query: &RangeQuery) -> Vec<&[f64]> {
        assert_eq!(
            query.dim(),
            self.points.dim(),
            "query dimensionality must match the indexed points"
        );
        self.points.rows().filter(|p| query.admits(p)).collect()
    }
}
