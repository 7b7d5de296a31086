//! Per-orthant point counting around an origin.

use crate::index::{RangeCount, RangeQuery, SpatialRangeIndex};
use crate::types::FlatPoints;

/// Counting capability: how many points of each sample lie strictly inside
/// one orthant around an origin.
///
/// One implementation is selected per statistic evaluation and reused for
/// every origin and every sign pattern of that evaluation.
pub(crate) trait OrthantCounts {
    /// Counts `(sample 1, sample 2)` strictly inside the orthant identified
    /// by `signs`.
    ///
    /// Bit `a` of `signs` set means axis `a` takes the "greater than the
    /// origin" half-line; clear means "less than". Comparisons are strict on
    /// every axis, so a point tying the origin on an axis is on no side of
    /// that axis. In particular the origin never counts itself, even when
    /// it is a member of one of the samples.
    fn count(&self, origin: &[f64], signs: u64) -> (u64, u64);
}

/// Strict per-axis comparison over every point, O(2^d · n) per origin.
pub(crate) struct BruteForceOrthants<'a> {
    sample1: &'a FlatPoints,
    sample2: &'a FlatPoints,
}

impl<'a> BruteForceOrthants<'a> {
    pub(crate) fn new(sample1: &'a FlatPoints, sample2: &'a FlatPoints) -> Self {
        Self { sample1, sample2 }
    }
}

impl OrthantCounts for BruteForceOrthants<'_> {
    fn count(&self, origin: &[f64], signs: u64) -> (u64, u64) {
        (
            count_strict(self.sample1, origin, signs),
            count_strict(self.sample2, origin, signs),
        )
    }
}

fn count_strict(points: &FlatPoints, origin: &[f64], signs: u64) -> u64 {
    points
        .rows()
        .filter(|p| inside_orthant(p, origin, signs))
        .count() as u64
}

fn inside_orthant(point: &[f64], origin: &[f64], signs: u64) -> bool {
    for (a, (&coord, &origin_coord)) in point.iter().zip(origin).enumerate() {
        let inside = if signs & (1 << a) != 0 {
            coord > origin_coord
        } else {
            coord < origin_coord
        };
        if !inside {
            return false;
        }
    }
    true
}

/// One spatial range index per sample, built once per evaluation and
/// queried per orthant.
///
/// Each query puts an exclusive bound at the origin's coordinate on every
/// axis and leaves the opposite side unbounded, so only the origin side of
/// the rectangle is subject to the open-boundary epsilon tolerance.
pub(crate) struct IndexedOrthants {
    index1: SpatialRangeIndex,
    index2: SpatialRangeIndex,
}

impl IndexedOrthants {
    pub(crate) fn new(sample1: &FlatPoints, sample2: &FlatPoints) -> Self {
        Self {
            index1: SpatialRangeIndex::from_points(sample1.clone()),
            index2: SpatialRangeIndex::from_points(sample2.clone()),
        }
    }
}

impl OrthantCounts for IndexedOrthants {
    fn count(&self, origin: &[f64], signs: u64) -> (u64, u64) {
        let query = orthant_query(origin, signs);
        (
            self.index1.count_in_range(&query) as u64,
            self.index2.count_in_range(&query) as u64,
        )
    }
}

fn orthant_query(origin: &[f64], signs: u64) -> RangeQuery {
    let dim = origin.len();
    let mut lower = vec![f64::NEG_INFINITY; dim];
    let mut upper = vec![f64::INFINITY; dim];
    let mut lower_closed = vec![true; dim];
    let mut upper_closed = vec![true; dim];
    for a in 0..dim {
        if signs & (1 << a) != 0 {
            lower[a] = origin[a];
            lower_closed[a] = false;
        } else {
            upper[a] = origin[a];
            upper_closed[a] = false;
        }
    }
    RangeQuery::new(lower, upper, lower_closed, upper_closed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointMatrix;

    fn flat(rows: usize, dim: usize, data: &[f64]) -> FlatPoints {
        FlatPoints::from_matrix(&PointMatrix::from_row_slice(rows, dim, data))
    }

    #[test]
    fn strict_comparison_excludes_axis_ties() {
        // Sample 1 holds the origin twice plus one discriminated point.
        let sample1 = flat(3, 2, &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
        let sample2 = flat(2, 2, &[2.0, 2.0, -1.0, 3.0]);
        let counter = BruteForceOrthants::new(&sample1, &sample2);

        // Orthant (+, +) around the origin: the duplicated origins tie on
        // both axes and fall in no orthant.
        let (c1, c2) = counter.count(&[0.0, 0.0], 0b11);
        assert_eq!((c1, c2), (1, 1));

        // Orthant (-, +): only the sample-2 point at (-1, 3).
        let (c1, c2) = counter.count(&[0.0, 0.0], 0b10);
        assert_eq!((c1, c2), (0, 1));
    }

    #[test]
    fn brute_and_indexed_agree_per_orthant() {
        let sample1 = flat(4, 2, &[0.0, 0.0, 1.0, 5.0, -3.0, 2.0, 4.0, -4.0]);
        let sample2 = flat(3, 2, &[2.0, 2.0, -1.0, -1.0, 5.0, 1.0]);
        let brute = BruteForceOrthants::new(&sample1, &sample2);
        let indexed = IndexedOrthants::new(&sample1, &sample2);

        for origin in sample1.rows().chain(sample2.rows()) {
            for signs in 0..4u64 {
                assert_eq!(
                    brute.count(origin, signs),
                    indexed.count(origin, signs),
                    "origin {:?}, signs {:#b}",
                    origin,
                    signs
                );
            }
        }
    }
}
