//! kd-tree range index with subtree counts and bounding boxes.

use super::{RangeCount, RangeQuery};
use crate::constants::BOUNDARY_EPS;
use crate::types::{ConfigError, FlatPoints, PointMatrix};

/// Exact orthogonal range counting over an immutable copy of a point set.
///
/// The tree splits on the median along `depth % d`, and every node carries
/// its subtree size and bounding box, so a query descends only into
/// subtrees that straddle the rectangle: disjoint subtrees contribute
/// nothing, fully contained subtrees contribute their size without further
/// traversal.
///
/// The native query primitive is closed (inclusive) on every side. An open
/// boundary is emulated by nudging that bound inward by
/// [`BOUNDARY_EPS`] (1e-12) before querying, so points lying within the
/// epsilon of an open boundary may be misclassified. Keep coordinate
/// separations well above the epsilon; [`NaiveRangeIndex`] has exact
/// semantics for cross-checks.
///
/// [`NaiveRangeIndex`]: super::NaiveRangeIndex
#[derive(Debug, Clone)]
pub struct SpatialRangeIndex {
    points: FlatPoints,
    nodes: Vec<KdNode>,
    root: usize,
}

#[derive(Debug, Clone)]
struct KdNode {
    point: usize,
    left: Option<usize>,
    right: Option<usize>,
    size: usize,
    min: Box<[f64]>,
    max: Box<[f64]>,
}

impl SpatialRangeIndex {
    /// Build an index over the rows of `points`.
    ///
    /// # Errors
    ///
    /// `ConfigError::EmptyPointSet` for a matrix with zero rows and
    /// `ConfigError::ZeroDimension` for zero columns. Heterogeneous point
    /// dimensionality cannot occur with a matrix input.
    pub fn build(points: &PointMatrix) -> Result<Self, ConfigError> {
        if points.nrows() == 0 {
            return Err(ConfigError::EmptyPointSet);
        }
        if points.ncols() == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        Ok(Self::from_points(FlatPoints::from_matrix(points)))
    }

    pub(crate) fn from_points(points: FlatPoints) -> Self {
        debug_assert!(points.n() > 0 && points.dim() > 0);
        let mut ids: Vec<usize> = (0..points.n()).collect();
        let mut nodes = Vec::with_capacity(points.n());
        let root = build_subtree(&points, &mut ids, 0, &mut nodes);
        Self {
            points,
            nodes,
            root,
        }
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.n()
    }

    /// Always `false`: construction rejects empty point sets.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn count_closed(&self, node: usize, lower: &[f64], upper: &[f64]) -> usize {
        let nd = &self.nodes[node];
        let dim = self.points.dim();
        for a in 0..dim {
            if nd.min[a] > upper[a] || nd.max[a] < lower[a] {
                return 0;
            }
        }
        if (0..dim).all(|a| lower[a] <= nd.min[a] && nd.max[a] <= upper[a]) {
            return nd.size;
        }
        let mut count = usize::from(inside_closed(self.points.row(nd.point), lower, upper));
        if let Some(left) = nd.left {
            count += self.count_closed(left, lower, upper);
        }
        if let Some(right) = nd.right {
            count += self.count_closed(right, lower, upper);
        }
        count
    }

    fn collect_closed(&self, node: usize, lower: &[f64], upper: &[f64], out: &mut Vec<usize>) {
        let nd = &self.nodes[node];
        let dim = self.points.dim();
        for a in 0..dim {
            if nd.min[a] > upper[a] || nd.max[a] < lower[a] {
                return;
            }
        }
        if (0..dim).all(|a| lower[a] <= nd.min[a] && nd.max[a] <= upper[a]) {
            self.collect_subtree(node, out);
            return;
        }
        if inside_closed(self.points.row(nd.point), lower, upper) {
            out.push(nd.point);
        }
        if let Some(left) = nd.left {
            self.collect_closed(left, lower, upper, out);
        }
        if let Some(right) = nd.right {
            self.collect_closed(right, lower, upper, out);
        }
    }

    fn collect_subtree(&self, node: usize, out: &mut Vec<usize>) {
        let nd = &self.nodes[node];
        out.push(nd.point);
        if let Some(left) = nd.left {
            self.collect_subtree(left, out);
        }
        if let Some(right) = nd.right {
            self.collect_subtree(right, out);
        }
    }
}

impl RangeCount for SpatialRangeIndex {
    fn count_in_range(&self, query: &RangeQuery) -> usize {
        assert_eq!(
            query.dim(),
            self.points.dim(),
            "query dimensionality must match the indexed points"
        );
        let (lower, upper) = effective_bounds(query);
        self.count_closed(self.root, &lower, &upper)
    }

    fn points_in_range(&self, query: &RangeQuery) -> Vec<&[f64]> {
        assert_eq!(
            query.dim(),
            self.points.dim(),
            "query dimensionality must match the indexed points"
        );
        let (lower, upper) = effective_bounds(query);
        let mut ids = Vec::new();
        self.collect_closed(self.root, &lower, &upper, &mut ids);
        ids.into_iter().map(|i| self.points.row(i)).collect()
    }
}

/// Nudge open boundaries inward so a closed-bounds query excludes them.
///
/// Infinite bounds are unaffected: ±inf stays ±inf under the nudge.
fn effective_bounds(query: &RangeQuery) -> (Vec<f64>, Vec<f64>) {
    let mut lower = query.lower.clone();
    let mut upper = query.upper.clone();
    for a in 0..query.dim() {
        if !query.lower_closed[a] {
            lower[a] += BOUNDARY_EPS;
        }
        if !query.upper_closed[a] {
            upper[a] -= BOUNDARY_EPS;
        }
    }
    (lower, upper)
}

fn inside_closed(point: &[f64], lower: &[f64], upper: &[f64]) -> bool {
    point
        .iter()
        .enumerate()
        .all(|(a, &coord)| lower[a] <= coord && coord <= upper[a])
}

/// Recursively build the subtree over `ids`, returning its node id.
///
/// `ids` is partitioned in place around the median on axis `depth % d`;
/// the bounding box of a node is its own point merged with both children.
fn build_subtree(
    points: &FlatPoints,
    ids: &mut [usize],
    depth: usize,
    nodes: &mut Vec<KdNode>,
) -> usize {
    let dim = points.dim();
    let axis = depth % dim;
    let size = ids.len();
    let mid = ids.len() / 2;
    ids.select_nth_unstable_by(mid, |&a, &b| {
        points.row(a)[axis].total_cmp(&points.row(b)[axis])
    });
    let point = ids[mid];

    let (left_ids, rest) = ids.split_at_mut(mid);
    let right_ids = &mut rest[1..];
    let left = if left_ids.is_empty() {
        None
    } else {
        Some(build_subtree(points, left_ids, depth + 1, nodes))
    };
    let right = if right_ids.is_empty() {
        None
    } else {
        Some(build_subtree(points, right_ids, depth + 1, nodes))
    };

    let mut min: Box<[f64]> = points.row(point).to_vec().into_boxed_slice();
    let mut max: Box<[f64]> = points.row(point).to_vec().into_boxed_slice();
    for child in [left, right].into_iter().flatten() {
        let child_node = &nodes[child];
        for a in 0..dim {
            if child_node.min[a] < min[a] {
                min[a] = child_node.min[a];
            }
            if child_node.max[a] > max[a] {
                max[a] = child_node.max[a];
            }
        }
    }

    nodes.push(KdNode {
        point,
        left,
        right,
        size,
        min,
        max,
    });
    nodes.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::NaiveRangeIndex;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn integer_points(n: usize, dim: usize, seed: u64) -> PointMatrix {
        // Integer-valued coordinates keep every separation far above the
        // open-boundary epsilon.
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let data: Vec<f64> = (0..n * dim)
            .map(|_| rng.random_range(-50..50) as f64)
            .collect();
        PointMatrix::from_row_slice(n, dim, &data)
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            SpatialRangeIndex::build(&PointMatrix::zeros(0, 3)).err(),
            Some(ConfigError::EmptyPointSet)
        );
        assert_eq!(
            SpatialRangeIndex::build(&PointMatrix::zeros(3, 0)).err(),
            Some(ConfigError::ZeroDimension)
        );
    }

    #[test]
    fn unbounded_query_counts_everything() {
        let m = integer_points(40, 3, 1);
        let index = SpatialRangeIndex::build(&m).unwrap();
        let query = RangeQuery::closed(vec![f64::NEG_INFINITY; 3], vec![f64::INFINITY; 3]);
        assert_eq!(index.count_in_range(&query), 40);
        assert_eq!(index.points_in_range(&query).len(), 40);
    }

    #[test]
    fn single_point_boundaries() {
        let m = PointMatrix::from_row_slice(1, 2, &[3.0, 4.0]);
        let index = SpatialRangeIndex::build(&m).unwrap();

        let closed = RangeQuery::closed(vec![3.0, 4.0], vec![3.0, 4.0]);
        assert_eq!(index.count_in_range(&closed), 1);

        // Open lower bound at the point's own coordinate excludes it.
        let open = RangeQuery::new(
            vec![3.0, f64::NEG_INFINITY],
            vec![f64::INFINITY, f64::INFINITY],
            vec![false, true],
            vec![true, true],
        );
        assert_eq!(index.count_in_range(&open), 0);
    }

    #[test]
    fn matches_naive_on_random_rectangles() {
        let m = integer_points(120, 3, 7);
        let index = SpatialRangeIndex::build(&m).unwrap();
        let naive = NaiveRangeIndex::build(&m).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);

        for _ in 0..200 {
            let mut lower = Vec::with_capacity(3);
            let mut upper = Vec::with_capacity(3);
            let mut lower_closed = Vec::with_capacity(3);
            let mut upper_closed = Vec::with_capacity(3);
            for _ in 0..3 {
                let a = rng.random_range(-60..60) as f64;
                let b = rng.random_range(-60..60) as f64;
                lower.push(a.min(b));
                upper.push(a.max(b));
                lower_closed.push(rng.random::<bool>());
                upper_closed.push(rng.random::<bool>());
            }
            let query = RangeQuery::new(lower, upper, lower_closed, upper_closed);
            let count = index.count_in_range(&query);
            assert_eq!(count, naive.count_in_range(&query));
            assert_eq!(count, index.points_in_range(&query).len());
        }
    }

    #[test]
    fn duplicate_points_all_counted() {
        let m = PointMatrix::from_row_slice(4, 2, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0]);
        let index = SpatialRangeIndex::build(&m).unwrap();
        let query = RangeQuery::closed(vec![1.0, 1.0], vec![1.0, 1.0]);
        assert_eq!(index.count_in_range(&query), 3);
    }
}
