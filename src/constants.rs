//! Crate-level numeric constants.

/// Inward nudge applied to open (exclusive) boundaries before querying the
/// spatial range index, whose native query primitive is closed on every side.
///
/// Points lying within this distance of an open boundary may be
/// misclassified by the index-accelerated counting strategy. Keep coordinate
/// separations well above this value; the brute-force strategy and
/// [`NaiveRangeIndex`](crate::NaiveRangeIndex) are exact.
pub const BOUNDARY_EPS: f64 = 1e-12;

/// Combined sample size below which [`CountingMethod::Auto`](crate::CountingMethod)
/// resolves to brute-force counting: for small point sets the cost of
/// building one index per sample outweighs the per-origin query savings.
pub const AUTO_INDEX_THRESHOLD: usize = 64;

/// Default number of permutation trials.
pub const DEFAULT_PERMUTATIONS: usize = 1000;
