//! Configuration for the permutation test.

use serde::{Deserialize, Serialize};

use crate::constants::{AUTO_INDEX_THRESHOLD, DEFAULT_PERMUTATIONS};

/// Configuration options for [`FfTest`](crate::FfTest).
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of permutation trials (default: 1,000).
    ///
    /// With zero trials the p-value degenerates to a single uniform draw;
    /// callers should treat that as "test not run".
    pub permutations: usize,

    /// Orthant-counting strategy (default: `Auto`).
    pub method: CountingMethod,

    /// Optional deterministic base seed.
    ///
    /// `None` draws a random seed; the seed actually used is reported in
    /// [`Metadata`](crate::Metadata) so any run can be reproduced.
    pub seed: Option<u64>,

    /// Run trials on the shared thread pool (default: false).
    ///
    /// Sequential and parallel runs produce identical results for the same
    /// seed; this flag only changes how trials are scheduled.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            permutations: DEFAULT_PERMUTATIONS,
            method: CountingMethod::Auto,
            seed: None,
            parallel: false,
        }
    }
}

/// Strategy for counting points inside an orthant around an origin.
///
/// The strategy is selected once per statistic evaluation, never per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountingMethod {
    /// Pick based on the combined sample size.
    ///
    /// Small point sets use brute force; the index construction overhead is
    /// only repaid once enough origins share the same pair of indexes.
    Auto,

    /// Compare every point against the origin for every orthant, O(2^d · n)
    /// per origin. Exact boundary semantics.
    Brute,

    /// Build one spatial range index per sample and answer each orthant with
    /// a range-counting query. Subject to the open-boundary epsilon
    /// tolerance ([`BOUNDARY_EPS`](crate::BOUNDARY_EPS)).
    Indexed,
}

impl Default for CountingMethod {
    fn default() -> Self {
        Self::Auto
    }
}

impl CountingMethod {
    /// Resolve `Auto` against the combined number of points.
    ///
    /// Returns `Brute` or `Indexed`, never `Auto`.
    pub fn resolve(self, total_points: usize) -> CountingMethod {
        match self {
            CountingMethod::Auto => {
                if total_points < AUTO_INDEX_THRESHOLD {
                    CountingMethod::Brute
                } else {
                    CountingMethod::Indexed
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_resolves_by_size() {
        assert_eq!(CountingMethod::Auto.resolve(8), CountingMethod::Brute);
        assert_eq!(CountingMethod::Auto.resolve(5000), CountingMethod::Indexed);
        assert_eq!(CountingMethod::Brute.resolve(5000), CountingMethod::Brute);
        assert_eq!(CountingMethod::Indexed.resolve(8), CountingMethod::Indexed);
    }
}
