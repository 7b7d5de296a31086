//! Test result types.

use serde::{Deserialize, Serialize};

use crate::config::CountingMethod;

/// Complete result from one permutation test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Observed discrepancy statistic D on the unshuffled samples.
    pub statistic: u64,

    /// Permuted statistics strictly greater than the observed one.
    pub greater_count: u64,

    /// Permuted statistics exactly equal to the observed one.
    pub equal_count: u64,

    /// Tie-corrected randomized p-value in `[0, 1]`.
    ///
    /// `p = (greater + (1 + equal)·U) / (1 + permutations)` with one
    /// uniform draw `U` per test invocation.
    pub p_value: f64,

    /// Run parameters, sufficient to reproduce the result exactly.
    pub metadata: Metadata,
}

/// Parameters a test ran with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Rows in the first sample.
    pub n1: usize,

    /// Rows in the second sample.
    pub n2: usize,

    /// Coordinates per point.
    pub dim: usize,

    /// Number of permutation trials.
    pub permutations: usize,

    /// Base seed actually used (the caller's, or a randomly drawn one).
    pub seed: u64,

    /// Counting strategy after `Auto` resolution.
    pub method: CountingMethod,
}
