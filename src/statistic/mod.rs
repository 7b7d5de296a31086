//! The Fasano–Franceschini discrepancy statistic.
//!
//! For every origin drawn from each sample, the space around the origin is
//! partitioned into the 2^d orthants formed by choosing, per axis, the
//! strictly-greater or strictly-less half-line. The per-origin value is the
//! maximal weighted imbalance `|n2·c1 − n1·c2|` of orthant occupancy; the
//! statistic `D = D1 + D2` sums the maxima over each sample's own origins.
//!
//! Counts are integers, so the statistic is exact (`u64`) and permutation
//! ties compare exactly.

mod orthant;

pub(crate) use orthant::{BruteForceOrthants, IndexedOrthants, OrthantCounts};

use crate::config::CountingMethod;
use crate::types::{
    validate_partition, validate_sample_pair, ConfigError, FlatPoints, PointMatrix,
};

/// Weighted imbalance of one orthant's occupancy, normalizing for unequal
/// sample sizes: `|n2·c1 − n1·c2|`.
pub(crate) fn orthant_discrepancy(c1: u64, c2: u64, n1: u64, n2: u64) -> u64 {
    (n2 * c1).abs_diff(n1 * c2)
}

/// Maximal discrepancy over all 2^d orthants around one origin.
///
/// The maximum starts at 0 and updates on strict `>`, so an all-zero
/// discrepancy is representable and the first maximal orthant wins ties.
fn per_origin_statistic<C: OrthantCounts>(counter: &C, origin: &[f64], n1: u64, n2: u64) -> u64 {
    let dim = origin.len();
    let mut best = 0;
    for signs in 0..(1u64 << dim) {
        let (c1, c2) = counter.count(origin, signs);
        let diff = orthant_discrepancy(c1, c2, n1, n2);
        if diff > best {
            best = diff;
        }
    }
    best
}

fn max_over_origins<C: OrthantCounts>(
    counter: &C,
    origins: &FlatPoints,
    n1: u64,
    n2: u64,
) -> u64 {
    let mut best = 0;
    for origin in origins.rows() {
        let value = per_origin_statistic(counter, origin, n1, n2);
        if value > best {
            best = value;
        }
    }
    best
}

/// Statistic over an already-partitioned pair of point sets.
pub(crate) fn statistic_on_split(
    sample1: &FlatPoints,
    sample2: &FlatPoints,
    method: CountingMethod,
) -> u64 {
    let n1 = sample1.n() as u64;
    let n2 = sample2.n() as u64;
    match method.resolve(sample1.n() + sample2.n()) {
        CountingMethod::Indexed => {
            let counter = IndexedOrthants::new(sample1, sample2);
            max_over_origins(&counter, sample1, n1, n2)
                + max_over_origins(&counter, sample2, n1, n2)
        }
        // Brute (Auto never survives resolve).
        _ => {
            let counter = BruteForceOrthants::new(sample1, sample2);
            max_over_origins(&counter, sample1, n1, n2)
                + max_over_origins(&counter, sample2, n1, n2)
        }
    }
}

/// Compute the full statistic `D = D1 + D2` over a stacked matrix.
///
/// Rows `0..n1` of `m` form sample 1, rows `n1..n1+n2` form sample 2. `D1`
/// is the maximal per-origin discrepancy over sample 1's origins, `D2` the
/// analogous maximum over sample 2's.
///
/// # Errors
///
/// `ConfigError::BadPartition` when `n1` or `n2` is zero or they do not sum
/// to the row count; `ZeroDimension` / `NonFiniteCoordinate` for malformed
/// coordinates.
pub fn full_statistic(
    m: &PointMatrix,
    n1: usize,
    n2: usize,
    method: CountingMethod,
) -> Result<u64, ConfigError> {
    validate_partition(m, n1, n2)?;
    let sample1 = FlatPoints::from_matrix_rows(m, 0..n1);
    let sample2 = FlatPoints::from_matrix_rows(m, n1..n1 + n2);
    Ok(statistic_on_split(&sample1, &sample2, method))
}

/// Compute the statistic on two separate samples (stacks `x` over `y`, no
/// shuffling).
///
/// # Errors
///
/// `ConfigError::EmptySample` when either matrix has no rows,
/// `DimensionMismatch` when their column counts differ, plus the coordinate
/// errors of [`full_statistic`].
pub fn statistic_from_samples(
    x: &PointMatrix,
    y: &PointMatrix,
    method: CountingMethod,
) -> Result<u64, ConfigError> {
    validate_sample_pair(x, y)?;
    let sample1 = FlatPoints::from_matrix(x);
    let sample2 = FlatPoints::from_matrix(y);
    Ok(statistic_on_split(&sample1, &sample2, method))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn discrepancy_is_symmetric_in_weighting() {
        assert_eq!(orthant_discrepancy(3, 0, 2, 1), 3);
        assert_eq!(orthant_discrepancy(0, 3, 1, 2), 3);
        assert_eq!(orthant_discrepancy(2, 2, 4, 4), 0);
    }

    #[test]
    fn separated_1d_samples() {
        // Fully separated 1-D samples: D = 2 · n1 · n2.
        let x = PointMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]);
        let y = PointMatrix::from_row_slice(3, 1, &[10.0, 20.0, 30.0]);
        let brute = statistic_from_samples(&x, &y, CountingMethod::Brute).unwrap();
        let indexed = statistic_from_samples(&x, &y, CountingMethod::Indexed).unwrap();
        assert_eq!(brute, 18);
        assert_eq!(indexed, 18);
    }

    #[test]
    fn duplicate_origins_tie_on_every_axis() {
        // Duplicated origin rows tie themselves on every axis and count in
        // no orthant; D is still well defined.
        let x = PointMatrix::from_row_slice(2, 1, &[0.0, 0.0]);
        let y = PointMatrix::from_row_slice(1, 1, &[1.0]);
        let brute = statistic_from_samples(&x, &y, CountingMethod::Brute).unwrap();
        let indexed = statistic_from_samples(&x, &y, CountingMethod::Indexed).unwrap();
        assert_eq!(brute, 4);
        assert_eq!(indexed, 4);
    }

    #[test]
    fn brute_matches_indexed_up_to_4d() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(17);
        for dim in 1..=4 {
            let n1 = 30;
            let n2 = 45;
            let data: Vec<f64> = (0..(n1 + n2) * dim)
                .map(|_| rng.random_range(-100..100) as f64)
                .collect();
            let m = PointMatrix::from_row_slice(n1 + n2, dim, &data);
            let brute = full_statistic(&m, n1, n2, CountingMethod::Brute).unwrap();
            let indexed = full_statistic(&m, n1, n2, CountingMethod::Indexed).unwrap();
            assert_eq!(brute, indexed, "dim {}", dim);
        }
    }

    #[test]
    fn swapping_samples_preserves_d() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(23);
        let x_data: Vec<f64> = (0..20 * 2).map(|_| rng.random_range(-50..50) as f64).collect();
        let y_data: Vec<f64> = (0..13 * 2).map(|_| rng.random_range(-50..50) as f64).collect();
        let x = PointMatrix::from_row_slice(20, 2, &x_data);
        let y = PointMatrix::from_row_slice(13, 2, &y_data);

        let xy = statistic_from_samples(&x, &y, CountingMethod::Brute).unwrap();
        let yx = statistic_from_samples(&y, &x, CountingMethod::Brute).unwrap();
        assert_eq!(xy, yx);
    }

    #[test]
    fn partition_errors() {
        let m = PointMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]);
        assert!(full_statistic(&m, 3, 0, CountingMethod::Brute).is_err());
        assert!(full_statistic(&m, 0, 3, CountingMethod::Brute).is_err());
        assert!(full_statistic(&m, 2, 2, CountingMethod::Brute).is_err());
    }
}
