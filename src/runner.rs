//! Builder-style entry point for running the test.

use crate::config::{Config, CountingMethod};
use crate::permutation::{run_permutation_test, run_permutation_test_parallel};
use crate::result::TestResult;
use crate::types::{ConfigError, PointMatrix};

/// Main entry point for the Fasano–Franceschini permutation test.
///
/// Use the builder pattern to configure and run tests.
///
/// # Example
///
/// ```ignore
/// use fasano_franceschini::{FfTest, PointMatrix};
///
/// let x = PointMatrix::from_row_slice(3, 2, &[0.0, 0.1, 1.0, 0.9, 2.0, 2.1]);
/// let y = PointMatrix::from_row_slice(3, 2, &[5.0, 5.2, 6.0, 5.9, 7.0, 7.1]);
///
/// let result = FfTest::new()
///     .permutations(2000)
///     .seed(42)
///     .run(&x, &y)?;
///
/// println!("p = {:.4}", result.p_value);
/// # Ok::<(), fasano_franceschini::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FfTest {
    config: Config,
}

impl Default for FfTest {
    fn default() -> Self {
        Self::new()
    }
}

impl FfTest {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create with a reduced trial count for smoke tests and calibration
    /// loops where runtime matters more than p-value resolution.
    pub fn quick() -> Self {
        Self {
            config: Config {
                permutations: 200,
                ..Config::default()
            },
        }
    }

    /// Set the number of permutation trials.
    pub fn permutations(mut self, n: usize) -> Self {
        self.config.permutations = n;
        self
    }

    /// Set the orthant-counting strategy.
    pub fn method(mut self, method: CountingMethod) -> Self {
        self.config.method = method;
        self
    }

    /// Set a deterministic base seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Run trials on the shared thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the permutation test on two samples.
    ///
    /// # Errors
    ///
    /// The configuration errors of
    /// [`run_permutation_test`](crate::run_permutation_test).
    pub fn run(&self, x: &PointMatrix, y: &PointMatrix) -> Result<TestResult, ConfigError> {
        if self.config.parallel {
            run_permutation_test_parallel(
                x,
                y,
                self.config.permutations,
                self.config.method,
                self.config.seed,
            )
        } else {
            run_permutation_test(
                x,
                y,
                self.config.permutations,
                self.config.method,
                self.config.seed,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_setters() {
        let test = FfTest::new()
            .permutations(500)
            .method(CountingMethod::Indexed)
            .seed(9)
            .parallel(true);

        let config = test.config();
        assert_eq!(config.permutations, 500);
        assert_eq!(config.method, CountingMethod::Indexed);
        assert_eq!(config.seed, Some(9));
        assert!(config.parallel);
    }

    #[test]
    fn quick_reduces_trials() {
        assert!(FfTest::quick().config().permutations < FfTest::new().config().permutations);
    }
}
