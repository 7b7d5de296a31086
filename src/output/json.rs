//! JSON serialization for test results.

use crate::result::TestResult;

/// Serialize a [`TestResult`] to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `TestResult`).
pub fn to_json(result: &TestResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(result)
}

/// Serialize a [`TestResult`] to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `TestResult`).
pub fn to_json_pretty(result: &TestResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
