//! Terminal output formatting with colors.

use colored::Colorize;

use crate::result::TestResult;

/// Significance threshold used only for the verdict line of the formatted
/// report; the caller should judge `p_value` against their own alpha.
const REPORT_ALPHA: f64 = 0.05;

/// Format a [`TestResult`] for human-readable terminal output.
pub fn format_result(result: &TestResult) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("fasano-franceschini\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!(
        "  Samples: {} vs {} points in {} dimension(s)\n",
        result.metadata.n1, result.metadata.n2, result.metadata.dim
    ));
    output.push_str(&format!(
        "  Permutations: {} ({:?} counting, seed {})\n",
        result.metadata.permutations, result.metadata.method, result.metadata.seed
    ));
    output.push('\n');

    if result.p_value < REPORT_ALPHA {
        output.push_str(&format!(
            "  {}\n\n",
            "\u{26A0} Samples differ significantly".yellow().bold()
        ));
    } else {
        output.push_str(&format!(
            "  {}\n\n",
            "\u{2713} No significant difference detected".green().bold()
        ));
    }

    output.push_str(&format!("    Observed D:  {}\n", result.statistic));
    output.push_str(&format!(
        "    Trials > D:  {}    Trials = D:  {}\n",
        result.greater_count, result.equal_count
    ));
    output.push_str(&format!("    p-value:     {:.4}\n", result.p_value));

    if result.metadata.permutations == 0 {
        output.push('\n');
        output.push_str(&sep);
        output.push('\n');
        output.push_str("Note: zero permutation trials; the p-value is a single uniform draw.\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CountingMethod;
    use crate::result::Metadata;

    fn make_result(p_value: f64, permutations: usize) -> TestResult {
        TestResult {
            statistic: 42,
            greater_count: 3,
            equal_count: 1,
            p_value,
            metadata: Metadata {
                n1: 10,
                n2: 12,
                dim: 2,
                permutations,
                seed: 7,
                method: CountingMethod::Brute,
            },
        }
    }

    #[test]
    fn reports_core_fields() {
        let text = format_result(&make_result(0.42, 100));
        assert!(text.contains("10 vs 12 points"));
        assert!(text.contains("Observed D:  42"));
        assert!(text.contains("p-value:     0.4200"));
        assert!(text.contains("No significant difference"));
    }

    #[test]
    fn flags_significance_and_degenerate_runs() {
        let text = format_result(&make_result(0.003, 100));
        assert!(text.contains("differ significantly"));

        let text = format_result(&make_result(0.61, 0));
        assert!(text.contains("zero permutation trials"));
    }
}
