use regex_lite::Regex;

use crate::results::TestRunResult;

const FAILURE_KEYWORDS: &[&str] = &["fail", "error", "crash", "fatal", "abort"];
const SUCCESS_KEYWORDS: &[&str] = &["passed", "succeeded", "success"];

/// Last resort for output with no framework markers.
///
/// Explicit `N passed` / `N failed` counts win; otherwise keywords decide.
/// Ambiguous or empty output is reported as a failure.
pub struct KeywordFallback {
    passed: Regex,
    failed: Regex,
}

impl KeywordFallback {
    pub fn new() -> Self {
        Self {
            passed: Regex::new(r"(?i)(\d+)\s+(?:tests?\s+)?passed")
                .expect("built-in passed count pattern must compile"),
            failed: Regex::new(r"(?i)(\d+)\s+(?:tests?\s+)?failed")
                .expect("built-in failed count pattern must compile"),
        }
    }

    pub fn parse(&self, output: &str) -> TestRunResult {
        let passed = count(&self.passed, output);
        let failed = count(&self.failed, output);
        if passed.is_some() || failed.is_some() {
            return TestRunResult::from_counts(passed.unwrap_or(0), failed.unwrap_or(0));
        }

        let lower = output.to_lowercase();
        if FAILURE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return TestRunResult::unknown();
        }
        if SUCCESS_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return TestRunResult {
                success: true,
                ..TestRunResult::unknown()
            };
        }
        TestRunResult::unknown()
    }
}

impl Default for KeywordFallback {
    fn default() -> Self {
        Self::new()
    }
}

fn count(re: &Regex, output: &str) -> Option<u32> {
    re.captures(output)?.get(1)?.as_str().parse().ok()
}
