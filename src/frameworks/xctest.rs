use std::collections::HashMap;

use regex_lite::Regex;

use super::TestFrameworkStrategy;
use crate::results::{FailingTest, TestRunResult};

/// XCTest console output, classic and parallel-testing forms.
///
/// ```text
/// Test Case '-[AppTests.LoginTests testLogin]' passed (0.010 seconds).
/// Test case 'LoginTests.testLogin()' failed on 'Clone 1 of iPhone 15' (0.012 seconds)
/// Executed 12 tests, with 1 failure (0 unexpected) in 0.420 (0.431) seconds
/// ```
pub struct XCTestStrategy {
    placeholder: String,
    case_line: Regex,
    assertion: Regex,
    executed: Regex,
}

impl XCTestStrategy {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            case_line: Regex::new(r"(?m)Test [Cc]ase '([^']+)' (passed|failed)")
                .expect("built-in test case pattern must compile"),
            assertion: Regex::new(r"(?m)^.*?:\d+: error: (-\[[^\]]+\]|[^\s:]+) : (.+)$")
                .expect("built-in assertion pattern must compile"),
            executed: Regex::new(r"Executed (\d+) tests?, with (\d+) failures?")
                .expect("built-in executed pattern must compile"),
        }
    }

    /// First assertion message per test identifier
    fn reasons(&self, output: &str) -> HashMap<String, String> {
        let mut reasons = HashMap::new();
        for caps in self.assertion.captures_iter(output) {
            let (Some(name), Some(message)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            reasons
                .entry(normalize_identifier(name.as_str()))
                .or_insert_with(|| message.as_str().trim().to_string());
        }
        reasons
    }

    /// Counts from the last `Executed` line, which is the run-wide total.
    fn executed_counts(&self, output: &str) -> Option<(u32, u32)> {
        let caps = self.executed.captures_iter(output).last()?;
        let total: u32 = caps.get(1)?.as_str().parse().ok()?;
        let failed: u32 = caps.get(2)?.as_str().parse().ok()?;
        Some((total.saturating_sub(failed), failed))
    }
}

impl TestFrameworkStrategy for XCTestStrategy {
    fn name(&self) -> &'static str {
        "xctest"
    }

    fn can_parse(&self, output: &str) -> bool {
        output.contains("Test Suite '")
            || self.case_line.is_match(output)
            || self.executed.is_match(output)
    }

    fn parse(&self, output: &str) -> TestRunResult {
        // Retried tests report once per attempt; the last attempt decides.
        let mut order = Vec::new();
        let mut outcomes: HashMap<String, bool> = HashMap::new();
        for caps in self.case_line.captures_iter(output) {
            let (Some(name), Some(status)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let id = normalize_identifier(name.as_str());
            if outcomes.insert(id.clone(), status.as_str() == "passed").is_none() {
                order.push(id);
            }
        }

        let (passing, failed_ids): (Vec<String>, Vec<String>) =
            order.into_iter().partition(|id| outcomes.get(id).copied().unwrap_or(false));
        let passed = passing.len() as u32;

        if passed == 0 && failed_ids.is_empty() {
            return match self.executed_counts(output) {
                Some((passed, failed)) => TestRunResult::from_counts(passed, failed),
                None => TestRunResult::from_counts(0, 0),
            };
        }

        let reasons = self.reasons(output);
        let failed = failed_ids.len() as u32;
        let failures = failed_ids
            .into_iter()
            .map(|id| {
                let reason = reasons
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| self.placeholder.clone());
                FailingTest::new(id, reason)
            })
            .collect();
        TestRunResult::from_counts(passed, failed).with_failures(failures)
    }
}

/// `-[Target.Class method]` and `Class.method()` both become `Target.Class/method`.
fn normalize_identifier(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_prefix("-[").and_then(|r| r.strip_suffix(']')) {
        if let Some((class, method)) = inner.split_once(' ') {
            return format!("{}/{}", class, method.trim());
        }
        return inner.to_string();
    }
    if raw.contains('/') {
        return raw.trim_end_matches("()").to_string();
    }
    match raw.rsplit_once('.') {
        Some((class, method)) => format!("{}/{}", class, method.trim_end_matches("()")),
        None => raw.to_string(),
    }
}
