use std::collections::HashMap;

use regex_lite::Regex;

use super::TestFrameworkStrategy;
use crate::results::{FailingTest, TestRunResult};

/// Result symbols, in plain and SF Symbols private-use forms
const PASSED_SYMBOLS: &[char] = &['✔', '\u{10105B}'];
const FAILED_SYMBOLS: &[char] = &['✘', '\u{100884}'];
const STARTED_SYMBOLS: &[char] = &['◇', '\u{1007C8}'];

/// Swift Testing console output.
///
/// ```text
/// ◇ Test login() started.
/// ✘ Test login() recorded an issue at LoginTests.swift:12:5: Expectation failed: ok
/// ✘ Test login() failed after 0.002 seconds with 1 issue.
/// ✘ Test run with 3 tests in 1 suite failed after 0.004 seconds with 1 issue.
/// ```
pub struct SwiftTestingStrategy {
    placeholder: String,
    result_line: Regex,
    issue_line: Regex,
    run_line: Regex,
}

impl SwiftTestingStrategy {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            result_line: Regex::new(r"(?m)^\s*\S+\s+Test (.+?) (passed|failed) after ")
                .expect("built-in result pattern must compile"),
            issue_line: Regex::new(r"(?m)Test (.+?) recorded an issue(?: with .+?)? at (\S+?:\d+:\d+): (.+)$")
                .expect("built-in issue pattern must compile"),
            run_line: Regex::new(r"Test run with (\d+) tests?(?: in \d+ suites?)? (passed|failed)")
                .expect("built-in run summary pattern must compile"),
        }
    }

    /// First recorded issue per test name, as `location: message`
    fn reasons(&self, output: &str) -> HashMap<String, String> {
        let mut reasons = HashMap::new();
        for caps in self.issue_line.captures_iter(output) {
            let (Some(name), Some(location), Some(message)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            reasons
                .entry(name.as_str().to_string())
                .or_insert_with(|| format!("{}: {}", location.as_str(), message.as_str().trim()));
        }
        reasons
    }

    /// Summary-only output: the run line's count goes entirely to its verdict.
    fn run_counts(&self, output: &str) -> Option<TestRunResult> {
        let caps = self.run_line.captures_iter(output).last()?;
        let count: u32 = caps.get(1)?.as_str().parse().ok()?;
        Some(match caps.get(2)?.as_str() {
            "passed" => TestRunResult::from_counts(count, 0),
            _ => TestRunResult::from_counts(0, count.max(1)),
        })
    }
}

fn starts_with_symbol(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .map(|c| {
            PASSED_SYMBOLS.contains(&c) || FAILED_SYMBOLS.contains(&c) || STARTED_SYMBOLS.contains(&c)
        })
        .unwrap_or(false)
}

impl TestFrameworkStrategy for SwiftTestingStrategy {
    fn name(&self) -> &'static str {
        "swift-testing"
    }

    fn can_parse(&self, output: &str) -> bool {
        output
            .lines()
            .any(|line| starts_with_symbol(line) && line.contains(" Test "))
            || self.run_line.is_match(output)
    }

    fn parse(&self, output: &str) -> TestRunResult {
        let mut passed = 0u32;
        let mut failed_names = Vec::new();
        for caps in self.result_line.captures_iter(output) {
            let (Some(whole), Some(name), Some(status)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if !starts_with_symbol(whole.as_str()) || name.as_str().starts_with("run with ") {
                continue;
            }
            if status.as_str() == "passed" {
                passed += 1;
            } else {
                failed_names.push(name.as_str().to_string());
            }
        }

        if passed == 0 && failed_names.is_empty() {
            return self
                .run_counts(output)
                .unwrap_or_else(|| TestRunResult::from_counts(0, 0));
        }

        let reasons = self.reasons(output);
        let failed = failed_names.len() as u32;
        let failures = failed_names
            .into_iter()
            .map(|name| {
                let reason = reasons
                    .get(&name)
                    .cloned()
                    .unwrap_or_else(|| self.placeholder.clone());
                FailingTest::new(name, reason)
            })
            .collect();
        TestRunResult::from_counts(passed, failed).with_failures(failures)
    }
}
