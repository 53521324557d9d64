//! Test-run results
//!
//! `TestResultParser` tries the xcresult bundle first (modern tool output,
//! then the legacy object graph) and falls back to console text parsing.
//! Every failure along the way is a fallback trigger, never an error.

mod bundle;
mod legacy;
mod modern;
mod query;

pub use bundle::{BundleLocator, BundleWait};
pub use query::{QueryError, ResultQuery, Xcresulttool};

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::frameworks::TextTestParser;

/// Reason recorded when a failure carries no recoverable message.
pub const DEFAULT_FAILURE_PLACEHOLDER: &str = "Test failed";

/// A failing test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailingTest {
    pub identifier: String,
    pub reason: String,
}

impl FailingTest {
    pub fn new(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}

/// Outcome of one test execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunResult {
    pub passed: u32,
    pub failed: u32,
    pub success: bool,

    /// Present only when failures occurred and their details were recovered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failing_tests: Option<Vec<FailingTest>>,
}

impl TestRunResult {
    pub fn from_counts(passed: u32, failed: u32) -> Self {
        Self {
            passed,
            failed,
            success: failed == 0,
            failing_tests: None,
        }
    }

    /// Outcome that could not be determined. Reported as a failure.
    pub fn unknown() -> Self {
        Self {
            passed: 0,
            failed: 0,
            success: false,
            failing_tests: None,
        }
    }

    /// Attach failure details; an empty list leaves `failing_tests` unset.
    pub fn with_failures(mut self, failures: Vec<FailingTest>) -> Self {
        self.failing_tests = if failures.is_empty() {
            None
        } else {
            Some(failures)
        };
        self
    }

    pub fn total(&self) -> u32 {
        self.passed.saturating_add(self.failed)
    }

    /// Merge the result of a second framework run over the same output.
    pub fn combine(self, other: TestRunResult) -> TestRunResult {
        let failing_tests = match (self.failing_tests, other.failing_tests) {
            (None, None) => None,
            (a, b) => Some(a.into_iter().chain(b).flatten().collect()),
        };
        TestRunResult {
            passed: self.passed.saturating_add(other.passed),
            failed: self.failed.saturating_add(other.failed),
            success: self.success && other.success,
            failing_tests,
        }
    }

    pub fn to_human(&self) -> String {
        let status = if self.success { "PASSED" } else { "FAILED" };
        let mut lines = vec![format!(
            "Tests {}: {} passed, {} failed",
            status, self.passed, self.failed
        )];
        for test in self.failing_tests.iter().flatten() {
            lines.push(format!("  {}: {}", test.identifier, test.reason));
        }
        lines.join("\n")
    }
}

/// Which source produced a `TestRunResult`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseTier {
    Modern,
    Legacy,
    TextFallback,
}

/// Tiered test-result parser over a result-inspection collaborator.
pub struct TestResultParser<Q = Xcresulttool> {
    query: Q,
    locator: BundleLocator,
    wait: BundleWait,
    placeholder: String,
    text: TextTestParser,
}

impl<Q: ResultQuery> TestResultParser<Q> {
    pub fn new(query: Q, wait: BundleWait, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        Self {
            query,
            locator: BundleLocator::new(),
            wait,
            text: TextTestParser::new(placeholder.clone()),
            placeholder,
        }
    }

    /// Parse a finished test run.
    ///
    /// `default_bundle` is the path the caller asked xcodebuild to write; a
    /// path echoed in `output` takes precedence over it.
    pub fn parse(&self, output: &str, default_bundle: Option<&Path>) -> TestRunResult {
        self.parse_with_tier(output, default_bundle).0
    }

    /// Same as `parse`, also reporting which tier produced the result.
    pub fn parse_with_tier(
        &self,
        output: &str,
        default_bundle: Option<&Path>,
    ) -> (TestRunResult, ParseTier) {
        match self.locator.locate(output, default_bundle) {
            Some(bundle) => {
                debug!(bundle = %bundle.display(), "located result bundle");
                if self.wait.wait_for(&bundle) {
                    if let Some(result) = self.from_bundle(&bundle) {
                        return result;
                    }
                } else {
                    debug!(
                        bundle = %bundle.display(),
                        max_wait_ms = self.wait.max_wait.as_millis() as u64,
                        "result bundle not ready, using text fallback"
                    );
                }
            }
            None => debug!("no result bundle, using text fallback"),
        }
        (self.text.parse(output), ParseTier::TextFallback)
    }

    fn from_bundle(&self, bundle: &Path) -> Option<(TestRunResult, ParseTier)> {
        match modern::parse(&self.query, bundle, &self.placeholder) {
            Ok(result) => return Some((result, ParseTier::Modern)),
            Err(e) => debug!(error = %e, "modern result query failed, trying legacy"),
        }
        match legacy::parse(&self.query, bundle, &self.placeholder) {
            Ok(result) => Some((result, ParseTier::Legacy)),
            Err(e) => {
                debug!(error = %e, "legacy result query failed, using text fallback");
                None
            }
        }
    }
}

impl Default for TestResultParser<Xcresulttool> {
    fn default() -> Self {
        Self::new(
            Xcresulttool::default(),
            BundleWait::default(),
            DEFAULT_FAILURE_PLACEHOLDER,
        )
    }
}
