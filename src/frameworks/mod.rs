//! Console-text test parsing
//!
//! Each framework strategy recognizes its own literal markers. Mixed targets
//! run every matching strategy and combine the results.

mod fallback;
mod swift_testing;
mod xctest;

pub use fallback::KeywordFallback;
pub use swift_testing::SwiftTestingStrategy;
pub use xctest::XCTestStrategy;

use tracing::debug;
use xcmcp_classifier::text::strip_ansi;

use crate::results::TestRunResult;

/// A text parser for one test framework's console output.
pub trait TestFrameworkStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the output carries this framework's markers.
    fn can_parse(&self, output: &str) -> bool;

    fn parse(&self, output: &str) -> TestRunResult;
}

/// Ordered strategy list plus the last-resort fallback.
pub struct TextTestParser {
    strategies: Vec<Box<dyn TestFrameworkStrategy>>,
    fallback: KeywordFallback,
}

impl TextTestParser {
    /// XCTest and Swift Testing, recording `placeholder` for failures without a message.
    pub fn new(placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        Self::with_strategies(vec![
            Box::new(XCTestStrategy::new(placeholder.clone())),
            Box::new(SwiftTestingStrategy::new(placeholder)),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn TestFrameworkStrategy>>) -> Self {
        Self {
            strategies,
            fallback: KeywordFallback::new(),
        }
    }

    pub fn parse(&self, output: &str) -> TestRunResult {
        let cleaned = strip_ansi(output);
        let results: Vec<TestRunResult> = self
            .strategies
            .iter()
            .filter(|s| s.can_parse(&cleaned))
            .map(|s| {
                let result = s.parse(&cleaned);
                debug!(
                    strategy = s.name(),
                    passed = result.passed,
                    failed = result.failed,
                    "text strategy matched"
                );
                result
            })
            .collect();

        // A strategy that counted nothing contributes nothing
        let counted: Vec<TestRunResult> = results.into_iter().filter(|r| r.total() > 0).collect();
        if counted.is_empty() {
            debug!("no tests counted from framework markers, using keyword fallback");
            return self.fallback.parse(&cleaned);
        }
        combine(counted)
    }
}

fn combine(results: Vec<TestRunResult>) -> TestRunResult {
    results
        .into_iter()
        .reduce(TestRunResult::combine)
        .unwrap_or_else(TestRunResult::unknown)
}
