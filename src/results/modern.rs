//! Modern tier: `xcresulttool get test-results summary|tests`.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::{FailingTest, QueryError, ResultQuery, TestRunResult};

const TEST_CASE: &str = "Test Case";
const ARGUMENTS: &str = "Arguments";
const FAILURE_MESSAGE: &str = "Failure Message";

/// Counts from the summary document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SummaryCounts {
    pub passed: u32,
    pub failed: u32,
}

pub(crate) fn parse<Q: ResultQuery>(
    query: &Q,
    bundle: &Path,
    placeholder: &str,
) -> Result<TestRunResult, QueryError> {
    let summary = parse_summary(&query.modern_summary(bundle)?)?;

    let tally = match query
        .modern_tests(bundle)
        .and_then(|json| parse_tests(&json, placeholder))
    {
        Ok(tally) => tally,
        Err(e) => {
            debug!(error = %e, "test detail query failed, using summary counts");
            return Ok(TestRunResult::from_counts(summary.passed, summary.failed));
        }
    };

    if tally.passed + tally.failed == 0 {
        return Ok(TestRunResult::from_counts(summary.passed, summary.failed));
    }
    Ok(TestRunResult::from_counts(tally.passed, tally.failed).with_failures(tally.failures))
}

pub(crate) fn parse_summary(json: &str) -> Result<SummaryCounts, QueryError> {
    let doc: Value = serde_json::from_str(json)?;
    let passed = count_field(&doc, "passedTests")?;
    let failed = count_field(&doc, "failedTests")?;
    Ok(SummaryCounts { passed, failed })
}

fn count_field(doc: &Value, field: &'static str) -> Result<u32, QueryError> {
    doc.get(field)
        .and_then(Value::as_u64)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .ok_or(QueryError::MissingField(field))
}

/// Accumulated outcome of a subtree
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub passed: u32,
    pub failed: u32,
    pub failures: Vec<FailingTest>,
}

impl Tally {
    fn passed() -> Self {
        Self {
            passed: 1,
            ..Self::default()
        }
    }

    fn failed(test: FailingTest) -> Self {
        Self {
            failed: 1,
            failures: vec![test],
            ..Self::default()
        }
    }

    fn merge(mut self, other: Tally) -> Tally {
        self.passed += other.passed;
        self.failed += other.failed;
        self.failures.extend(other.failures);
        self
    }
}

pub(crate) fn parse_tests(json: &str, placeholder: &str) -> Result<Tally, QueryError> {
    let doc: Value = serde_json::from_str(json)?;
    let roots = doc
        .get("testNodes")
        .and_then(Value::as_array)
        .ok_or(QueryError::MissingField("testNodes"))?;
    Ok(roots
        .iter()
        .map(|node| walk(node, placeholder))
        .fold(Tally::default(), Tally::merge))
}

fn walk(node: &Value, placeholder: &str) -> Tally {
    if node_type(node) == TEST_CASE {
        return test_case(node, placeholder);
    }
    children(node)
        .iter()
        .map(|child| walk(child, placeholder))
        .fold(Tally::default(), Tally::merge)
}

/// A test case counts once, or once per argument variant when parameterized.
fn test_case(node: &Value, placeholder: &str) -> Tally {
    let identifier = node
        .get("nodeIdentifier")
        .and_then(Value::as_str)
        .or_else(|| name(node))
        .unwrap_or("unknown test");
    let case_reason = failure_message(node).unwrap_or(placeholder);

    let variants: Vec<&Value> = children(node)
        .iter()
        .filter(|c| node_type(c) == ARGUMENTS)
        .collect();

    if variants.is_empty() {
        return outcome(node, || FailingTest::new(identifier, case_reason));
    }

    variants
        .into_iter()
        .map(|variant| {
            outcome(variant, || {
                let id = match name(variant) {
                    Some(args) => format!("{} ({})", identifier, args),
                    None => identifier.to_string(),
                };
                FailingTest::new(id, failure_message(variant).unwrap_or(case_reason))
            })
        })
        .fold(Tally::default(), Tally::merge)
}

fn outcome(node: &Value, failing: impl FnOnce() -> FailingTest) -> Tally {
    match node.get("result").and_then(Value::as_str) {
        Some("Passed") | Some("Expected Failure") => Tally::passed(),
        Some("Failed") => Tally::failed(failing()),
        _ => Tally::default(),
    }
}

fn failure_message(node: &Value) -> Option<&str> {
    children(node)
        .iter()
        .find(|c| node_type(c) == FAILURE_MESSAGE)
        .and_then(name)
}

fn children(node: &Value) -> &[Value] {
    node.get("children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn node_type(node: &Value) -> &str {
    node.get("nodeType").and_then(Value::as_str).unwrap_or("")
}

fn name(node: &Value) -> Option<&str> {
    node.get("name").and_then(Value::as_str)
}
