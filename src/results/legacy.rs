//! Legacy tier: `xcresulttool get object` action record.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use super::{FailingTest, QueryError, ResultQuery, TestRunResult};

pub(crate) fn parse<Q: ResultQuery>(
    query: &Q,
    bundle: &Path,
    placeholder: &str,
) -> Result<TestRunResult, QueryError> {
    parse_record(&query.legacy(bundle)?, placeholder)
}

pub(crate) fn parse_record(json: &str, placeholder: &str) -> Result<TestRunResult, QueryError> {
    let doc: Value = serde_json::from_str(json)?;
    let metrics = doc
        .get("metrics")
        .ok_or(QueryError::MissingField("metrics"))?;

    let total = metrics
        .get("testsCount")
        .and_then(typed_u32)
        .ok_or(QueryError::MissingField("metrics.testsCount"))?;
    let failures = failures(&doc, placeholder);
    // The failure count covers at least every listed failure
    let failed = metrics
        .get("testsFailedCount")
        .and_then(typed_u32)
        .unwrap_or(0)
        .max(u32::try_from(failures.len()).unwrap_or(u32::MAX));
    let skipped = metrics.get("testsSkippedCount").and_then(typed_u32).unwrap_or(0);
    let passed = total.saturating_sub(failed).saturating_sub(skipped);

    Ok(TestRunResult::from_counts(passed, failed).with_failures(failures))
}

/// Failure summaries appear at the top level and per action, often both.
fn failures(doc: &Value, placeholder: &str) -> Vec<FailingTest> {
    let top = doc.get("issues");
    let per_action = values(doc.get("actions"))
        .iter()
        .map(|action| action.get("actionResult").and_then(|r| r.get("issues")));

    let mut seen = HashSet::new();
    std::iter::once(top)
        .chain(per_action)
        .flatten()
        .flat_map(|issues| values(issues.get("testFailureSummaries")))
        .filter_map(|summary| {
            let identifier = summary.get("testCaseName").and_then(typed_str)?;
            let reason = summary
                .get("message")
                .and_then(typed_str)
                .unwrap_or(placeholder);
            Some(FailingTest::new(identifier, reason))
        })
        .filter(|test| seen.insert((test.identifier.clone(), test.reason.clone())))
        .collect()
}

/// Elements of a typed `{"_values": [...]}` array
fn values(v: Option<&Value>) -> &[Value] {
    v.and_then(|v| v.get("_values"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn typed_str(v: &Value) -> Option<&str> {
    v.get("_value").and_then(Value::as_str)
}

/// `{"_value": "12"}` or `{"_value": 12}`
fn typed_u32(v: &Value) -> Option<u32> {
    let value = v.get("_value")?;
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}
