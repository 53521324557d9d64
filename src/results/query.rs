//! Result-inspection collaborator (`xcrun xcresulttool`).

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Failure of a result query. Drives tier fallback; never surfaced to callers.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to run result tool: {0}")]
    Io(#[from] std::io::Error),

    #[error("result tool exited with status {status:?}: {stderr}")]
    ToolFailed { status: Option<i32>, stderr: String },

    #[error("invalid JSON from result tool: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("result JSON is missing '{0}'")]
    MissingField(&'static str),
}

/// Source of raw JSON documents describing a result bundle.
pub trait ResultQuery {
    /// Modern summary document (`get test-results summary`)
    fn modern_summary(&self, bundle: &Path) -> Result<String, QueryError>;

    /// Modern per-test tree (`get test-results tests`)
    fn modern_tests(&self, bundle: &Path) -> Result<String, QueryError>;

    /// Legacy action-record object graph (`get object`)
    fn legacy(&self, bundle: &Path) -> Result<String, QueryError>;
}

impl<Q: ResultQuery + ?Sized> ResultQuery for &Q {
    fn modern_summary(&self, bundle: &Path) -> Result<String, QueryError> {
        (**self).modern_summary(bundle)
    }

    fn modern_tests(&self, bundle: &Path) -> Result<String, QueryError> {
        (**self).modern_tests(bundle)
    }

    fn legacy(&self, bundle: &Path) -> Result<String, QueryError> {
        (**self).legacy(bundle)
    }
}

/// Runs xcresulttool through xcrun.
#[derive(Debug, Clone)]
pub struct Xcresulttool {
    program: PathBuf,
}

impl Default for Xcresulttool {
    fn default() -> Self {
        Self {
            program: PathBuf::from("xcrun"),
        }
    }
}

impl Xcresulttool {
    /// Use a different launcher than `xcrun`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str], bundle: &Path) -> Result<String, QueryError> {
        let output = Command::new(&self.program)
            .arg("xcresulttool")
            .args(args)
            .arg("--path")
            .arg(bundle)
            .output()?;

        if !output.status.success() {
            return Err(QueryError::ToolFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ResultQuery for Xcresulttool {
    fn modern_summary(&self, bundle: &Path) -> Result<String, QueryError> {
        self.run(&["get", "test-results", "summary", "--compact"], bundle)
    }

    fn modern_tests(&self, bundle: &Path) -> Result<String, QueryError> {
        self.run(&["get", "test-results", "tests", "--compact"], bundle)
    }

    fn legacy(&self, bundle: &Path) -> Result<String, QueryError> {
        // Xcode 16+ requires --legacy for `get object`; older tools reject it
        match self.run(&["get", "object", "--legacy", "--format", "json"], bundle) {
            Err(QueryError::ToolFailed { stderr, .. }) if rejects_legacy_flag(&stderr) => {
                debug!(stderr = %stderr, "legacy query rejected --legacy, retrying without it");
                self.run(&["get", "object", "--format", "json"], bundle)
            }
            other => other,
        }
    }
}

/// Older tools name the unknown option in their usage error.
fn rejects_legacy_flag(stderr: &str) -> bool {
    stderr.contains("--legacy")
}
