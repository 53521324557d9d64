//! Failure classifier for xcodebuild and swift build output.
//!
//! The classifier looks at the raw output of a command that failed outright and
//! produces at most one categorized `BuildError` with a title, optional details
//! and a remediation hint. Detectors run in a configurable priority order and
//! the first match wins.

mod config;
mod detectors;
mod result;
pub mod text;

pub use config::{ClassifierConfig, ConfigError, DetectorKind};
pub use result::{BuildError, BuildErrorKind};

use detectors::Patterns;
use tracing::debug;

/// Reusable classifier holding compiled patterns.
pub struct Classifier {
    config: ClassifierConfig,
    patterns: Patterns,
}

impl Classifier {
    /// Create a new classifier with the given configuration
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            patterns: Patterns::new(),
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify raw command output.
    ///
    /// Returns `None` when no detector recognizes the output; callers are
    /// expected to fall back to a generic "build failed" message.
    pub fn classify(&self, output: &str) -> Option<BuildError> {
        let cleaned = text::strip_ansi(output);
        self.config.priority.iter().find_map(|detector| {
            let found = self.patterns.detect(*detector, &cleaned)?;
            debug!(detector = %detector, kind = %found.kind, "classified build failure");
            Some(found)
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

/// Classify raw command output with a one-off classifier.
pub fn classify(output: &str, config: &ClassifierConfig) -> Option<BuildError> {
    Classifier::new(config.clone()).classify(output)
}
