//! xcmcp - build output interpretation for Xcode and SwiftPM tooling
//!
//! Turns captured `xcodebuild`, `swift build` and `swift test` output into
//! structured records: line-level diagnostics, a single best-guess build
//! failure category, and test-run outcomes read from result bundles with a
//! console-text fallback. Spawning the tools is left to the caller.

pub mod config;
pub mod diagnostics;
pub mod frameworks;
pub mod results;

pub use config::{ConfigError, EffectiveSettings, Settings};
pub use diagnostics::{BuildOutputParser, Issue, Location, ParsedOutput, Severity};
pub use results::{FailingTest, TestResultParser, TestRunResult};
pub use xcmcp_classifier::{BuildError, BuildErrorKind, Classifier, ClassifierConfig};
