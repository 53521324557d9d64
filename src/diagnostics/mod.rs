//! Line-level build diagnostics
//!
//! Turns beautified build output (xcbeautify-style severity markers at line
//! start) into an ordered, deduplicated list of issues.

mod build_output;
mod dedup;
mod line;

pub use build_output::{BuildOutputParser, NoiseRules};
pub use dedup::IssueSet;
pub use line::{IssueLineParser, MarkerSet};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source position of a diagnostic. Line and column only exist together with a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

/// One diagnostic (error or warning) from a build
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,

    /// Diagnostic text with ANSI codes and markers stripped
    pub message: String,

    #[serde(flatten)]
    pub location: Option<Location>,
}

impl Issue {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: u32, column: u32) -> Self {
        self.location = Some(Location {
            file: file.into(),
            line,
            column,
        });
        self
    }

    pub fn file(&self) -> Option<&str> {
        self.location.as_ref().map(|l| l.file.as_str())
    }

    pub fn line(&self) -> Option<u32> {
        self.location.as_ref().map(|l| l.line)
    }

    pub fn column(&self) -> Option<u32> {
        self.location.as_ref().map(|l| l.column)
    }

    /// Identity used for deduplication: severity, file, line, column and message.
    pub fn identity_key(&self) -> String {
        match &self.location {
            Some(loc) => format!(
                "{}|{}|{}|{}|{}",
                self.severity, loc.file, loc.line, loc.column, self.message
            ),
            None => format!("{}||||{}", self.severity, self.message),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(
                f,
                "{}:{}:{}: {}: {}",
                loc.file, loc.line, loc.column, self.severity, self.message
            ),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Result of parsing one build's combined output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOutput {
    /// Errors and warnings in first-seen order, unique by identity
    pub issues: Vec<Issue>,
}

impl ParsedOutput {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Render for terminals, errors first.
    pub fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "{} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        )];
        for issue in self.errors().chain(self.warnings()) {
            lines.push(format!("  {}", issue));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_distinguishes_position() {
        let a = Issue::new(Severity::Error, "boom").at("/a.swift", 1, 2);
        let b = Issue::new(Severity::Error, "boom").at("/a.swift", 1, 3);
        let c = Issue::new(Severity::Warning, "boom").at("/a.swift", 1, 2);
        assert_ne!(a.identity_key(), b.identity_key());
        assert_ne!(a.identity_key(), c.identity_key());
        assert_eq!(a.identity_key(), a.clone().identity_key());
    }

    #[test]
    fn test_identity_key_without_location() {
        let bare = Issue::new(Severity::Error, "boom");
        let located = Issue::new(Severity::Error, "boom").at("", 0, 0);
        assert_ne!(bare.identity_key(), located.identity_key());
    }

    #[test]
    fn test_issue_serialization_flattens_location() {
        let issue = Issue::new(Severity::Warning, "unused").at("/p/App.swift", 20, 10);
        let json: serde_json::Value = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["file"], "/p/App.swift");
        assert_eq!(json["line"], 20);
        assert_eq!(json["column"], 10);

        let bare = serde_json::to_value(Issue::new(Severity::Error, "x")).unwrap();
        assert!(bare.get("file").is_none());
        assert!(bare.get("line").is_none());
    }

    #[test]
    fn test_parsed_output_views() {
        let parsed = ParsedOutput {
            issues: vec![
                Issue::new(Severity::Warning, "w1"),
                Issue::new(Severity::Error, "e1"),
                Issue::new(Severity::Warning, "w2"),
            ],
        };
        assert_eq!(parsed.error_count(), 1);
        assert_eq!(parsed.warning_count(), 2);
        assert!(parsed.has_errors());
        let warnings: Vec<_> = parsed.warnings().map(|i| i.message.as_str()).collect();
        assert_eq!(warnings, vec!["w1", "w2"]);
    }

    #[test]
    fn test_to_human_lists_errors_first() {
        let parsed = ParsedOutput {
            issues: vec![
                Issue::new(Severity::Warning, "careful"),
                Issue::new(Severity::Error, "broken").at("/a.swift", 3, 1),
            ],
        };
        let human = parsed.to_human();
        let mut lines = human.lines();
        assert_eq!(lines.next(), Some("1 error(s), 1 warning(s)"));
        assert_eq!(lines.next(), Some("  /a.swift:3:1: error: broken"));
        assert_eq!(lines.next(), Some("  warning: careful"));
    }
}
