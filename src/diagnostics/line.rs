//! Single-line diagnostic parsing.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use xcmcp_classifier::text::{strip_ansi, strip_marker};

use super::{Issue, Severity};

/// Default error marker emitted by xcbeautify.
pub const DEFAULT_ERROR_MARKER: &str = "❌";

/// Default warning markers (with and without the emoji variation selector).
pub const DEFAULT_WARNING_MARKERS: &[&str] = &["⚠️", "⚠"];

/// Severity markers recognized at the start of a beautified line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerSet {
    pub error: Vec<String>,
    pub warning: Vec<String>,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            error: vec![DEFAULT_ERROR_MARKER.to_string()],
            warning: DEFAULT_WARNING_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl MarkerSet {
    /// Detect a leading severity marker and return the severity plus the text after it.
    pub fn detect<'a>(&self, line: &'a str) -> Option<(Severity, &'a str)> {
        if let Some(rest) = strip_marker(line, &self.error) {
            return Some((Severity::Error, rest));
        }
        strip_marker(line, &self.warning).map(|rest| (Severity::Warning, rest))
    }
}

/// Parses one marker line into an `Issue`.
pub struct IssueLineParser {
    markers: MarkerSet,
    located: Regex,
}

impl IssueLineParser {
    pub fn new(markers: MarkerSet) -> Self {
        Self {
            markers,
            located: Regex::new(r"^([^:]+):(\d+):(\d+):\s*(.+)$")
                .expect("built-in location pattern must compile"),
        }
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Parse a raw line. Lines without a severity marker yield `None`.
    ///
    /// A marker hidden behind color codes is still recognized.
    pub fn parse_line(&self, line: &str) -> Option<Issue> {
        if let Some((severity, rest)) = self.markers.detect(line) {
            return self.parse(severity, rest);
        }
        let cleaned = strip_ansi(line);
        let (severity, rest) = self.markers.detect(&cleaned)?;
        self.parse(severity, rest)
    }

    /// Parse the text that followed a severity marker.
    ///
    /// Tries `path:line:column: message`, then a bare `error:`/`warning:` prefix,
    /// then falls back to the whole cleaned text. Empty text yields `None`.
    pub fn parse(&self, severity: Severity, text: &str) -> Option<Issue> {
        let cleaned = strip_ansi(text);
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return None;
        }

        if let Some(issue) = self.parse_located(severity, cleaned) {
            return Some(issue);
        }

        for prefix in ["error:", "warning:"] {
            if let Some(rest) = cleaned.strip_prefix(prefix) {
                let rest = rest.trim();
                if !rest.is_empty() {
                    return Some(Issue::new(severity, rest));
                }
            }
        }

        Some(Issue::new(severity, cleaned))
    }

    fn parse_located(&self, severity: Severity, text: &str) -> Option<Issue> {
        let caps = self.located.captures(text)?;
        let file = caps.get(1)?.as_str().trim();
        let line = parse_position(caps.get(2)?.as_str())?;
        let column = parse_position(caps.get(3)?.as_str())?;
        let message = caps.get(4)?.as_str().trim();
        if file.is_empty() || message.is_empty() {
            return None;
        }
        Some(Issue::new(severity, message).at(file, line, column))
    }
}

impl Default for IssueLineParser {
    fn default() -> Self {
        Self::new(MarkerSet::default())
    }
}

/// Positions are 1-based; zero or overflowing values are rejected.
fn parse_position(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}
