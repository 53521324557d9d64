//! Whole-output parsing for build commands.

use serde::{Deserialize, Serialize};
use tracing::debug;
use xcmcp_classifier::text::strip_ansi;

use super::{IssueLineParser, IssueSet, MarkerSet, ParsedOutput};

/// Minimum run length for a line of rule characters to count as a separator.
const MIN_SEPARATOR_LEN: usize = 3;

/// Fixed deny-list of banner and separator lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseRules {
    /// Lines starting with one of these (after trimming) are banners
    #[serde(rename = "noise_prefixes")]
    pub prefixes: Vec<String>,
    /// A line made only of these characters is a separator rule
    pub separator_chars: String,
}

impl Default for NoiseRules {
    fn default() -> Self {
        Self {
            prefixes: vec![
                "----- xcbeautify -----".to_string(),
                "xcbeautify".to_string(),
                "Version:".to_string(),
            ],
            separator_chars: "-=─━".to_string(),
        }
    }
}

impl NoiseRules {
    pub fn is_noise(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        if line.chars().count() >= MIN_SEPARATOR_LEN
            && line.chars().all(|c| self.separator_chars.contains(c))
        {
            return true;
        }
        self.prefixes
            .iter()
            .any(|p| !p.is_empty() && line.starts_with(p.as_str()))
    }
}

/// Drives `IssueLineParser` across a full build log.
///
/// Lines without a marker that are not noise are continuation context (code
/// excerpts, caret pointers) for the preceding diagnostic and are dropped.
pub struct BuildOutputParser {
    lines: IssueLineParser,
    noise: NoiseRules,
}

impl BuildOutputParser {
    pub fn new(markers: MarkerSet, noise: NoiseRules) -> Self {
        Self {
            lines: IssueLineParser::new(markers),
            noise,
        }
    }

    /// Parse combined stdout and stderr of one build.
    ///
    /// An empty result does not mean success; the exit status decides that.
    pub fn parse(&self, output: &str) -> ParsedOutput {
        let mut issues = IssueSet::new();
        let mut noise_lines = 0usize;
        let mut context_lines = 0usize;

        for raw in output.lines() {
            if raw.trim().is_empty() {
                continue;
            }
            if self.noise.is_noise(&strip_ansi(raw)) {
                noise_lines += 1;
                continue;
            }
            match self.lines.parse_line(raw) {
                Some(issue) => {
                    issues.insert(issue);
                }
                None => context_lines += 1,
            }
        }

        debug!(
            issues = issues.len(),
            noise_lines, context_lines, "parsed build output"
        );

        ParsedOutput {
            issues: issues.into_vec(),
        }
    }
}

impl Default for BuildOutputParser {
    fn default() -> Self {
        Self::new(MarkerSet::default(), NoiseRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    #[test]
    fn test_noise_rules() {
        let noise = NoiseRules::default();
        assert!(noise.is_noise("----- xcbeautify -----"));
        assert!(noise.is_noise("Version: 2.11.0"));
        assert!(noise.is_noise("------------------------------"));
        assert!(noise.is_noise("  ========  "));
        assert!(!noise.is_noise("--"));
        assert!(!noise.is_noise(""));
        assert!(!noise.is_noise("    ^~~~~~~~"));
        assert!(!noise.is_noise("Compiling App.swift"));
    }

    #[test]
    fn test_context_lines_discarded() {
        let output = "❌ /Users/t/App.swift:10:5: cannot find 'someFunc' in scope\n    someFunc()\n    ^~~~~~~~";
        let parsed = BuildOutputParser::default().parse(output);
        assert_eq!(parsed.issues.len(), 1);
        assert_eq!(parsed.issues[0].message, "cannot find 'someFunc' in scope");
    }

    #[test]
    fn test_back_to_back_diagnostics() {
        let output = "\
❌ /p/A.swift:1:1: first
    let a = b
    ^
⚠️ /p/A.swift:2:1: second
❌ /p/B.swift:3:4: third
    call()
";
        let parsed = BuildOutputParser::default().parse(output);
        let messages: Vec<_> = parsed.issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(parsed.issues[1].severity, Severity::Warning);
    }

    #[test]
    fn test_banner_skipped() {
        let output = "----- xcbeautify -----\nVersion: 2.11.0\n----------------------\n\n▸ Compiling App.swift\n";
        let parsed = BuildOutputParser::default().parse(output);
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_repeated_error_collapses() {
        let line = "❌ /p/A.swift:1:1: boom\n";
        let parsed = BuildOutputParser::default().parse(&line.repeat(3));
        assert_eq!(parsed.issues.len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let output = "⚠️ /p/A.swift:4:2: trailing\r\n    code\r\n";
        let parsed = BuildOutputParser::default().parse(output);
        assert_eq!(parsed.issues.len(), 1);
        assert_eq!(parsed.issues[0].message, "trailing");
    }
}
