//! Build output parsing against captured xcbeautify logs
//!
//! Covers ordering, deduplication, continuation context and noise filtering
//! over whole logs rather than single lines.

mod fixtures;

use xcmcp::diagnostics::{BuildOutputParser, MarkerSet, NoiseRules, Severity};
use xcmcp::Settings;

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_single_warning_build() {
    let output = "⚠️ /Users/p/App.swift:20:10: variable 'unused' was never used";
    let parsed = BuildOutputParser::default().parse(output);

    assert_eq!(parsed.issues.len(), 1);
    let issue = &parsed.issues[0];
    assert_eq!(issue.severity, Severity::Warning);
    assert_eq!(issue.file(), Some("/Users/p/App.swift"));
    assert_eq!(issue.line(), Some(20));
    assert_eq!(issue.column(), Some(10));
    assert_eq!(issue.message, "variable 'unused' was never used");
    assert!(!parsed.has_errors());
}

#[test]
fn test_error_with_code_context() {
    let output = "❌ /Users/t/App.swift:10:5: cannot find 'someFunc' in scope\n    someFunc()\n    ^~~~~~~~";
    let parsed = BuildOutputParser::default().parse(output);

    assert_eq!(parsed.issues.len(), 1);
    assert_eq!(parsed.issues[0].message, "cannot find 'someFunc' in scope");
}

#[test]
fn test_repeated_line_collapses() {
    let line = "❌ /Users/t/App.swift:10:5: cannot find 'someFunc' in scope\n";
    let parsed = BuildOutputParser::default().parse(&line.repeat(3));
    assert_eq!(parsed.issues.len(), 1);
}

#[test]
fn test_no_markers_is_empty() {
    let output = "** BUILD SUCCEEDED **\n";
    let parsed = BuildOutputParser::default().parse(output);
    assert!(parsed.is_empty());
    assert_eq!(parsed.to_human(), "0 error(s), 0 warning(s)");
}

// =============================================================================
// Captured log
// =============================================================================

#[test]
fn test_full_log_order_and_dedup() {
    let parsed = BuildOutputParser::default().parse(&fixtures::log("build_app.log"));

    let summary: Vec<(Severity, &str)> = parsed
        .issues
        .iter()
        .map(|i| (i.severity, i.message.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                Severity::Warning,
                "variable 'unused' was never used; consider replacing with '_' or removing it"
            ),
            (Severity::Error, "cannot find 'someFunc' in scope"),
            (Severity::Error, "value of type 'URLSession' has no member 'fetch'"),
            (
                Severity::Error,
                "Signing for \"App\" requires a development team. Select a development team in the Signing & Capabilities editor."
            ),
            (Severity::Error, "Testing failed:"),
        ]
    );
    assert_eq!(parsed.error_count(), 4);
    assert_eq!(parsed.warning_count(), 1);
}

#[test]
fn test_full_log_locations() {
    let parsed = BuildOutputParser::default().parse(&fixtures::log("build_app.log"));
    let located: Vec<_> = parsed
        .issues
        .iter()
        .filter_map(|i| Some((i.file()?, i.line()?, i.column()?)))
        .collect();
    assert_eq!(
        located,
        vec![
            ("/Users/p/App/ContentView.swift", 20, 10),
            ("/Users/p/App/NetworkClient.swift", 10, 5),
            ("/Users/p/App/NetworkClient.swift", 18, 12),
        ]
    );
}

#[test]
fn test_parse_is_idempotent() {
    let log = fixtures::log("build_app.log");
    let parser = BuildOutputParser::default();
    assert_eq!(parser.parse(&log), parser.parse(&log));
}

#[test]
fn test_json_shape() {
    let parsed = BuildOutputParser::default()
        .parse("❌ /p/A.swift:3:7: expected '}'\n⚠️ deprecated API");
    let json = serde_json::to_value(&parsed).unwrap();
    assert_eq!(json["issues"][0]["severity"], "error");
    assert_eq!(json["issues"][0]["file"], "/p/A.swift");
    assert_eq!(json["issues"][0]["line"], 3);
    assert_eq!(json["issues"][1]["message"], "deprecated API");
    assert!(json["issues"][1].get("file").is_none());
}

// =============================================================================
// Configured markers and noise
// =============================================================================

#[test]
fn test_substitute_markers() {
    let markers = MarkerSet {
        error: vec!["[E]".to_string()],
        warning: vec!["[W]".to_string()],
    };
    let parser = BuildOutputParser::new(markers, NoiseRules::default());
    let parsed = parser.parse("[W] /p/A.swift:1:1: soft\n❌ /p/A.swift:2:2: ignored marker\n[E] hard");

    assert_eq!(parsed.issues.len(), 2);
    assert_eq!(parsed.issues[0].severity, Severity::Warning);
    assert_eq!(parsed.issues[1].message, "hard");
}

#[test]
fn test_custom_noise_prefix() {
    let noise = NoiseRules {
        prefixes: vec!["❌ note:".to_string()],
        ..NoiseRules::default()
    };
    let parser = BuildOutputParser::new(MarkerSet::default(), noise);
    let parsed = parser.parse("❌ note: this banner is noise\n❌ real problem");
    assert_eq!(parsed.issues.len(), 1);
    assert_eq!(parsed.issues[0].message, "real problem");
}

#[test]
fn test_parser_from_settings() {
    let mut settings = Settings::default();
    settings.markers.warning = vec!["W>".to_string()];
    let parsed = settings.build_output_parser().parse("W> careful\n⚠️ not a marker any more");
    assert_eq!(parsed.issues.len(), 1);
    assert_eq!(parsed.issues[0].message, "careful");
}
