//! Shared fixtures for integration tests
//!
//! - Classifier corpus (raw failed-command output with expected categories)
//! - Result-tool JSON documents (modern summary/tests, legacy action record)
//! - Captured console logs

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read a fixture file relative to `tests/fixtures`
pub fn read(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {}", path.display(), e))
}

pub fn log(name: &str) -> String {
    read(&format!("logs/{}", name))
}

pub fn xcresult_json(name: &str) -> String {
    read(&format!("xcresult/{}", name))
}

/// One classifier corpus entry
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ClassifierCase {
    pub id: String,
    pub description: String,
    pub output: String,
    /// None means the output must stay unclassified
    pub expected: Option<ClassifierExpectation>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ClassifierExpectation {
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub details_contains: Option<String>,
    #[serde(default)]
    pub suggestion_contains: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ClassifierCorpus {
    pub cases: Vec<ClassifierCase>,
}

pub fn load_classifier_corpus() -> ClassifierCorpus {
    serde_json::from_str(&read("classifier_corpus.json")).expect("classifier corpus must parse")
}

/// Create an `.xcresult` directory, optionally with its completion marker
pub fn make_bundle(root: &Path, name: &str, ready: bool) -> PathBuf {
    let bundle = root.join(name);
    fs::create_dir_all(&bundle).unwrap();
    if ready {
        fs::write(bundle.join("Info.plist"), "<?xml version=\"1.0\"?><plist/>").unwrap();
    }
    bundle
}
