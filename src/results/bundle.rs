//! Result bundle location and readiness.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use regex_lite::Regex;

/// Phrases xcodebuild prints right before the result bundle path
const BUNDLE_ANNOUNCEMENTS: &[&str] = &["Test session results", "Writing result bundle at path"];

/// Finds the result bundle path a test run actually wrote.
pub struct BundleLocator {
    path: Regex,
}

impl BundleLocator {
    pub fn new() -> Self {
        Self {
            path: Regex::new(r"([^\s:][^:\n]*?\.xcresult)")
                .expect("built-in bundle path pattern must compile"),
        }
    }

    /// Resolve the bundle path. An echoed path wins over `default`; when the
    /// output echoes several, the last one is used.
    pub fn locate(&self, output: &str, default: Option<&Path>) -> Option<PathBuf> {
        self.echoed(output)
            .or_else(|| default.map(Path::to_path_buf))
    }

    fn echoed(&self, output: &str) -> Option<PathBuf> {
        let lines: Vec<&str> = output.lines().collect();
        let mut found = None;
        for (i, line) in lines.iter().enumerate() {
            let Some(rest) = announcement_rest(line) else {
                continue;
            };
            let same_line = self.extract(rest);
            let next_line = || {
                lines[i + 1..]
                    .iter()
                    .find(|l| !l.trim().is_empty())
                    .and_then(|l| self.extract(l))
            };
            if let Some(path) = same_line.or_else(next_line) {
                found = Some(path);
            }
        }
        found
    }

    fn extract(&self, text: &str) -> Option<PathBuf> {
        let caps = self.path.captures(text)?;
        let path = caps
            .get(1)?
            .as_str()
            .trim()
            .trim_matches(|c| c == '"' || c == '\'');
        if path.is_empty() {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

impl Default for BundleLocator {
    fn default() -> Self {
        Self::new()
    }
}

fn announcement_rest(line: &str) -> Option<&str> {
    BUNDLE_ANNOUNCEMENTS
        .iter()
        .find_map(|a| line.find(a).map(|idx| &line[idx + a.len()..]))
}

/// Readiness polling: fixed interval, hard ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleWait {
    pub poll_interval: Duration,
    pub max_wait: Duration,
    /// File inside the bundle whose presence marks it complete
    pub marker_file: String,
}

impl Default for BundleWait {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            max_wait: Duration::from_secs(10),
            marker_file: "Info.plist".to_string(),
        }
    }
}

impl BundleWait {
    pub fn is_ready(&self, bundle: &Path) -> bool {
        bundle.is_dir() && bundle.join(&self.marker_file).is_file()
    }

    /// Block until the bundle is ready or the ceiling passes.
    ///
    /// Readiness is always checked at least once, so a zero ceiling is a
    /// single probe. Returns false on timeout.
    pub fn wait_for(&self, bundle: &Path) -> bool {
        let start = Instant::now();
        loop {
            if self.is_ready(bundle) {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= self.max_wait {
                return false;
            }
            let remaining = self.max_wait - elapsed;
            thread::sleep(self.poll_interval.min(remaining));
        }
    }
}
