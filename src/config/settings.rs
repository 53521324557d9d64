//! Typed settings and built-in defaults (layer 1)

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use xcmcp_classifier::{Classifier, ClassifierConfig, DetectorKind};

use super::ConfigError;
use crate::diagnostics::{BuildOutputParser, MarkerSet, NoiseRules};
use crate::results::{
    BundleWait, ResultQuery, TestResultParser, DEFAULT_FAILURE_PLACEHOLDER,
};

/// Every tunable the parsers read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Severity markers at the start of beautified lines
    pub markers: MarkerSet,

    /// Banner and separator filtering
    pub build_output: NoiseRules,

    pub test_results: TestResultSettings,

    pub classifier: ClassifierSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestResultSettings {
    /// Bundle readiness poll interval (default 500)
    pub poll_interval_ms: u64,

    /// Ceiling on total bundle wait (default 10000)
    pub max_wait_ms: u64,

    /// File whose presence marks a bundle complete
    pub marker_file: String,

    /// Reason recorded for failures without a message
    pub failure_placeholder: String,
}

impl Default for TestResultSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            max_wait_ms: 10_000,
            marker_file: "Info.plist".to_string(),
            failure_placeholder: DEFAULT_FAILURE_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierSettings {
    /// Detector names, first match wins
    pub priority: Vec<String>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            priority: DetectorKind::DEFAULT_ORDER
                .iter()
                .map(|d| d.as_str().to_string())
                .collect(),
        }
    }
}

impl Settings {
    /// Built-in defaults as a merge layer
    pub fn builtin_layer() -> serde_json::Value {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_value(Settings::default()).unwrap_or(serde_json::Value::Null)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_markers("markers.error", &self.markers.error)?;
        check_markers("markers.warning", &self.markers.warning)?;

        let tr = &self.test_results;
        if tr.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "test_results.poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        if tr.poll_interval_ms > tr.max_wait_ms {
            return Err(ConfigError::Invalid(format!(
                "test_results.poll_interval_ms ({}) exceeds max_wait_ms ({})",
                tr.poll_interval_ms, tr.max_wait_ms
            )));
        }
        if tr.marker_file.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "test_results.marker_file must not be empty".to_string(),
            ));
        }

        self.classifier_config()?;
        Ok(())
    }

    pub fn classifier_config(&self) -> Result<ClassifierConfig, ConfigError> {
        Ok(ClassifierConfig::from_names(&self.classifier.priority)?)
    }

    pub fn classifier(&self) -> Result<Classifier, ConfigError> {
        Ok(Classifier::new(self.classifier_config()?))
    }

    pub fn build_output_parser(&self) -> BuildOutputParser {
        BuildOutputParser::new(self.markers.clone(), self.build_output.clone())
    }

    pub fn bundle_wait(&self) -> BundleWait {
        BundleWait {
            poll_interval: Duration::from_millis(self.test_results.poll_interval_ms),
            max_wait: Duration::from_millis(self.test_results.max_wait_ms),
            marker_file: self.test_results.marker_file.clone(),
        }
    }

    pub fn test_result_parser<Q: ResultQuery>(&self, query: Q) -> TestResultParser<Q> {
        TestResultParser::new(
            query,
            self.bundle_wait(),
            self.test_results.failure_placeholder.clone(),
        )
    }
}

fn check_markers(key: &str, markers: &[String]) -> Result<(), ConfigError> {
    if markers.is_empty() {
        return Err(ConfigError::Invalid(format!("{} must not be empty", key)));
    }
    if markers.iter().any(|m| m.trim().is_empty()) {
        return Err(ConfigError::Invalid(format!(
            "{} must not contain blank markers",
            key
        )));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = markers.iter().find(|m| !seen.insert(m.as_str())) {
        return Err(ConfigError::Invalid(format!(
            "{} lists '{}' more than once",
            key, dup
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.markers.error, vec!["❌"]);
        assert_eq!(settings.test_results.poll_interval_ms, 500);
        assert_eq!(settings.test_results.max_wait_ms, 10_000);
        assert_eq!(settings.classifier.priority.first().map(String::as_str), Some("scheme"));
    }

    #[test]
    fn test_builtin_layer_shape() {
        let layer = Settings::builtin_layer();
        assert_eq!(layer["markers"]["warning"][0], "⚠️");
        assert_eq!(layer["build_output"]["noise_prefixes"][0], "----- xcbeautify -----");
        assert_eq!(layer["build_output"]["separator_chars"], "-=─━");
        assert_eq!(layer["test_results"]["marker_file"], "Info.plist");
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut settings = Settings::default();
        settings.test_results.poll_interval_ms = 0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("poll_interval_ms"));
    }

    #[test]
    fn test_poll_interval_above_ceiling_rejected() {
        let mut settings = Settings::default();
        settings.test_results.max_wait_ms = 100;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_markers_rejected() {
        let mut settings = Settings::default();
        settings.markers.warning.clear();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("markers.warning"));

        let mut settings = Settings::default();
        settings.markers.error = vec!["  ".to_string()];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_detector_rejected() {
        let mut settings = Settings::default();
        settings.classifier.priority = vec!["scheme".to_string(), "nonsense".to_string()];
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Classifier(_)));
    }

    #[test]
    fn test_bundle_wait_from_settings() {
        let wait = Settings::default().bundle_wait();
        assert_eq!(wait.poll_interval, Duration::from_millis(500));
        assert_eq!(wait.max_wait, Duration::from_secs(10));
    }
}
