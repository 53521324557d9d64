//! Detector priority configuration.
//!
//! Real-world output regularly trips more than one detector (a missing scheme
//! is often followed by unrelated compile noise), so the first detector in the
//! priority list that matches decides the category.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Error types for classifier configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown detector '{0}'")]
    UnknownDetector(String),

    #[error("detector '{0}' listed more than once")]
    DuplicateDetector(String),

    #[error("detector priority list is empty")]
    EmptyPriority,
}

/// A single pattern family the classifier can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    Scheme,
    Signing,
    Provisioning,
    Dependency,
    Configuration,
    Destination,
    Sdk,
    Product,
    Target,
    Manifest,
    ProjectNotFound,
    ToolError,
    FailedCommands,
}

impl DetectorKind {
    /// All detectors in default priority order.
    pub const DEFAULT_ORDER: &'static [DetectorKind] = &[
        DetectorKind::Scheme,
        DetectorKind::Signing,
        DetectorKind::Provisioning,
        DetectorKind::Dependency,
        DetectorKind::Configuration,
        DetectorKind::Destination,
        DetectorKind::Sdk,
        DetectorKind::Product,
        DetectorKind::Target,
        DetectorKind::Manifest,
        DetectorKind::ProjectNotFound,
        DetectorKind::ToolError,
        DetectorKind::FailedCommands,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorKind::Scheme => "scheme",
            DetectorKind::Signing => "signing",
            DetectorKind::Provisioning => "provisioning",
            DetectorKind::Dependency => "dependency",
            DetectorKind::Configuration => "configuration",
            DetectorKind::Destination => "destination",
            DetectorKind::Sdk => "sdk",
            DetectorKind::Product => "product",
            DetectorKind::Target => "target",
            DetectorKind::Manifest => "manifest",
            DetectorKind::ProjectNotFound => "project_not_found",
            DetectorKind::ToolError => "tool_error",
            DetectorKind::FailedCommands => "failed_commands",
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DetectorKind::DEFAULT_ORDER
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownDetector(s.to_string()))
    }
}

/// Classifier configuration: which detectors run, in which order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub priority: Vec<DetectorKind>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            priority: DetectorKind::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl ClassifierConfig {
    /// Build a config from detector names, e.g. from a settings file.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        let priority = names
            .iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<Vec<DetectorKind>, _>>()?;
        let config = Self { priority };
        config.validate()?;
        Ok(config)
    }

    /// Validate the priority list
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.priority.is_empty() {
            return Err(ConfigError::EmptyPriority);
        }
        let mut seen = HashSet::new();
        for detector in &self.priority {
            if !seen.insert(*detector) {
                return Err(ConfigError::DuplicateDetector(detector.to_string()));
            }
        }
        Ok(())
    }
}
