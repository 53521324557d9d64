//! Classification result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a failed build or test command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildErrorKind {
    /// One or more compile steps failed
    Compile,
    /// Requested scheme does not exist or is not shared
    Scheme,
    /// Code signing identity problems
    Signing,
    /// Provisioning profile missing or lacking a capability
    Provisioning,
    /// Missing module, unresolved symbol or unfetchable package
    Dependency,
    /// Unknown or invalid build configuration
    Configuration,
    /// SDK cannot be located
    #[serde(rename = "SDK")]
    Sdk,
    /// Invalid destination or unsupported platform
    Destination,
    /// Unknown target
    Target,
    /// Unknown package product
    Product,
    /// Package.swift could not be evaluated
    Manifest,
    /// Anything else the tool reported as an error
    Generic,
}

impl BuildErrorKind {
    /// Stable machine-readable code.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildErrorKind::Compile => "COMPILE",
            BuildErrorKind::Scheme => "SCHEME",
            BuildErrorKind::Signing => "SIGNING",
            BuildErrorKind::Provisioning => "PROVISIONING",
            BuildErrorKind::Dependency => "DEPENDENCY",
            BuildErrorKind::Configuration => "CONFIGURATION",
            BuildErrorKind::Sdk => "SDK",
            BuildErrorKind::Destination => "DESTINATION",
            BuildErrorKind::Target => "TARGET",
            BuildErrorKind::Product => "PRODUCT",
            BuildErrorKind::Manifest => "MANIFEST",
            BuildErrorKind::Generic => "GENERIC",
        }
    }
}

impl fmt::Display for BuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One categorized, user-facing build failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildError {
    pub kind: BuildErrorKind,

    /// Short headline, e.g. `Scheme not found: "App"`
    pub title: String,

    /// Longer explanation extracted from the output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Actionable remediation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl BuildError {
    pub fn new(kind: BuildErrorKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            details: None,
            suggestion: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Render as a short multi-line block for terminals.
    pub fn to_human(&self) -> String {
        let mut lines = vec![format!("[{}] {}", self.kind, self.title)];
        if let Some(ref details) = self.details {
            for line in details.lines() {
                lines.push(format!("  {}", line));
            }
        }
        if let Some(ref suggestion) = self.suggestion {
            lines.push(format!("  Suggestion: {}", suggestion));
        }
        lines.join("\n")
    }
}
