//! Configuration merge system
//!
//! Four layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. User config (~/.config/xcmcp/config.toml)
//! 3. Project config (.xcmcp.toml)
//! 4. CLI flags

mod effective;
mod merge;
mod settings;

pub use effective::{
    user_config_path, ConfigOrigin, ConfigSource, EffectiveSettings, PROJECT_CONFIG_FILE,
};
pub use merge::{deep_merge, merge_layers};
pub use settings::{ClassifierSettings, Settings, TestResultSettings};

use std::path::PathBuf;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid settings: {0}")]
    Shape(#[source] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),

    #[error("invalid classifier priority: {0}")]
    Classifier(#[from] xcmcp_classifier::ConfigError),
}
