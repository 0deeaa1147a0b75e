//! YAML configuration for docver.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "product docs"
//!
//! # Written to <destination>/../<summary_file_name>
//! summary_file_name: versions.json
//! emit_summary: true
//!
//! # 1 accepts /docs/2/intro, 2 requires a dotted version like /docs/2.0/intro
//! min_version_components: 1
//!
//! # Site data key holding extra root labels
//! labels_data_key: versioned_root_labels
//!
//! root_labels:
//!   /docs/: Documentation
//!   /api/: API Reference
//! ```

use std::fs;
use std::path::Path;

use index::{RootLabels, SUMMARY_FILE_NAME};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level docver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DocverConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    /// File name of the summary artifact, written one level above the destination.
    #[serde(default = "default_summary_file_name")]
    pub summary_file_name: String,

    /// Write the summary during `pre_render`. When off, the host calls
    /// `VersionIndexer::emit_summary` itself.
    #[serde(default = "true_value")]
    pub emit_summary: bool,

    #[serde(default = "default_min_version_components")]
    pub min_version_components: usize,

    /// Site data key consulted for root labels missing from `root_labels`.
    #[serde(default = "default_labels_data_key")]
    pub labels_data_key: String,

    /// Root → display label. Takes precedence over site data.
    #[serde(default)]
    pub root_labels: RootLabels,

    /// Shard aggregation across threads. Needs the `parallel` feature;
    /// ignored otherwise.
    #[serde(default)]
    pub parallel: bool,
}

impl DocverConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: DocverConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        let file_name = self.summary_file_name.as_str();
        if file_name.is_empty() || file_name == "." || file_name == ".." {
            return Err(ConfigLoadError::Validation(
                "summary_file_name must name a file".to_string(),
            ));
        }
        if file_name.contains(['/', '\\']) {
            return Err(ConfigLoadError::Validation(format!(
                "summary_file_name must not contain path separators: {file_name}"
            )));
        }
        if self.min_version_components == 0 {
            return Err(ConfigLoadError::Validation(
                "min_version_components must be >= 1".to_string(),
            ));
        }
        if self.labels_data_key.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "labels_data_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_root_label(mut self, root: impl Into<String>, label: impl Into<String>) -> Self {
        self.root_labels.insert(root, label);
        self
    }
}

impl Default for DocverConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            summary_file_name: default_summary_file_name(),
            emit_summary: true,
            min_version_components: default_min_version_components(),
            labels_data_key: default_labels_data_key(),
            root_labels: RootLabels::default(),
            parallel: false,
        }
    }
}

// Helper functions for serde defaults
fn default_summary_file_name() -> String {
    SUMMARY_FILE_NAME.to_string()
}
fn true_value() -> bool {
    true
}
fn default_min_version_components() -> usize {
    1
}
fn default_labels_data_key() -> String {
    site::keys::ROOT_LABELS.to_string()
}
