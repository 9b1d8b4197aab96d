//! Rule configuration.
//!
//! Every field has a Maven-flavoured default, so an empty file (or no file
//! at all) yields a working configuration:
//!
//! ```yaml
//! descriptor_file_name: pom.xml
//! container_packaging: pom
//! container_artifact_type: pom
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::parser::DEFAULT_DESCRIPTOR_FILE_NAME;

/// Packaging kind of an aggregator descriptor.
pub const DEFAULT_CONTAINER_PACKAGING: &str = "pom";

/// Artifact type a host reports for an aggregator project.
pub const DEFAULT_CONTAINER_ARTIFACT_TYPE: &str = "pom";

/// Settings for one parent check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Name of the descriptor file in every module directory.
    pub descriptor_file_name: String,
    /// Packaging that marks a descriptor as a container of modules.
    pub container_packaging: String,
    /// The rule only runs when the root project has this artifact type.
    pub container_artifact_type: String,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            descriptor_file_name: DEFAULT_DESCRIPTOR_FILE_NAME.to_string(),
            container_packaging: DEFAULT_CONTAINER_PACKAGING.to_string(),
            container_artifact_type: DEFAULT_CONTAINER_ARTIFACT_TYPE.to_string(),
        }
    }
}

impl RuleConfig {
    /// Load a YAML configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: RuleConfig = if content.trim().is_empty() {
            RuleConfig::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?
        };
        config.validate().map_err(|detail| ConfigError::Invalid {
            path: path.to_path_buf(),
            detail,
        })?;
        Ok(config)
    }

    /// Replace the descriptor file name.
    pub fn with_descriptor_file_name(mut self, name: impl Into<String>) -> Self {
        self.descriptor_file_name = name.into();
        self
    }

    /// Check that every value is usable: non-empty, and a bare descriptor
    /// file name without path separators.
    pub fn validate(&self) -> Result<(), String> {
        if self.descriptor_file_name.trim().is_empty() {
            return Err("descriptor_file_name must not be empty".to_string());
        }
        if self.descriptor_file_name.contains(['/', '\\']) {
            return Err(format!(
                "descriptor_file_name must be a bare file name, got {:?}",
                self.descriptor_file_name
            ));
        }
        if self.container_packaging.trim().is_empty() {
            return Err("container_packaging must not be empty".to_string());
        }
        if self.container_artifact_type.trim().is_empty() {
            return Err("container_artifact_type must not be empty".to_string());
        }
        Ok(())
    }
}
