//! Config loading, validation, and utility operations.

use super::model::CliConfig;
use crate::error::BootstrapError;
use std::path::Path;

type Result<T> = std::result::Result<T, BootstrapError>;

impl CliConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(CliConfig)` - Successfully loaded and validated config
    /// * `Err(BootstrapError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            BootstrapError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the config file if one is given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: CliConfig = if yaml.trim().is_empty() {
            CliConfig::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                BootstrapError::Config(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            BootstrapError::Config(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `default_command` must be non-empty and contain no whitespace
    /// - vendor ids and domain names must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.default_command.trim().is_empty() {
            return Err(BootstrapError::Config(
                "config validation failed: default_command must not be empty".to_string(),
            ));
        }
        if self.default_command.chars().any(char::is_whitespace) {
            return Err(BootstrapError::Config(format!(
                "config validation failed: default_command must be a single command name (found '{}')",
                self.default_command
            )));
        }

        for (label, ids) in [("vendors", &self.vendors), ("domains", &self.domains)] {
            if ids.keys().any(|id| id.trim().is_empty()) {
                return Err(BootstrapError::Config(format!(
                    "config validation failed: {} entries must have a non-empty name",
                    label
                )));
            }
        }

        Ok(())
    }
}
