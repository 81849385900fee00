//! CliConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Configuration for a dof run.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Command run when no command token is given (default: "dof").
    #[serde(default = "default_command")]
    pub default_command: String,

    /// Directory the process must be able to write to; checked at bootstrap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_dir: Option<PathBuf>,

    /// `tracing` filter used when `RUST_LOG` is unset (default: "warn").
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Vendor id → command manifest path.
    #[serde(default)]
    pub vendors: BTreeMap<String, PathBuf>,

    /// Domain name → command manifest path.
    #[serde(default)]
    pub domains: BTreeMap<String, PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_command: default_command(),
            runtime_dir: None,
            log_filter: default_log_filter(),
            vendors: BTreeMap::new(),
            domains: BTreeMap::new(),
        }
    }
}
