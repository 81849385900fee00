//! YAML command manifests.
//!
//! A manifest is the plain-data form of [`ClassMetadata`] for vendor and
//! domain commands:
//!
//! ```yaml
//! classes:
//!   - type: Deploy
//!     prefix: deploy
//!     description: Deployment
//!     options:
//!       env:
//!         notes: Target environment
//!         default: staging
//!     methods:
//!       - method: run
//!         command: run
//!         aliases: [ship]
//!         description: Deploy the current build
//!         argv:
//!           1: Build identifier
//! ```

use super::types::ClassMetadata;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A manifest file: an ordered list of handler classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub classes: Vec<ClassMetadata>,
}

impl Manifest {
    /// Parse a manifest from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Read and parse a manifest file.
    ///
    /// Errors are returned as display strings; the caller attaches the origin
    /// and path when reporting.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("failed to read manifest: {}", e))?;
        Self::from_yaml(&content).map_err(|e| format!("failed to parse manifest YAML: {}", e))
    }
}
