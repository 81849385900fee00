//! Bootstrap: everything that must hold before the command table is built.
//!
//! 1. The runtime directory, when configured, must be writable.
//! 2. Built-in metadata is collected, followed by every vendor manifest and
//!    then every domain manifest named in the config.
//!
//! Manifest paths that are relative resolve against `base_dir` (the config
//! file's directory, or the working directory when no config file is used).

use crate::commands;
use crate::config::CliConfig;
use crate::error::BootstrapError;
use crate::metadata::{Manifest, MetadataSet, Origin};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

type Result<T> = std::result::Result<T, BootstrapError>;

/// Run both bootstrap steps and return the metadata to assemble.
pub fn bootstrap(config: &CliConfig, base_dir: &Path) -> Result<MetadataSet> {
    if let Some(runtime_dir) = &config.runtime_dir {
        ensure_writable(&resolve(base_dir, runtime_dir))?;
    }
    collect_metadata(config, base_dir)
}

/// Verify that `dir` exists (creating it if needed) and accepts new files.
pub fn ensure_writable(dir: &Path) -> Result<()> {
    let denied = |e: std::io::Error| BootstrapError::PermissionDenied {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };

    fs::create_dir_all(dir).map_err(denied)?;

    let probe = dir.join(format!(".dof-probe-{}", std::process::id()));
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&probe)
        .map_err(denied)?;
    let written = file.write_all(b"ok").and_then(|_| file.sync_all());
    drop(file);
    let _ = fs::remove_file(&probe);
    written.map_err(denied)?;

    debug!(dir = %dir.display(), "runtime directory is writable");
    Ok(())
}

/// Built-in classes followed by vendor and domain manifests.
///
/// Vendors and domains are loaded sorted by id, whatever their order in the
/// config file.
pub fn collect_metadata(config: &CliConfig, base_dir: &Path) -> Result<MetadataSet> {
    let mut set = MetadataSet::new();
    set.add_system(commands::metadata());

    for (vendor, path) in &config.vendors {
        let manifest = load_manifest(Origin::vendor(vendor.as_str()), &resolve(base_dir, path))?;
        set.add_vendor(vendor, manifest.classes);
    }
    for (domain, path) in &config.domains {
        let manifest = load_manifest(Origin::domain(domain.as_str()), &resolve(base_dir, path))?;
        set.add_domain(domain, manifest.classes);
    }

    debug!(classes = set.len(), "collected command metadata");
    Ok(set)
}

fn load_manifest(origin: Origin, path: &Path) -> Result<Manifest> {
    let manifest = Manifest::load(path).map_err(|reason| BootstrapError::Manifest {
        origin: origin.clone(),
        path: path.to_path_buf(),
        reason,
    })?;
    debug!(%origin, path = %path.display(), classes = manifest.classes.len(), "loaded manifest");
    Ok(manifest)
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
