//! Configuration model for dof.
//!
//! This module defines the `CliConfig` struct read from the YAML file named
//! by `--config` or `$DOF_CLI_CONFIG`. Parsing is forward compatible (unknown
//! fields are ignored), every field has a default, and values are validated
//! after parsing.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::CliConfig;
pub use types::CONFIG_ENV_VAR;
