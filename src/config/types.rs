//! Configuration constants and default value functions.

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "DOF_CLI_CONFIG";

// Default value functions for serde
pub(crate) fn default_command() -> String {
    "dof".to_string()
}
pub(crate) fn default_log_filter() -> String {
    "warn".to_string()
}
