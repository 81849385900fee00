//! CLI argument parsing for dof.
//!
//! clap only owns the process-level flags. Everything after them is handed
//! to the command tokenizer untouched, since command names, options and
//! parameters are only known once the registry has been assembled.

use clap::Parser;
use std::path::PathBuf;

use crate::config::CONFIG_ENV_VAR;

/// Dof: command registry and dispatcher for framework, vendor and domain commands.
///
/// Run `dof cmd.all` to list every registered command, or `dof help <command>`
/// for the options and arguments of a single one.
#[derive(Parser, Debug)]
#[command(name = "dof")]
#[command(author, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Path to the YAML config file listing vendor and domain manifests.
    #[arg(long, value_name = "PATH", env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Command name followed by its options and parameters.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse the process arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The raw argument vector for the command tokenizer, entry name first.
    pub fn command_args(&self, entry: &str) -> Vec<String> {
        std::iter::once(entry.to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}
