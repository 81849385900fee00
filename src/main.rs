//! Dof: command registry assembly and dispatch.
//!
//! This is the main entry point for the `dof` CLI. It loads the config,
//! bootstraps the command metadata, assembles the command table, dispatches
//! the single invocation and maps its termination tag to an exit code.

mod bootstrap;
mod cli;
mod commands;
pub mod config;
pub mod diagnostic;
pub mod dispatch;
pub mod error;
pub mod exit_codes;
pub mod kernel;
pub mod metadata;
pub mod registry;
pub mod shutdown;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::CliConfig;
use diagnostic::Diagnostic;
use dispatch::{DirectExecutor, HandlerRegistry, Invocation};
use error::CliError;
use kernel::{Kernel, fail_bootstrap, register_kernel_hook};
use shutdown::ShutdownState;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_ENTRY: &str = "dof";

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let config = CliConfig::load_or_default(cli.config.as_deref());

    let filter = match &config {
        Ok(config) => config.log_filter.as_str(),
        Err(_) => "warn",
    };
    init_tracing(filter);

    let entry = entry_name();
    let mut shutdown = ShutdownState::new();
    register_kernel_hook(&mut shutdown, entry.clone());

    let result = config
        .map_err(|err| fail_bootstrap(err, &mut shutdown))
        .and_then(|config| run(&cli, &config, &entry, &mut shutdown));

    let code = match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            let termination = err.termination();
            shutdown.terminate(termination);
            eprintln!("{}", Diagnostic::from_error(&err).render());
            termination.exit_code()
        }
    };

    shutdown.run();
    ExitCode::from(code as u8)
}

/// Bootstrap, assemble and dispatch one invocation.
fn run(
    cli: &Cli,
    config: &CliConfig,
    entry: &str,
    shutdown: &mut ShutdownState,
) -> Result<(), CliError> {
    let base_dir = config_base_dir(cli.config.as_deref());
    let metadata =
        bootstrap::bootstrap(config, &base_dir).map_err(|err| fail_bootstrap(err, shutdown))?;

    let mut handlers = HandlerRegistry::new();
    commands::register(&mut handlers);

    let mut kernel = Kernel::new(handlers, config.default_command.as_str());
    kernel.assemble(&metadata)?;

    let invocation = Invocation::from_args(cli.command_args(entry));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    kernel.handle(&invocation, &mut DirectExecutor, &mut out)
}

/// `RUST_LOG` wins over the configured filter; logs go to stderr.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// File name the binary was invoked as.
fn entry_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg| {
            Path::new(&arg)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| DEFAULT_ENTRY.to_string())
}

/// Directory relative manifest paths resolve against.
fn config_base_dir(config_path: Option<&Path>) -> PathBuf {
    config_path
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
