//! Error types for the dof CLI.
//!
//! Every failure the core can produce is a [`CliError`] variant. Each variant
//! belongs to an [`ErrorKind`] and carries the [`Termination`] tag that the
//! top-level boundary records before the process exits.

use crate::exit_codes;
use crate::metadata::Origin;
use crate::registry::HandlerRef;
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Reason tag attached to the shutdown state on any fatal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A handler reported an error.
    Error,
    /// The invocation failed (unknown command, or a handler-reported failure).
    Fail,
    /// A structured exception raised while binding or running a handler.
    Exceptor,
    /// A failure before dispatch: bootstrap or assembly.
    Throwable,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::Error => "error",
            Termination::Fail => "fail",
            Termination::Exceptor => "exceptor",
            Termination::Throwable => "throwable",
        }
    }

    /// Line prefix used when the diagnostic is printed.
    pub fn label(&self) -> &'static str {
        match self {
            Termination::Error => "[ERROR]",
            Termination::Fail => "[FAIL]",
            Termination::Exceptor | Termination::Throwable => "[EXCEPTOR]",
        }
    }

    /// Process exit code for this termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Termination::Error => exit_codes::HANDLER_ERROR,
            Termination::Fail => exit_codes::INVOCATION_FAILED,
            Termination::Exceptor => exit_codes::EXCEPTOR,
            Termination::Throwable => exit_codes::THROWABLE,
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of [`CliError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Invalid command metadata, detected during assembly.
    Configuration,
    /// The invoked command does not exist.
    Resolution,
    /// A table entry points at a handler that is not registered.
    HandlerBinding,
    /// The handler failed while running.
    Execution,
    /// The process could not be initialized.
    Bootstrap,
    /// The handler stopped the invocation through the console.
    Halted,
}

/// A registered command offered when the typed one does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub description: String,
}

/// Failures that happen before the command table is ready.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// A path the process needs to write to is not writable.
    #[error("write permission denied for '{}': {reason}", path.display())]
    PermissionDenied { path: PathBuf, reason: String },

    /// The configuration file could not be loaded or is invalid.
    #[error("{0}")]
    Config(String),

    /// A vendor or domain manifest could not be loaded.
    #[error("failed to load manifest of {origin} from '{}': {reason}", path.display())]
    Manifest {
        origin: Origin,
        path: PathBuf,
        reason: String,
    },

    /// A dispatch was attempted while the kernel was not in the `Ready` state.
    #[error("kernel is not ready to dispatch (state: {0})")]
    NotReady(String),
}

impl BootstrapError {
    /// Whether cleanup hooks that assume a fully initialized process must be
    /// disabled before this failure is reported.
    pub fn disables_cleanup(&self) -> bool {
        matches!(self, BootstrapError::PermissionDenied { .. })
    }
}

/// Main error type for dof operations.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{class}::{method} declares aliases [{}] without a primary command name", aliases.join(", "))]
    AliasWithoutPrimary {
        class: String,
        method: String,
        aliases: Vec<String>,
    },

    #[error("command description of {class}::{method} is empty")]
    EmptyDescription { class: String, method: String },

    #[error("description of option `--{option}` on {class}::{method} is empty")]
    EmptyOptionDescription {
        class: String,
        method: String,
        option: String,
    },

    #[error("description of argument #{position} on {class}::{method} is empty")]
    EmptyArgvDescription {
        class: String,
        method: String,
        position: u32,
    },

    #[error(
        "command `{command}` of {current} ({current_origin}) conflicts with {conflict} ({conflict_origin})"
    )]
    DuplicateCommand {
        command: String,
        current: HandlerRef,
        current_origin: Origin,
        conflict: HandlerRef,
        conflict_origin: Origin,
    },

    #[error("command `{command}` not found")]
    CommandNotFound {
        command: String,
        suggestions: Vec<Suggestion>,
    },

    #[error("handler type `{}` of command `{command}` does not exist", handler.type_id)]
    HandlerClassMissing { command: String, handler: HandlerRef },

    #[error("handler method `{handler}` of command `{command}` does not exist")]
    HandlerMethodMissing { command: String, handler: HandlerRef },

    #[error("command `{command}` failed in {handler}")]
    CommandExecutionFailed {
        command: String,
        handler: HandlerRef,
        #[source]
        cause: anyhow::Error,
    },

    /// The handler stopped the invocation with `Console::error` or `Console::fail`.
    #[error("{message}")]
    Halted {
        termination: Termination,
        message: String,
        context: Value,
    },

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
}

impl CliError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::AliasWithoutPrimary { .. }
            | CliError::EmptyDescription { .. }
            | CliError::EmptyOptionDescription { .. }
            | CliError::EmptyArgvDescription { .. }
            | CliError::DuplicateCommand { .. } => ErrorKind::Configuration,
            CliError::CommandNotFound { .. } => ErrorKind::Resolution,
            CliError::HandlerClassMissing { .. } | CliError::HandlerMethodMissing { .. } => {
                ErrorKind::HandlerBinding
            }
            CliError::CommandExecutionFailed { .. } => ErrorKind::Execution,
            CliError::Halted { .. } => ErrorKind::Halted,
            CliError::Bootstrap(_) => ErrorKind::Bootstrap,
        }
    }

    /// The reason tag recorded on the shutdown state for this error.
    pub fn termination(&self) -> Termination {
        match self {
            CliError::Halted { termination, .. } => *termination,
            _ => match self.kind() {
                ErrorKind::Configuration | ErrorKind::Bootstrap => Termination::Throwable,
                ErrorKind::Resolution => Termination::Fail,
                ErrorKind::HandlerBinding | ErrorKind::Execution | ErrorKind::Halted => {
                    Termination::Exceptor
                }
            },
        }
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            CliError::AliasWithoutPrimary { .. } => "CMD_ALIAS_WITHOUT_MAIN",
            CliError::EmptyDescription { .. } => "EMPTY_COMMAND_DESCRIPTION",
            CliError::EmptyOptionDescription { .. } => "EMPTY_OPTION_DESCRIPTION",
            CliError::EmptyArgvDescription { .. } => "EMPTY_ARGV_DESCRIPTION",
            CliError::DuplicateCommand { .. } => "DUPLICATE_COMMAND",
            CliError::CommandNotFound { .. } => "COMMAND_NOT_FOUND",
            CliError::HandlerClassMissing { .. } => "COMMAND_CLASS_NOT_EXISTS",
            CliError::HandlerMethodMissing { .. } => "COMMAND_HANDLER_NOT_EXISTS",
            CliError::CommandExecutionFailed { .. } => "COMMAND_EXECUTE_FAILED",
            CliError::Halted { termination, .. } => match termination {
                Termination::Error => "COMMAND_ERROR",
                _ => "COMMAND_FAILED",
            },
            CliError::Bootstrap(BootstrapError::PermissionDenied { .. }) => {
                "WRITE_PERMISSION_DENIED"
            }
            CliError::Bootstrap(BootstrapError::Config(_)) => "INVALID_CONFIG",
            CliError::Bootstrap(BootstrapError::Manifest { .. }) => "INVALID_MANIFEST",
            CliError::Bootstrap(BootstrapError::NotReady(_)) => "KERNEL_NOT_READY",
        }
    }

    /// Structured context fields for diagnostics.
    pub fn context(&self) -> Value {
        match self {
            CliError::AliasWithoutPrimary {
                class,
                method,
                aliases,
            } => json!({ "class": class, "method": method, "alias": aliases }),
            CliError::EmptyDescription { class, method } => {
                json!({ "class": class, "method": method })
            }
            CliError::EmptyOptionDescription {
                class,
                method,
                option,
            } => json!({ "class": class, "method": method, "option": option }),
            CliError::EmptyArgvDescription {
                class,
                method,
                position,
            } => json!({ "class": class, "method": method, "argv": position }),
            CliError::DuplicateCommand {
                command,
                current,
                current_origin,
                conflict,
                conflict_origin,
            } => json!({
                "command": command,
                "current": { "handler": current, "origin": current_origin },
                "conflict": { "handler": conflict, "origin": conflict_origin },
            }),
            CliError::CommandNotFound {
                command,
                suggestions,
            } => json!({ "cmd": command, "suggest": suggestions }),
            CliError::HandlerClassMissing { command, handler }
            | CliError::HandlerMethodMissing { command, handler }
            | CliError::CommandExecutionFailed {
                command, handler, ..
            } => json!({
                "cmd": command,
                "class": handler.type_id,
                "method": handler.method_id,
            }),
            CliError::Halted { context, .. } => context.clone(),
            CliError::Bootstrap(BootstrapError::PermissionDenied { path, .. }) => {
                json!({ "path": path })
            }
            CliError::Bootstrap(BootstrapError::Manifest { origin, path, .. }) => {
                json!({ "origin": origin, "path": path })
            }
            CliError::Bootstrap(_) => Value::Null,
        }
    }
}

/// Result type alias for dof operations.
pub type Result<T> = std::result::Result<T, CliError>;
