//! Invocation dispatch.
//!
//! Resolves one invocation's command token against the [`CommandTable`],
//! binds the entry to a live handler type and runs it through an
//! [`Executor`]. Every failure comes back as a [`CliError`]; nothing here
//! prints or exits.
//!
//! # Resolution Order
//!
//! 1. Lowercase the token; an empty or missing token becomes the default command
//! 2. Look the name up; a miss reports `CommandNotFound` with suggestions
//! 3. Bind the entry's type and method against the [`HandlerRegistry`]
//! 4. Instantiate and invoke; any failure, panics included, is wrapped with
//!    the command and handler identity

mod console;
mod executor;
mod handlers;
mod invocation;


pub use console::{Console, Halt};
pub use executor::{DirectExecutor, Executor};
pub use handlers::{BindingFailure, CommandHandler, HandlerFactory, HandlerRegistry, HandlerType};
pub use invocation::{Invocation, OptionValue, Options};

use crate::error::{CliError, Result};
use crate::registry::{CommandSpec, CommandTable};
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// A command name found in the table.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub command: String,
    pub spec: &'a CommandSpec,
}

/// A resolved command bound to a live handler type.
#[derive(Debug)]
pub struct Bound<'a> {
    pub command: String,
    pub spec: &'a CommandSpec,
    pub handler_type: &'a HandlerType,
}

/// Resolves and runs invocations against one command table.
#[derive(Debug)]
pub struct Dispatcher<'a> {
    table: &'a CommandTable,
    handlers: &'a HandlerRegistry,
    default_command: String,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        table: &'a CommandTable,
        handlers: &'a HandlerRegistry,
        default_command: impl Into<String>,
    ) -> Self {
        Self {
            table,
            handlers,
            default_command: default_command.into(),
        }
    }

    /// Lowercased command name for a token; empty or missing tokens map to
    /// the default command.
    pub fn normalize(&self, token: Option<&str>) -> String {
        match token {
            Some(token) if !token.is_empty() => token.to_lowercase(),
            _ => self.default_command.to_lowercase(),
        }
    }

    /// Find the table entry for a command token.
    pub fn resolve(&self, token: Option<&str>) -> Result<Resolved<'a>> {
        let command = self.normalize(token);
        match self.table.get(&command) {
            Some(spec) => {
                debug!(%command, handler = %spec.handler, "command resolved");
                Ok(Resolved { command, spec })
            }
            None => {
                let suggestions = self.table.suggest(&command);
                debug!(%command, suggestions = suggestions.len(), "command not found");
                Err(CliError::CommandNotFound {
                    command: token.filter(|t| !t.is_empty()).unwrap_or(&command).to_string(),
                    suggestions,
                })
            }
        }
    }

    /// Bind a resolved entry to its handler type.
    pub fn bind(&self, resolved: Resolved<'a>) -> Result<Bound<'a>> {
        let handler = &resolved.spec.handler;
        match self.handlers.resolve(handler) {
            Ok(handler_type) => Ok(Bound {
                command: resolved.command,
                spec: resolved.spec,
                handler_type,
            }),
            Err(BindingFailure::TypeMissing) => Err(CliError::HandlerClassMissing {
                command: resolved.command,
                handler: handler.clone(),
            }),
            Err(BindingFailure::MethodMissing) => Err(CliError::HandlerMethodMissing {
                command: resolved.command,
                handler: handler.clone(),
            }),
        }
    }

    /// Instantiate the bound handler and run its method.
    pub fn invoke(
        &self,
        bound: &Bound<'a>,
        invocation: &Invocation,
        executor: &mut dyn Executor,
        out: &mut dyn Write,
    ) -> Result<()> {
        let handler = &bound.spec.handler;
        let mut console = Console::new(
            &invocation.entry,
            &bound.command,
            invocation.options.clone(),
            invocation.params.clone(),
            self.table,
            out,
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> anyhow::Result<()> {
            let mut instance = executor.instantiate(bound.handler_type)?;
            instance.invoke(&handler.method_id, &mut console)
        }));

        let cause = match outcome {
            Ok(Ok(())) => {
                debug!(command = %bound.command, %handler, "command completed");
                return Ok(());
            }
            Ok(Err(err)) => match err.downcast::<Halt>() {
                Ok(halt) => {
                    debug!(command = %bound.command, termination = %halt.termination, "command halted");
                    return Err(CliError::Halted {
                        termination: halt.termination,
                        message: halt.message,
                        context: halt.context,
                    });
                }
                Err(err) => err,
            },
            Err(payload) => anyhow::anyhow!("handler panicked: {}", panic_message(payload.as_ref())),
        };

        warn!(command = %bound.command, %handler, error = %cause, "command failed");
        Err(CliError::CommandExecutionFailed {
            command: bound.command.clone(),
            handler: handler.clone(),
            cause,
        })
    }

    /// Resolve, bind and invoke in one step.
    pub fn dispatch(
        &self,
        invocation: &Invocation,
        executor: &mut dyn Executor,
        out: &mut dyn Write,
    ) -> Result<()> {
        let resolved = self.resolve(invocation.command.as_deref())?;
        let bound = self.bind(resolved)?;
        self.invoke(&bound, invocation, executor, out)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
