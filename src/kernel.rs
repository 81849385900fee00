//! Process kernel: owns the command table and drives the single dispatch.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized -> Assembling -> Ready -> Resolving -> Invoking -> Completed
//!                        \                    \            \
//!                         `-> Failed(kind)     `-----------`-> Failed(kind)
//! ```
//!
//! Only `Ready` accepts an invocation, and a kernel dispatches at most once.

use crate::dispatch::{Dispatcher, Executor, HandlerRegistry, Invocation};
use crate::error::{BootstrapError, CliError, ErrorKind, Result};
use crate::metadata::MetadataSet;
use crate::registry::{self, CommandTable};
use crate::shutdown::ShutdownState;
use std::fmt;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Name of the cleanup hook that assumes a fully initialized kernel.
pub const KERNEL_HOOK: &str = "kernel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelState {
    Uninitialized,
    Assembling,
    Ready,
    Resolving,
    Invoking,
    Completed,
    Failed(ErrorKind),
}

impl fmt::Display for KernelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelState::Uninitialized => write!(f, "uninitialized"),
            KernelState::Assembling => write!(f, "assembling"),
            KernelState::Ready => write!(f, "ready"),
            KernelState::Resolving => write!(f, "resolving"),
            KernelState::Invoking => write!(f, "invoking"),
            KernelState::Completed => write!(f, "completed"),
            KernelState::Failed(kind) => write!(f, "failed({:?})", kind),
        }
    }
}

pub struct Kernel {
    state: KernelState,
    table: Option<CommandTable>,
    handlers: HandlerRegistry,
    default_command: String,
}

impl Kernel {
    pub fn new(handlers: HandlerRegistry, default_command: impl Into<String>) -> Self {
        Self {
            state: KernelState::Uninitialized,
            table: None,
            handlers,
            default_command: default_command.into(),
        }
    }

    pub fn state(&self) -> KernelState {
        self.state
    }

    /// The assembled table, once the kernel has reached `Ready`.
    pub fn table(&self) -> Option<&CommandTable> {
        self.table.as_ref()
    }

    /// Build the command table. On failure the kernel ends in `Failed` and
    /// holds no table.
    pub fn assemble(&mut self, metadata: &MetadataSet) -> Result<&CommandTable> {
        if self.state != KernelState::Uninitialized {
            return Err(BootstrapError::NotReady(self.state.to_string()).into());
        }
        transition(&mut self.state, KernelState::Assembling);

        match registry::assemble(metadata) {
            Ok(table) => {
                transition(&mut self.state, KernelState::Ready);
                Ok(self.table.insert(table))
            }
            Err(err) => {
                transition(&mut self.state, KernelState::Failed(err.kind()));
                Err(err)
            }
        }
    }

    /// Dispatch the one invocation of this process.
    pub fn handle(
        &mut self,
        invocation: &Invocation,
        executor: &mut dyn Executor,
        out: &mut dyn Write,
    ) -> Result<()> {
        let table = match (&self.table, self.state) {
            (Some(table), KernelState::Ready) => table,
            _ => return Err(BootstrapError::NotReady(self.state.to_string()).into()),
        };
        let dispatcher = Dispatcher::new(table, &self.handlers, self.default_command.as_str());

        transition(&mut self.state, KernelState::Resolving);
        let bound = match dispatcher
            .resolve(invocation.command.as_deref())
            .and_then(|resolved| dispatcher.bind(resolved))
        {
            Ok(bound) => bound,
            Err(err) => {
                transition(&mut self.state, KernelState::Failed(err.kind()));
                return Err(err);
            }
        };

        transition(&mut self.state, KernelState::Invoking);
        match dispatcher.invoke(&bound, invocation, executor, out) {
            Ok(()) => {
                transition(&mut self.state, KernelState::Completed);
                Ok(())
            }
            Err(err) => {
                transition(&mut self.state, KernelState::Failed(err.kind()));
                Err(err)
            }
        }
    }
}

fn transition(state: &mut KernelState, next: KernelState) {
    debug!(from = %state, to = %next, "kernel state");
    *state = next;
}

/// Register the cleanup hook that summarizes the run at exit.
pub fn register_kernel_hook(shutdown: &mut ShutdownState, entry: String) {
    let started = Instant::now();
    shutdown.register(KERNEL_HOOK, move |termination| {
        info!(
            entry = %entry,
            elapsed_ms = started.elapsed().as_millis() as u64,
            termination = termination.map(|t| t.as_str()).unwrap_or("none"),
            "dof run finished"
        );
    });
}

/// Turn a bootstrap failure into the reported error, first disabling cleanup
/// hooks that would run against a half-initialized process.
pub fn fail_bootstrap(err: BootstrapError, shutdown: &mut ShutdownState) -> CliError {
    if err.disables_cleanup() && shutdown.unregister(KERNEL_HOOK) {
        warn!(error = %err, "bootstrap failed; kernel cleanup disabled");
    }
    CliError::Bootstrap(err)
}
