//! Process-wide shutdown state.
//!
//! Holds the termination tag of a failed run and the cleanup hooks that run
//! once the process is about to exit.

use crate::error::Termination;
use tracing::debug;

type Hook = Box<dyn FnOnce(Option<Termination>)>;

/// Termination tag plus named cleanup hooks.
#[derive(Default)]
pub struct ShutdownState {
    termination: Option<Termination>,
    hooks: Vec<(String, Hook)>,
}

impl ShutdownState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cleanup hook. Hooks run in registration order.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        hook: impl FnOnce(Option<Termination>) + 'static,
    ) {
        self.hooks.push((name.into(), Box::new(hook)));
    }

    /// Disable every hook registered under `name`. Returns whether any was removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(hook_name, _)| hook_name != name);
        before != self.hooks.len()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.hooks.iter().any(|(hook_name, _)| hook_name == name)
    }

    /// Record the termination tag. The first tag recorded is kept.
    pub fn terminate(&mut self, termination: Termination) {
        if self.termination.is_none() {
            self.termination = Some(termination);
        }
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Run and drop all remaining hooks.
    pub fn run(&mut self) {
        let termination = self.termination;
        for (name, hook) in self.hooks.drain(..) {
            debug!(hook = %name, "running shutdown hook");
            hook(termination);
        }
    }
}
