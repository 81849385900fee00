//! Handler instantiation.

use super::handlers::{CommandHandler, HandlerType};

/// Supplies handler instances to the dispatcher.
///
/// Instantiation may fail; such failures are reported exactly like failures
/// of the handler itself.
pub trait Executor {
    fn instantiate(&mut self, handler: &HandlerType) -> anyhow::Result<Box<dyn CommandHandler>>;
}

/// Calls the handler type's factory directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectExecutor;

impl Executor for DirectExecutor {
    fn instantiate(&mut self, handler: &HandlerType) -> anyhow::Result<Box<dyn CommandHandler>> {
        Ok(handler.instantiate())
    }
}
