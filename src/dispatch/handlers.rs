//! Live registry of handler types.
//!
//! The command table only stores `(type, method)` names. This registry is
//! what those names are bound against at dispatch time.

use super::console::Console;
use crate::registry::HandlerRef;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A handler instance: one object answering for every method of its type.
pub trait CommandHandler {
    fn invoke(&mut self, method: &str, console: &mut Console<'_>) -> anyhow::Result<()>;
}

/// Creates a fresh handler instance.
pub type HandlerFactory = fn() -> Box<dyn CommandHandler>;

/// A registered handler type: its methods and how to instantiate it.
pub struct HandlerType {
    name: String,
    methods: BTreeSet<String>,
    factory: HandlerFactory,
}

impl HandlerType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    pub fn instantiate(&self) -> Box<dyn CommandHandler> {
        (self.factory)()
    }
}

impl fmt::Debug for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerType")
            .field("name", &self.name)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// Why a [`HandlerRef`] could not be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingFailure {
    TypeMissing,
    MethodMissing,
}

/// Handler types keyed by type id.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    types: BTreeMap<String, HandlerType>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler type. Registering the same id again replaces it.
    pub fn register(
        &mut self,
        type_id: impl Into<String>,
        methods: &[&str],
        factory: HandlerFactory,
    ) -> &mut Self {
        let name = type_id.into();
        self.types.insert(
            name.clone(),
            HandlerType {
                name,
                methods: methods.iter().map(|m| m.to_string()).collect(),
                factory,
            },
        );
        self
    }

    pub fn get(&self, type_id: &str) -> Option<&HandlerType> {
        self.types.get(type_id)
    }

    /// Bind a table entry's handler reference to a live type.
    pub fn resolve(&self, handler: &HandlerRef) -> Result<&HandlerType, BindingFailure> {
        let handler_type = self
            .types
            .get(&handler.type_id)
            .ok_or(BindingFailure::TypeMissing)?;
        if !handler_type.has_method(&handler.method_id) {
            return Err(BindingFailure::MethodMissing);
        }
        Ok(handler_type)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
