//! Assembled command records.

use crate::metadata::{OptionSpec, Tier};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The `(type, method)` pair a command name is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HandlerRef {
    pub type_id: String,
    pub method_id: String,
}

impl HandlerRef {
    pub fn new(type_id: impl Into<String>, method_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            method_id: method_id.into(),
        }
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.type_id, self.method_id)
    }
}

/// Where an entry came from and when it was registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub tier: Tier,
    pub origin_id: String,
    /// 0-based registration position across the whole table, in tier order.
    pub sequence_index: usize,
}

/// Whether a table key is a method's primary name or one of its aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameKind {
    Primary,
    Alias,
}

/// The assembled record behind one command name.
///
/// Entries only exist for methods that declare a primary name, so `primary`
/// is always set. For an alias entry it names the command the alias points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub primary: String,
    pub aliases: BTreeSet<String>,
    pub kind: NameKind,
    pub description: String,
    pub options: BTreeMap<String, OptionSpec>,
    pub argv: BTreeMap<u32, String>,
    pub handler: HandlerRef,
    pub provenance: Provenance,
}

impl CommandSpec {
    pub fn is_alias(&self) -> bool {
        self.kind == NameKind::Alias
    }
}
