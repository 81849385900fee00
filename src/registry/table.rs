//! The immutable command table.

use super::provenance::ProvenanceIndex;
use super::spec::CommandSpec;
use crate::error::Suggestion;
use serde::Serialize;
use std::collections::BTreeMap;

/// Lowercase command name → [`CommandSpec`].
///
/// Built once by [`super::assemble`]; there is no way to change it afterwards.
/// It holds no interior mutability, so it can be shared across threads by
/// reference or behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandTable {
    commands: BTreeMap<String, CommandSpec>,
    registration_order: Vec<String>,
    provenance: ProvenanceIndex,
}

impl CommandTable {
    pub(super) fn from_parts(
        commands: BTreeMap<String, CommandSpec>,
        registration_order: Vec<String>,
        provenance: ProvenanceIndex,
    ) -> Self {
        Self {
            commands,
            registration_order,
            provenance,
        }
    }

    /// Look up a command by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All entries, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandSpec)> {
        self.commands.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// All names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Names in the order they were registered.
    pub fn registration_order(&self) -> &[String] {
        &self.registration_order
    }

    pub fn provenance(&self) -> &ProvenanceIndex {
        &self.provenance
    }

    /// Every registered name containing `token` (case-insensitive), paired
    /// with its description, sorted by name.
    pub fn suggest(&self, token: &str) -> Vec<Suggestion> {
        let needle = token.to_lowercase();
        self.commands
            .iter()
            .filter(|(name, _)| name.contains(&needle))
            .map(|(name, spec)| Suggestion {
                name: name.clone(),
                description: spec.description.clone(),
            })
            .collect()
    }
}
