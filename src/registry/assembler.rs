//! Command assembly.
//!
//! Turns an ordered [`MetadataSet`] into a [`CommandTable`]. Every invariant
//! violation aborts assembly with a configuration error; the partially built
//! state is dropped and never reaches the dispatcher.

use super::provenance::ProvenanceIndex;
use super::spec::{CommandSpec, HandlerRef, NameKind, Provenance};
use super::table::CommandTable;
use crate::error::{CliError, Result};
use crate::metadata::{ClassMetadata, Declarations, MetadataSet, MethodMetadata, Origin};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Assemble the command table.
///
/// Classes are processed in tier order (system, vendor, domain); within a
/// tier the input order is kept. Assembling the same input twice yields
/// identical tables.
///
/// # Errors
///
/// - [`CliError::AliasWithoutPrimary`] - aliases on a method with no primary name
/// - [`CliError::EmptyDescription`] - a command method without a description
/// - [`CliError::EmptyOptionDescription`] - an option with empty notes after merging
/// - [`CliError::EmptyArgvDescription`] - an argument with empty notes after merging
/// - [`CliError::DuplicateCommand`] - a name already taken by any earlier entry
pub fn assemble(metadata: &MetadataSet) -> Result<CommandTable> {
    let mut ordered: Vec<&(Origin, ClassMetadata)> = metadata.iter().collect();
    ordered.sort_by_key(|(origin, _)| origin.tier);

    let mut assembler = Assembler::default();
    for (origin, class) in ordered {
        assembler.add_class(origin, class)?;
    }

    let table = assembler.finish();
    debug!(commands = table.len(), "command table assembled");
    Ok(table)
}

#[derive(Default)]
struct Assembler {
    commands: BTreeMap<String, CommandSpec>,
    origins: BTreeMap<String, Origin>,
    registration_order: Vec<String>,
    provenance: ProvenanceIndex,
}

impl Assembler {
    fn add_class(&mut self, origin: &Origin, class: &ClassMetadata) -> Result<()> {
        let base = class.declarations();
        for method in &class.methods {
            self.add_method(origin, class, &base, method)?;
        }
        Ok(())
    }

    fn add_method(
        &mut self,
        origin: &Origin,
        class: &ClassMetadata,
        base: &Declarations,
        method: &MethodMetadata,
    ) -> Result<()> {
        let handler = HandlerRef::new(&class.type_id, &method.method_id);
        let aliases = normalize_aliases(&method.aliases);

        let Some(primary) = primary_name(class.prefix.as_deref(), method.command.as_deref())
        else {
            if !aliases.is_empty() {
                return Err(CliError::AliasWithoutPrimary {
                    class: handler.type_id,
                    method: handler.method_id,
                    aliases,
                });
            }
            trace!(%handler, "method declares no command");
            return Ok(());
        };

        if method.description.trim().is_empty() {
            return Err(CliError::EmptyDescription {
                class: handler.type_id,
                method: handler.method_id,
            });
        }
        let description = match class.description.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => format!("{}: {}", label, method.description),
            _ => method.description.clone(),
        };

        let declarations = base.overlay(&method.declarations());
        check_declarations(&handler, &declarations)?;

        let alias_set: BTreeSet<String> = aliases
            .iter()
            .filter(|alias| **alias != primary)
            .cloned()
            .collect();

        let mut names = vec![(primary.clone(), NameKind::Primary)];
        names.extend(
            aliases
                .iter()
                .filter(|alias| **alias != primary)
                .map(|alias| (alias.clone(), NameKind::Alias)),
        );

        for (name, kind) in names {
            if let Some(existing) = self.commands.get(&name) {
                return Err(CliError::DuplicateCommand {
                    command: name.clone(),
                    current: handler.clone(),
                    current_origin: origin.clone(),
                    conflict: existing.handler.clone(),
                    conflict_origin: self.origins[&name].clone(),
                });
            }

            let provenance = Provenance {
                tier: origin.tier,
                origin_id: origin.id.clone(),
                sequence_index: self.registration_order.len(),
            };
            let description = match kind {
                NameKind::Primary => description.clone(),
                NameKind::Alias => format!("Alias of `{}`", primary),
            };

            debug!(command = %name, %handler, origin = %origin, ?kind, "registering command");
            self.provenance.record(&name, &provenance);
            self.registration_order.push(name.clone());
            self.origins.insert(name.clone(), origin.clone());
            self.commands.insert(
                name,
                CommandSpec {
                    primary: primary.clone(),
                    aliases: alias_set.clone(),
                    kind,
                    description,
                    options: declarations.options.clone(),
                    argv: declarations.argv.clone(),
                    handler: handler.clone(),
                    provenance,
                },
            );
        }

        Ok(())
    }

    fn finish(self) -> CommandTable {
        CommandTable::from_parts(self.commands, self.registration_order, self.provenance)
    }
}

/// Full primary name: `prefix.name`, lowercased. Blank names and prefixes
/// count as absent.
fn primary_name(prefix: Option<&str>, name: Option<&str>) -> Option<String> {
    let name = name.map(str::trim).filter(|n| !n.is_empty())?;
    let full = match prefix.map(str::trim).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}.{}", prefix, name),
        None => name.to_string(),
    };
    Some(full.to_lowercase())
}

/// Lowercased, trimmed, de-duplicated aliases in declaration order.
fn normalize_aliases(aliases: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    aliases
        .iter()
        .map(|alias| alias.trim().to_lowercase())
        .filter(|alias| !alias.is_empty() && seen.insert(alias.clone()))
        .collect()
}

fn check_declarations(handler: &HandlerRef, declarations: &Declarations) -> Result<()> {
    for (option, spec) in &declarations.options {
        if spec.notes.trim().is_empty() {
            return Err(CliError::EmptyOptionDescription {
                class: handler.type_id.clone(),
                method: handler.method_id.clone(),
                option: option.clone(),
            });
        }
    }
    for (position, notes) in &declarations.argv {
        if notes.trim().is_empty() {
            return Err(CliError::EmptyArgvDescription {
                class: handler.type_id.clone(),
                method: handler.method_id.clone(),
                position: *position,
            });
        }
    }
    Ok(())
}
