//! Filtered, sorted enumeration of the command table for presentation.
//!
//! Nothing in here affects resolution.

use super::table::CommandTable;
use crate::metadata::Tier;
use serde::Serialize;

/// Which commands to list.
///
/// `Vendor(None)` and `Domain(None)` select every vendor or domain command;
/// `Some(id)` narrows to one origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListingFilter {
    #[default]
    All,
    System,
    Vendor(Option<String>),
    Domain(Option<String>),
}

/// One listed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub description: String,
    pub tier: Tier,
}

/// A listing row: a command, or a break between initial-letter groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingLine<'a> {
    Entry(&'a ListingEntry),
    Separator,
}

/// Entries of `table` matching `filter`, sorted by name.
///
/// Candidate names come from the table's [`ProvenanceIndex`](super::ProvenanceIndex)
/// views, so a filter never has to inspect every entry.
pub fn list(table: &CommandTable, filter: &ListingFilter) -> Vec<ListingEntry> {
    let index = table.provenance();
    let mut names: Vec<&str> = match filter {
        ListingFilter::All => table.names().collect(),
        ListingFilter::System => index.system().iter().map(String::as_str).collect(),
        ListingFilter::Vendor(Some(id)) => index
            .vendor(id)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect(),
        ListingFilter::Vendor(None) => index
            .vendors()
            .values()
            .flatten()
            .map(String::as_str)
            .collect(),
        ListingFilter::Domain(Some(name)) => index
            .domain(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect(),
        ListingFilter::Domain(None) => index
            .domains()
            .values()
            .flatten()
            .map(String::as_str)
            .collect(),
    };
    names.sort_unstable();

    names
        .into_iter()
        .filter_map(|name| table.get(name).map(|spec| (name, spec)))
        .map(|(name, spec)| ListingEntry {
            name: name.to_string(),
            description: spec.description.clone(),
            tier: spec.provenance.tier,
        })
        .collect()
}

/// Interleave separators wherever the first character of the next name
/// differs (case-insensitively) from the current one.
pub fn grouped(entries: &[ListingEntry]) -> Vec<ListingLine<'_>> {
    let mut lines = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        lines.push(ListingLine::Entry(entry));
        if let Some(next) = entries.get(i + 1)
            && initial(&entry.name) != initial(&next.name)
        {
            lines.push(ListingLine::Separator);
        }
    }
    lines
}

fn initial(name: &str) -> Option<char> {
    name.chars().next().map(|c| c.to_lowercase().next().unwrap_or(c))
}
