//! Command registry: assembly of metadata into an immutable routing table.
//!
//! - **Spec**: the assembled record for one command name
//! - **Assembler**: merges class and method metadata and enforces naming invariants
//! - **Table**: the read-only lookup structure handed to the dispatcher
//! - **Provenance**: system / vendor / domain classification of every name
//! - **Listing**: filtered, sorted enumeration for presentation

mod assembler;
pub mod listing;
mod provenance;
mod spec;
mod table;

#[cfg(test)]
mod tests;

pub use assembler::assemble;
pub use listing::{ListingEntry, ListingFilter, ListingLine, grouped, list};
pub use provenance::ProvenanceIndex;
pub use spec::{CommandSpec, HandlerRef, NameKind, Provenance};
pub use table::CommandTable;
