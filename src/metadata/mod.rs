//! Declarative command metadata.
//!
//! Handler modules describe their commands as plain data: a [`ClassMetadata`]
//! per handler type, holding class-level defaults and one [`MethodMetadata`]
//! per handler method. Built-in commands register through the builder API;
//! vendor and domain commands are usually read from YAML manifests.
//!
//! Nothing here validates names or descriptions. That happens once, during
//! assembly, in [`crate::registry`].

mod manifest;
mod merge;
mod types;


pub use manifest::Manifest;
pub use types::{
    ClassMetadata, Declarations, MetadataSet, MethodMetadata, OptionSpec, Origin, Tier,
};
