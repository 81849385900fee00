//! Metadata records and their builders.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where a command comes from.
///
/// The declaration order is also the assembly order: system commands are
/// registered first, then vendor commands, then domain commands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Built into the CLI itself.
    System,
    /// Shipped by a vendor package.
    Vendor,
    /// Declared by a project domain.
    Domain,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::System => write!(f, "system"),
            Tier::Vendor => write!(f, "vendor"),
            Tier::Domain => write!(f, "domain"),
        }
    }
}

/// The origin of a batch of class metadata: a tier plus an identifier
/// (vendor id or domain name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    pub tier: Tier,
    pub id: String,
}

impl Origin {
    /// Identifier used for every built-in origin.
    pub const SYSTEM_ID: &'static str = "system";

    pub fn system() -> Self {
        Self {
            tier: Tier::System,
            id: Self::SYSTEM_ID.to_string(),
        }
    }

    pub fn vendor(id: impl Into<String>) -> Self {
        Self {
            tier: Tier::Vendor,
            id: id.into(),
        }
    }

    pub fn domain(name: impl Into<String>) -> Self {
        Self {
            tier: Tier::Domain,
            id: name.into(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier {
            Tier::System => write!(f, "system"),
            tier => write!(f, "{}:{}", tier, self.id),
        }
    }
}

/// A declared `--option`: its help notes and an optional default shown in help output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    #[serde(default)]
    pub notes: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl OptionSpec {
    pub fn new(notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Option and positional-argument declarations at one level (class or method).
///
/// Positions are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    pub options: BTreeMap<String, OptionSpec>,
    pub argv: BTreeMap<u32, String>,
}

/// Metadata for one handler type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    /// Identifier of the handler type that owns the methods.
    #[serde(rename = "type")]
    pub type_id: String,

    /// Prefix joined to every method's primary name with a `.`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Label prepended to every method description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Class-level option defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, OptionSpec>,

    /// Class-level positional-argument defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub argv: BTreeMap<u32, String>,

    #[serde(default)]
    pub methods: Vec<MethodMetadata>,
}

impl ClassMetadata {
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            ..Default::default()
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn option(mut self, name: impl Into<String>, spec: OptionSpec) -> Self {
        self.options.insert(name.into(), spec);
        self
    }

    pub fn argv(mut self, position: u32, notes: impl Into<String>) -> Self {
        self.argv.insert(position, notes.into());
        self
    }

    /// The class-level declarations, used as the merge base for every method.
    pub fn declarations(&self) -> Declarations {
        Declarations {
            options: self.options.clone(),
            argv: self.argv.clone(),
        }
    }

    pub fn method(mut self, method: MethodMetadata) -> Self {
        self.methods.push(method);
        self
    }
}

/// Metadata for one handler method.
///
/// A method without a primary command name is a plain helper and registers
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodMetadata {
    #[serde(rename = "method")]
    pub method_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, OptionSpec>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub argv: BTreeMap<u32, String>,
}

impl MethodMetadata {
    pub fn new(method_id: impl Into<String>) -> Self {
        Self {
            method_id: method_id.into(),
            ..Default::default()
        }
    }

    pub fn command(mut self, name: impl Into<String>) -> Self {
        self.command = Some(name.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn option(mut self, name: impl Into<String>, spec: OptionSpec) -> Self {
        self.options.insert(name.into(), spec);
        self
    }

    pub fn argv(mut self, position: u32, notes: impl Into<String>) -> Self {
        self.argv.insert(position, notes.into());
        self
    }

    /// The method-level declarations, layered over the class defaults.
    pub fn declarations(&self) -> Declarations {
        Declarations {
            options: self.options.clone(),
            argv: self.argv.clone(),
        }
    }
}

/// Ordered `(origin, class)` pairs handed to the assembler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataSet {
    entries: Vec<(Origin, ClassMetadata)>,
}

impl MetadataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, origin: Origin, class: ClassMetadata) -> &mut Self {
        self.entries.push((origin, class));
        self
    }

    pub fn add_system(&mut self, classes: impl IntoIterator<Item = ClassMetadata>) -> &mut Self {
        for class in classes {
            self.push(Origin::system(), class);
        }
        self
    }

    pub fn add_vendor(
        &mut self,
        vendor: &str,
        classes: impl IntoIterator<Item = ClassMetadata>,
    ) -> &mut Self {
        for class in classes {
            self.push(Origin::vendor(vendor), class);
        }
        self
    }

    pub fn add_domain(
        &mut self,
        domain: &str,
        classes: impl IntoIterator<Item = ClassMetadata>,
    ) -> &mut Self {
        for class in classes {
            self.push(Origin::domain(domain), class);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Origin, ClassMetadata)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
