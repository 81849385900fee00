//! Provenance views derived alongside the command table.

use super::spec::Provenance;
use crate::metadata::Tier;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Command names grouped by where they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvenanceIndex {
    system: BTreeSet<String>,
    vendors: BTreeMap<String, BTreeSet<String>>,
    domains: BTreeMap<String, BTreeSet<String>>,
}

impl ProvenanceIndex {
    pub(crate) fn record(&mut self, name: &str, provenance: &Provenance) {
        match provenance.tier {
            Tier::System => {
                self.system.insert(name.to_string());
            }
            Tier::Vendor => {
                self.vendors
                    .entry(provenance.origin_id.clone())
                    .or_default()
                    .insert(name.to_string());
            }
            Tier::Domain => {
                self.domains
                    .entry(provenance.origin_id.clone())
                    .or_default()
                    .insert(name.to_string());
            }
        }
    }

    /// Names of all built-in commands.
    pub fn system(&self) -> &BTreeSet<String> {
        &self.system
    }

    /// Vendor id → names registered by that vendor.
    pub fn vendors(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.vendors
    }

    /// Domain name → names registered by that domain.
    pub fn domains(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.domains
    }

    pub fn vendor(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.vendors.get(id)
    }

    pub fn domain(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.domains.get(name)
    }
}
