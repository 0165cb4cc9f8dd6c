//! Class definitions: named roles with minimum attribute requirements.
//!
//! Classes are static content. They are loaded once (built-in defaults or a
//! TOML table) and consumed read-only; nothing in the engine mutates them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attributes::Attribute;

/// A named class and the minimum score it demands per attribute.
///
/// Attributes absent from `requirements` impose no constraint; an empty map
/// means any character qualifies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    pub requirements: BTreeMap<Attribute, i32>,
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirements: BTreeMap::new(),
        }
    }

    /// Builder-style requirement entry.
    pub fn require(mut self, attribute: Attribute, minimum: i32) -> Self {
        self.requirements.insert(attribute, minimum);
        self
    }
}
