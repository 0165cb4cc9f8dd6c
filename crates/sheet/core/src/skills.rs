//! Skill definitions and the ruleset bundle.

use serde::{Deserialize, Serialize};

use crate::attributes::Attribute;
use crate::classes::ClassDefinition;

/// A named skill and the attribute whose modifier feeds its total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub name: String,
    pub attribute: Attribute,
}

impl SkillDefinition {
    pub fn new(name: impl Into<String>, attribute: Attribute) -> Self {
        Self {
            name: name.into(),
            attribute,
        }
    }
}

/// The static rules content a sheet is built against: the class table and
/// the skill table. Immutable once constructed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ruleset {
    classes: Vec<ClassDefinition>,
    skills: Vec<SkillDefinition>,
}

impl Ruleset {
    pub fn new(classes: Vec<ClassDefinition>, skills: Vec<SkillDefinition>) -> Self {
        Self { classes, skills }
    }

    pub fn classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    pub fn skills(&self) -> &[SkillDefinition] {
        &self.skills
    }

    pub fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|class| class.name == name)
    }

    pub fn skill(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|skill| skill.name == name)
    }
}
