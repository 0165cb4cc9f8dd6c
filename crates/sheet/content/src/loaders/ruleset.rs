//! Ruleset loader: class and skill tables from TOML.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use sheet_core::{Attribute, ClassDefinition, Ruleset, SkillDefinition};

use crate::loaders::{LoadResult, read_file};

/// On-disk shape of a ruleset table.
///
/// ```toml
/// [classes.Barbarian]
/// Strength = 14
///
/// [[skills]]
/// name = "Stealth"
/// attribute = "Dexterity"
/// ```
#[derive(Debug, Deserialize)]
struct RulesetSpec {
    #[serde(default)]
    classes: BTreeMap<String, BTreeMap<String, i32>>,
    #[serde(default)]
    skills: Vec<SkillSpec>,
}

#[derive(Debug, Deserialize)]
struct SkillSpec {
    name: String,
    attribute: String,
}

/// Loader for ruleset tables from TOML files.
pub struct RulesetLoader;

impl RulesetLoader {
    /// Load a complete ruleset from a TOML file.
    pub fn load(path: &Path) -> LoadResult<Ruleset> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a ruleset from TOML text.
    pub fn parse(content: &str) -> LoadResult<Ruleset> {
        let spec: RulesetSpec = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ruleset TOML: {}", e))?;

        let mut classes = Vec::with_capacity(spec.classes.len());
        for (name, requirements) in spec.classes {
            let mut definition = ClassDefinition::new(&name);
            for (attribute, minimum) in requirements {
                let attribute = parse_attribute(&attribute)
                    .map_err(|e| anyhow::anyhow!("class '{}': {}", name, e))?;
                definition = definition.require(attribute, minimum);
            }
            classes.push(definition);
        }

        let mut skills = Vec::with_capacity(spec.skills.len());
        let mut seen = BTreeSet::new();
        for skill in spec.skills {
            if !seen.insert(skill.name.clone()) {
                anyhow::bail!("duplicate skill '{}'", skill.name);
            }
            let attribute = parse_attribute(&skill.attribute)
                .map_err(|e| anyhow::anyhow!("skill '{}': {}", skill.name, e))?;
            skills.push(SkillDefinition::new(skill.name, attribute));
        }

        Ok(Ruleset::new(classes, skills))
    }
}

fn parse_attribute(name: &str) -> LoadResult<Attribute> {
    Attribute::from_str(name).map_err(|_| anyhow::anyhow!("unknown attribute '{}'", name))
}
