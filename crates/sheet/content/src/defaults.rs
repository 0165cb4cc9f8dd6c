//! Built-in ruleset: the classic class and skill tables.
//!
//! Used when no TOML tables are supplied. The numbers are the standard
//! ones: each class demands 14 in its prime attribute and 9 everywhere
//! else; the eighteen skills map to their usual governing attributes.

use sheet_core::{Attribute, ClassDefinition, Ruleset, SkillDefinition};

fn class(name: &str, prime: Attribute) -> ClassDefinition {
    let mut definition = ClassDefinition::new(name);
    for attribute in Attribute::all() {
        let minimum = if attribute == prime { 14 } else { 9 };
        definition = definition.require(attribute, minimum);
    }
    definition
}

/// The three built-in classes.
pub fn default_classes() -> Vec<ClassDefinition> {
    vec![
        class("Barbarian", Attribute::Strength),
        class("Wizard", Attribute::Intelligence),
        class("Bard", Attribute::Charisma),
    ]
}

/// The eighteen built-in skills with their governing attributes.
pub fn default_skills() -> Vec<SkillDefinition> {
    use Attribute::*;
    [
        ("Acrobatics", Dexterity),
        ("Animal Handling", Wisdom),
        ("Arcana", Intelligence),
        ("Athletics", Strength),
        ("Deception", Charisma),
        ("History", Intelligence),
        ("Insight", Wisdom),
        ("Intimidation", Charisma),
        ("Investigation", Intelligence),
        ("Medicine", Wisdom),
        ("Nature", Intelligence),
        ("Perception", Wisdom),
        ("Performance", Charisma),
        ("Persuasion", Charisma),
        ("Religion", Intelligence),
        ("Sleight of Hand", Dexterity),
        ("Stealth", Dexterity),
        ("Survival", Wisdom),
    ]
    .into_iter()
    .map(|(name, attribute)| SkillDefinition::new(name, attribute))
    .collect()
}

/// The complete built-in ruleset.
pub fn default_ruleset() -> Ruleset {
    Ruleset::new(default_classes(), default_skills())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_have_expected_sizes() {
        let ruleset = default_ruleset();
        assert_eq!(ruleset.classes().len(), 3);
        assert_eq!(ruleset.skills().len(), 18);
    }

    #[test]
    fn each_class_requires_fourteen_in_its_prime() {
        let ruleset = default_ruleset();
        let barbarian = ruleset.class("Barbarian").unwrap();
        assert_eq!(barbarian.requirements[&Attribute::Strength], 14);
        assert_eq!(barbarian.requirements[&Attribute::Wisdom], 9);

        let bard = ruleset.class("Bard").unwrap();
        assert_eq!(bard.requirements[&Attribute::Charisma], 14);
    }

    #[test]
    fn skills_resolve_their_attribute() {
        let ruleset = default_ruleset();
        assert_eq!(
            ruleset.skill("Sleight of Hand").unwrap().attribute,
            Attribute::Dexterity
        );
        assert!(ruleset.skill("Lockpicking").is_none());
    }
}
