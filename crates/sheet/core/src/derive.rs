//! Derived values - everything the sheet displays besides raw scores.
//!
//! Pure functions of an [`AttributeSet`] / [`SkillAllocation`] snapshot.
//! Nothing here is stored, nothing has side effects, nothing can fail;
//! values are recomputed whenever they are needed.

use crate::attributes::{Attribute, AttributeSet};
use crate::character::SkillAllocation;
use crate::classes::ClassDefinition;
use crate::config::SheetConfig;
use crate::skills::SkillDefinition;

/// Ability modifier for a score: `floor((score - 10) / 2)`.
///
/// Exact floor division, so 8 maps to -1 and 7 maps to -2. Defined for all
/// integers; there is no error case.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Sum of all six attribute scores.
pub fn total_attribute_points(set: &AttributeSet) -> i32 {
    Attribute::all().map(|attribute| set.score(attribute)).sum()
}

/// Whether `set` satisfies every minimum in the class's requirement map.
///
/// Attributes the class does not list impose no constraint, so an empty
/// requirement map is trivially satisfied.
pub fn meets_class_requirements(set: &AttributeSet, class: &ClassDefinition) -> bool {
    class
        .requirements
        .iter()
        .all(|(&attribute, &minimum)| set.score(attribute) >= minimum)
}

/// Skill points available to allocate, floored at zero.
///
/// `base + per_modifier × modifier(Intelligence)` with the configured
/// defaults of 10 and 4.
pub fn available_skill_points(set: &AttributeSet, config: &SheetConfig) -> i32 {
    let budget = config.base_skill_points
        + config.skill_points_per_modifier * ability_modifier(set.intelligence);
    budget.max(0)
}

/// Sum of all manually allocated skill points.
pub fn used_skill_points(allocation: &SkillAllocation) -> i32 {
    allocation.used()
}

/// Unallocated skill points remaining under the budget.
pub fn remaining_skill_points(
    set: &AttributeSet,
    allocation: &SkillAllocation,
    config: &SheetConfig,
) -> i32 {
    available_skill_points(set, config) - used_skill_points(allocation)
}

/// Displayed total for one skill: governing attribute's modifier plus the
/// points allocated to it (zero if the skill has no allocation).
pub fn skill_total(
    set: &AttributeSet,
    allocation: &SkillAllocation,
    skill: &SkillDefinition,
) -> i32 {
    ability_modifier(set.score(skill.attribute)) + allocation.points(&skill.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_modifier_is_floor_division() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(12), 1);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(7), -2);
        assert_eq!(ability_modifier(20), 5);
        assert_eq!(ability_modifier(1), -5);
    }

    #[test]
    fn total_points_sums_all_six() {
        let mut set = AttributeSet::default();
        assert_eq!(total_attribute_points(&set), 60);
        set.strength = 14;
        assert_eq!(total_attribute_points(&set), 64);
    }

    #[test]
    fn empty_requirements_always_qualify() {
        let class = ClassDefinition::new("Commoner");
        assert!(meets_class_requirements(&AttributeSet::uniform(1), &class));
    }

    #[test]
    fn requirements_check_listed_attributes_only() {
        let class = ClassDefinition::new("Barbarian").require(Attribute::Strength, 14);

        let mut set = AttributeSet::uniform(1);
        set.strength = 14;
        assert!(meets_class_requirements(&set, &class));

        set.strength = 13;
        assert!(!meets_class_requirements(&set, &class));
    }

    #[test]
    fn skill_budget_scales_with_intelligence() {
        let config = SheetConfig::default();

        let mut set = AttributeSet::default();
        assert_eq!(available_skill_points(&set, &config), 10);

        set.intelligence = 18;
        assert_eq!(available_skill_points(&set, &config), 26);

        // Modifier -5 would give -10; the budget floors at zero.
        set.intelligence = 1;
        assert_eq!(available_skill_points(&set, &config), 0);
    }

    #[test]
    fn skill_total_combines_modifier_and_allocation() {
        let config = SheetConfig::default();
        let skill = SkillDefinition::new("Stealth", Attribute::Dexterity);

        let mut set = AttributeSet::default();
        set.dexterity = 14;

        let mut allocation = SkillAllocation::default();
        assert_eq!(skill_total(&set, &allocation, &skill), 2);

        allocation.set("Stealth", 3);
        assert_eq!(skill_total(&set, &allocation, &skill), 5);
        assert_eq!(remaining_skill_points(&set, &allocation, &config), 7);
    }
}
