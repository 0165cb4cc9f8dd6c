//! The character store: validated mutation of the aggregate.
//!
//! All state mutation flows through the methods here. Every budget check
//! reads the state as it is at call time; a rejected mutation leaves the
//! character untouched and reports [`Mutation::Rejected`] rather than an
//! error, so a no-op is observable but never fatal.

use std::collections::BTreeMap;

use crate::attributes::{Attribute, AttributeSet};
use crate::character::{Character, SkillAllocation};
use crate::config::SheetConfig;
use crate::derive;
use crate::skills::Ruleset;

/// Outcome of one mutation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// The state changed.
    Applied,
    /// A budget or floor check failed; the state is unchanged.
    Rejected,
}

impl Mutation {
    pub fn applied(self) -> bool {
        matches!(self, Mutation::Applied)
    }
}

/// Partial replacement written by the sync layer after a remote load.
///
/// Each field is independently optional: `None` leaves the corresponding
/// part of the character untouched. `selected_class` distinguishes "field
/// absent" (`None`) from "field present and null" (`Some(None)`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterPatch {
    pub attributes: Option<BTreeMap<Attribute, i32>>,
    pub selected_class: Option<Option<String>>,
    pub skill_points: Option<BTreeMap<String, i32>>,
}

/// Owner of the authoritative in-memory [`Character`].
#[derive(Debug)]
pub struct CharacterStore {
    character: Character,
    ruleset: Ruleset,
    config: SheetConfig,
}

impl CharacterStore {
    /// Create a store with a default character under the given rules.
    pub fn new(ruleset: Ruleset, config: SheetConfig) -> Self {
        Self {
            character: Character::default(),
            ruleset,
            config,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.character.attributes
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Raise an attribute by one, unless the total is already at the cap.
    ///
    /// The cap is checked against the current total across all six scores,
    /// not per attribute: once the pool is spent, every increment is
    /// rejected until a decrement elsewhere frees capacity.
    pub fn increment_attribute(&mut self, attribute: Attribute) -> Mutation {
        let total = derive::total_attribute_points(&self.character.attributes);
        if total >= self.config.attribute_point_cap {
            return Mutation::Rejected;
        }
        *self.character.attributes.score_mut(attribute) += 1;
        Mutation::Applied
    }

    /// Lower an attribute by one, unless it is already at the floor.
    pub fn decrement_attribute(&mut self, attribute: Attribute) -> Mutation {
        if self.character.attributes.score(attribute) <= self.config.min_score {
            return Mutation::Rejected;
        }
        *self.character.attributes.score_mut(attribute) -= 1;
        Mutation::Applied
    }

    /// Toggle class selection: selecting the current class deselects it,
    /// selecting another replaces it.
    ///
    /// Eligibility is deliberately not checked here - a user may select a
    /// class to study requirements they do not yet meet. Names missing from
    /// the ruleset are rejected.
    pub fn select_class(&mut self, name: &str) -> Mutation {
        if self.ruleset.class(name).is_none() {
            return Mutation::Rejected;
        }
        if self.character.selected_class.as_deref() == Some(name) {
            self.character.selected_class = None;
        } else {
            self.character.selected_class = Some(name.to_string());
        }
        Mutation::Applied
    }

    /// Allocate one point to a skill, unless the budget is exhausted or the
    /// skill is not in the ruleset.
    pub fn increment_skill(&mut self, name: &str) -> Mutation {
        if self.ruleset.skill(name).is_none() {
            return Mutation::Rejected;
        }
        let remaining = derive::remaining_skill_points(
            &self.character.attributes,
            &self.character.skills,
            &self.config,
        );
        if remaining <= 0 {
            return Mutation::Rejected;
        }
        let points = self.character.skills.points(name);
        self.character.skills.set(name, points + 1);
        Mutation::Applied
    }

    /// Remove one point from a skill, floored at zero.
    pub fn decrement_skill(&mut self, name: &str) -> Mutation {
        let points = self.character.skills.points(name);
        if points == 0 {
            return Mutation::Rejected;
        }
        self.character.skills.set(name, points - 1);
        Mutation::Applied
    }

    /// Full replacement from a remote snapshot; only the fields present in
    /// the patch are overwritten. Used exactly once, by the sync engine,
    /// when the initial load resolves with a body.
    pub fn hydrate(&mut self, patch: CharacterPatch) {
        if let Some(scores) = patch.attributes {
            for (attribute, score) in scores {
                *self.character.attributes.score_mut(attribute) = score;
            }
        }
        if let Some(selected) = patch.selected_class {
            self.character.selected_class = selected;
        }
        if let Some(points) = patch.skill_points {
            self.character.skills = SkillAllocation::from(points);
        }
    }
}
