//! The six core attributes and their score set.
//!
//! Attribute scores are the Single Source of Truth for the sheet: every
//! other number the sheet shows (modifiers, budgets, skill totals) is
//! derived from them and never stored.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The six attributes that define a character.
///
/// - **Strength**: physical power
/// - **Dexterity**: agility and reflexes
/// - **Constitution**: endurance and resilience
/// - **Intelligence**: reasoning and memory (drives the skill-point budget)
/// - **Wisdom**: perception and insight
/// - **Charisma**: force of personality
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Attribute {
    /// All six attributes in canonical display order.
    pub fn all() -> impl Iterator<Item = Attribute> {
        Attribute::iter()
    }
}

/// One score per attribute.
///
/// Scores are permanently stored; everything else is recomputed. Mutation
/// goes through the validated increment/decrement on
/// [`crate::store::CharacterStore`], which enforces the per-score floor and
/// the total point cap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeSet {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AttributeSet {
    /// Create a set with every score at `score`.
    pub fn uniform(score: i32) -> Self {
        Self {
            strength: score,
            dexterity: score,
            constitution: score,
            intelligence: score,
            wisdom: score,
            charisma: score,
        }
    }

    /// Read the score for one attribute.
    pub fn score(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    /// Mutable access to one score.
    pub fn score_mut(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
        }
    }

    /// Iterate `(attribute, score)` pairs in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::all().map(|attribute| (attribute, self.score(attribute)))
    }
}

impl Default for AttributeSet {
    /// Default scores: all 10 (an unremarkable adventurer).
    fn default() -> Self {
        Self::uniform(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scores_are_all_ten() {
        let set = AttributeSet::default();
        for (_, score) in set.entries() {
            assert_eq!(score, 10);
        }
    }

    #[test]
    fn score_accessors_agree_with_fields() {
        let mut set = AttributeSet::default();
        *set.score_mut(Attribute::Intelligence) = 14;
        assert_eq!(set.intelligence, 14);
        assert_eq!(set.score(Attribute::Intelligence), 14);
    }

    #[test]
    fn serializes_with_attribute_names() {
        let set = AttributeSet::default();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["Strength"], 10);
        assert_eq!(json["Charisma"], 10);
    }

    #[test]
    fn attribute_parses_from_name() {
        use std::str::FromStr;
        assert_eq!(Attribute::from_str("Wisdom").unwrap(), Attribute::Wisdom);
        assert!(Attribute::from_str("Luck").is_err());
    }
}
