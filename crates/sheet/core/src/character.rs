//! The character aggregate and its skill-point allocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeSet;

/// Manually allocated skill points, keyed by skill name.
///
/// Skills without an entry are at zero; entries never hold zero or negative
/// values (the store removes an entry when its points drop to zero).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillAllocation {
    points: BTreeMap<String, i32>,
}

impl SkillAllocation {
    /// Points allocated to `skill`, zero if absent.
    pub fn points(&self, skill: &str) -> i32 {
        self.points.get(skill).copied().unwrap_or(0)
    }

    /// Total points allocated across all skills.
    pub fn used(&self) -> i32 {
        self.points.values().sum()
    }

    /// Set the allocation for one skill. Values at or below zero remove the
    /// entry, preserving the absent-means-zero representation.
    pub fn set(&mut self, skill: &str, points: i32) {
        if points <= 0 {
            self.points.remove(skill);
        } else {
            self.points.insert(skill.to_string(), points);
        }
    }

    /// Iterate `(skill, points)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.points.iter().map(|(name, &points)| (name.as_str(), points))
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<BTreeMap<String, i32>> for SkillAllocation {
    fn from(points: BTreeMap<String, i32>) -> Self {
        let mut allocation = SkillAllocation::default();
        for (skill, value) in points {
            allocation.set(&skill, value);
        }
        allocation
    }
}

/// The aggregate root: attributes, selected class, skill allocation.
///
/// Constructed with defaults at startup, owned exclusively by
/// [`crate::store::CharacterStore`], and alive for the whole session. The
/// sync layer only reads snapshots of it and writes full replacements on
/// load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub attributes: AttributeSet,
    pub selected_class: Option<String>,
    pub skills: SkillAllocation,
}
