//! Wire-format character snapshot.
//!
//! A snapshot is the full serializable state of the character at one
//! instant: attribute scores, selected class, skill allocation, and the
//! capture timestamp. Saves always send a complete snapshot as an
//! idempotent replacement of the remote record; loads tolerate partial
//! bodies and an optional `{"body": ...}` envelope around them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use sheet_core::{Attribute, Character, CharacterPatch};

use crate::error::RemoteError;

/// Serialized character state.
///
/// Every field is optional on load; each present field independently
/// overwrites its part of the character on hydration. `selected_class`
/// is doubly optional so `"selectedClass": null` (clear the selection) is
/// distinguishable from the field being absent (leave it alone).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<Attribute, i32>>,

    #[serde(
        rename = "selectedClass",
        default,
        deserialize_with = "present_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_class: Option<Option<String>>,

    #[serde(rename = "skillPoints", default, skip_serializing_if = "Option::is_none")]
    pub skill_points: Option<BTreeMap<String, i32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl CharacterSnapshot {
    /// Capture the full current state, stamped with the capture time.
    pub fn capture(character: &Character) -> Self {
        Self {
            attributes: Some(character.attributes.entries().collect()),
            selected_class: Some(character.selected_class.clone()),
            skill_points: Some(
                character
                    .skills
                    .iter()
                    .map(|(name, points)| (name.to_string(), points))
                    .collect(),
            ),
            timestamp: Some(Utc::now()),
        }
    }

    /// Parse a snapshot from a response body.
    ///
    /// Accepts a bare snapshot object or an envelope whose `body` field
    /// holds the snapshot either as a nested object or as a JSON string.
    pub fn from_body(text: &str) -> Result<Self, RemoteError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| RemoteError::Malformed(e.to_string()))?;
        let value = unwrap_envelope(value)?;
        serde_json::from_value(value).map_err(|e| RemoteError::Malformed(e.to_string()))
    }

    /// Convert into the partial replacement applied to the store.
    pub fn into_patch(self) -> CharacterPatch {
        CharacterPatch {
            attributes: self.attributes,
            selected_class: self.selected_class,
            skill_points: self.skill_points,
        }
    }
}

/// Peel one optional `{"body": ...}` envelope off a loaded value.
fn unwrap_envelope(value: Value) -> Result<Value, RemoteError> {
    match value {
        Value::Object(mut map) => {
            if let Some(body) = map.remove("body") {
                match body {
                    Value::String(inner) => serde_json::from_str(&inner)
                        .map_err(|e| RemoteError::Malformed(format!("envelope body: {}", e))),
                    other => Ok(other),
                }
            } else {
                Ok(Value::Object(map))
            }
        }
        other => Ok(other),
    }
}

/// Maps an absent field to `None` and a present (possibly null) field to
/// `Some(...)`, which `#[serde(default)]` alone cannot distinguish.
fn present_or_absent<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::{CharacterStore, SheetConfig};

    fn sample_character() -> Character {
        let mut store = CharacterStore::new(sheet_content::default_ruleset(), SheetConfig::default());
        store.increment_attribute(Attribute::Intelligence);
        store.select_class("Wizard");
        store.increment_skill("Arcana");
        store.character().clone()
    }

    #[test]
    fn capture_uses_wire_field_names() {
        let snapshot = CharacterSnapshot::capture(&sample_character());
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["attributes"]["Intelligence"], 11);
        assert_eq!(json["selectedClass"], "Wizard");
        assert_eq!(json["skillPoints"]["Arcana"], 1);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn capture_serializes_empty_selection_as_null() {
        let snapshot = CharacterSnapshot::capture(&Character::default());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["selectedClass"].is_null());
    }

    #[test]
    fn bare_object_parses() {
        let snapshot =
            CharacterSnapshot::from_body(r#"{"attributes": {"Strength": 12}}"#).unwrap();
        let patch = snapshot.into_patch();
        assert_eq!(patch.attributes.unwrap()[&Attribute::Strength], 12);
        // Absent fields hydrate nothing.
        assert_eq!(patch.selected_class, None);
        assert_eq!(patch.skill_points, None);
    }

    #[test]
    fn object_envelope_parses() {
        let snapshot = CharacterSnapshot::from_body(
            r#"{"body": {"selectedClass": "Bard", "skillPoints": {"Deception": 2}}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.selected_class, Some(Some("Bard".to_string())));
        assert_eq!(snapshot.skill_points.unwrap()["Deception"], 2);
    }

    #[test]
    fn string_envelope_parses() {
        let snapshot = CharacterSnapshot::from_body(
            r#"{"body": "{\"selectedClass\": null}"}"#,
        )
        .unwrap();
        // Present null means "clear the selection" on hydration.
        assert_eq!(snapshot.selected_class, Some(None));
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        assert!(matches!(
            CharacterSnapshot::from_body("not json"),
            Err(RemoteError::Malformed(_))
        ));
        assert!(matches!(
            CharacterSnapshot::from_body(r#"{"attributes": {"Luck": 3}}"#),
            Err(RemoteError::Malformed(_))
        ));
        assert!(matches!(
            CharacterSnapshot::from_body(r#"{"body": "{broken"}"#),
            Err(RemoteError::Malformed(_))
        ));
    }

    #[test]
    fn save_then_load_reproduces_the_character() {
        let character = sample_character();
        let body = serde_json::to_string(&CharacterSnapshot::capture(&character)).unwrap();
        let snapshot = CharacterSnapshot::from_body(&body).unwrap();

        let mut store =
            CharacterStore::new(sheet_content::default_ruleset(), SheetConfig::default());
        store.hydrate(snapshot.into_patch());
        assert_eq!(store.character(), &character);
    }
}
