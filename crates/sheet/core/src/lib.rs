//! Deterministic character-sheet rules and data types.
//!
//! `sheet-core` defines the canonical model (attributes, classes, skills,
//! the character aggregate) and exposes pure APIs reused by the runtime and
//! offline tools. All state mutation flows through
//! [`store::CharacterStore`], and supporting crates depend on the types
//! re-exported here.
pub mod attributes;
pub mod character;
pub mod classes;
pub mod config;
pub mod derive;
pub mod skills;
pub mod store;

pub use attributes::{Attribute, AttributeSet};
pub use character::{Character, SkillAllocation};
pub use classes::ClassDefinition;
pub use config::SheetConfig;
pub use skills::{Ruleset, SkillDefinition};
pub use store::{CharacterPatch, CharacterStore, Mutation};
