//! Static ruleset content and loaders.
//!
//! This crate houses the built-in class and skill tables and provides TOML
//! loaders for custom ones. Content is consumed read-only by the store and
//! the derivation functions and never appears in character state.

pub mod defaults;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use defaults::{default_classes, default_ruleset, default_skills};

#[cfg(feature = "loaders")]
pub use loaders::RulesetLoader;
