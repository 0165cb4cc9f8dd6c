//! Content loaders for reading ruleset tables from files.
//!
//! Loaders convert TOML tables into [`sheet_core::Ruleset`] content. They
//! validate attribute names and reject duplicates at load time so the rest
//! of the engine can treat the ruleset as trusted.

pub mod ruleset;

pub use ruleset::RulesetLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
