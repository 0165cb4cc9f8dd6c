//! Remote persistence seam.
//!
//! The sync worker talks to storage only through [`RemoteStore`], so the
//! HTTP endpoint and the in-memory test double are interchangeable.

pub mod http;
pub mod memory;

pub use http::HttpRemoteStore;
pub use memory::MemoryRemoteStore;

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::snapshot::CharacterSnapshot;

/// A single-record remote store for the character snapshot.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the stored snapshot. `Ok(None)` means no prior character
    /// exists - the expected first-run condition, not an error.
    async fn load(&self) -> Result<Option<CharacterSnapshot>, RemoteError>;

    /// Replace the stored snapshot with `snapshot`.
    async fn save(&self, snapshot: &CharacterSnapshot) -> Result<(), RemoteError>;
}
