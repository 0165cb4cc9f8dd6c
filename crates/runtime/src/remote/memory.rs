//! In-memory RemoteStore implementation for tests and local runs.

use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::remote::RemoteStore;
use crate::snapshot::CharacterSnapshot;

/// Single-slot in-memory store.
///
/// Holds at most one snapshot, mirroring the remote endpoint's single
/// fixed-URL record. Counts saves so tests can assert dispatch behavior.
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    slot: RwLock<Option<CharacterSnapshot>>,
    save_count: AtomicUsize,
}

impl MemoryRemoteStore {
    /// Create an empty store (loads report not-found).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a snapshot.
    pub fn with_snapshot(snapshot: CharacterSnapshot) -> Self {
        Self {
            slot: RwLock::new(Some(snapshot)),
            save_count: AtomicUsize::new(0),
        }
    }

    /// The currently stored snapshot, if any.
    pub fn stored(&self) -> Option<CharacterSnapshot> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }

    /// How many saves have completed against this store.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn load(&self) -> Result<Option<CharacterSnapshot>, RemoteError> {
        let slot = self
            .slot
            .read()
            .map_err(|_| RemoteError::Transport("lock poisoned".to_string()))?;
        Ok(slot.clone())
    }

    async fn save(&self, snapshot: &CharacterSnapshot) -> Result<(), RemoteError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| RemoteError::Transport("lock poisoned".to_string()))?;
        *slot = Some(snapshot.clone());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
