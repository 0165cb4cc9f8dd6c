//! Broadcast event bus between the sheet worker and its observers.

use tokio::sync::broadcast;

use crate::snapshot::CharacterSnapshot;

/// Events published by the sheet worker.
#[derive(Debug, Clone)]
pub enum SheetEvent {
    /// A mutation was accepted; the snapshot captures the state right after
    /// it was applied. The sync worker coalesces these into saves.
    MutationApplied { snapshot: CharacterSnapshot },

    /// The store was hydrated from the remote record. Informational; never
    /// triggers a save.
    Hydrated,
}

/// Thin wrapper around a broadcast channel.
///
/// Publishing is best-effort: with no subscribers the send fails, which is
/// normal and only traced.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SheetEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: SheetEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("No subscribers for sheet event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SheetEvent> {
        self.tx.subscribe()
    }
}
