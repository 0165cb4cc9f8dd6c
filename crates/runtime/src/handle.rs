//! Cloneable facade for issuing commands to the runtime.
//!
//! [`SheetHandle`] hides channel plumbing and offers async helpers for the
//! mutation contract and for reading the current state. This is the full
//! coupling surface a presentation layer gets: forward intents, read
//! snapshots, subscribe to events.

use tokio::sync::{broadcast, mpsc, oneshot};

use sheet_core::{Attribute, Character, Mutation};

use crate::error::{Result, SyncError};
use crate::events::{EventBus, SheetEvent};
use crate::snapshot::CharacterSnapshot;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct SheetHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SheetHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Raise an attribute by one point, subject to the total point cap.
    pub async fn increment_attribute(&self, attribute: Attribute) -> Result<Mutation> {
        self.send_mutation(|reply| Command::IncrementAttribute { attribute, reply })
            .await
    }

    /// Lower an attribute by one point, subject to the per-score floor.
    pub async fn decrement_attribute(&self, attribute: Attribute) -> Result<Mutation> {
        self.send_mutation(|reply| Command::DecrementAttribute { attribute, reply })
            .await
    }

    /// Toggle class selection.
    pub async fn select_class(&self, name: impl Into<String>) -> Result<Mutation> {
        let name = name.into();
        self.send_mutation(|reply| Command::SelectClass { name, reply })
            .await
    }

    /// Allocate one skill point, subject to the Intelligence-derived budget.
    pub async fn increment_skill(&self, name: impl Into<String>) -> Result<Mutation> {
        let name = name.into();
        self.send_mutation(|reply| Command::IncrementSkill { name, reply })
            .await
    }

    /// Remove one skill point, floored at zero.
    pub async fn decrement_skill(&self, name: impl Into<String>) -> Result<Mutation> {
        let name = name.into();
        self.send_mutation(|reply| Command::DecrementSkill { name, reply })
            .await
    }

    /// Read the current character (clone of the authoritative state).
    pub async fn character(&self) -> Result<Character> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::QueryCharacter { reply: reply_tx })
            .await
            .map_err(|_| SyncError::CommandChannelClosed)?;
        reply_rx.await.map_err(SyncError::ReplyChannelClosed)
    }

    /// Capture a snapshot of the current state.
    pub async fn snapshot(&self) -> Result<CharacterSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::QuerySnapshot { reply: reply_tx })
            .await
            .map_err(|_| SyncError::CommandChannelClosed)?;
        reply_rx.await.map_err(SyncError::ReplyChannelClosed)
    }

    /// Subscribe to sheet events.
    pub fn subscribe(&self) -> broadcast::Receiver<SheetEvent> {
        self.event_bus.subscribe()
    }

    async fn send_mutation(
        &self,
        make: impl FnOnce(oneshot::Sender<Mutation>) -> Command,
    ) -> Result<Mutation> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| SyncError::CommandChannelClosed)?;
        reply_rx.await.map_err(SyncError::ReplyChannelClosed)
    }
}
