//! Sheet worker that owns the authoritative [`sheet_core::CharacterStore`].
//!
//! Receives commands from [`crate::handle::SheetHandle`], applies validated
//! mutations, and publishes an event with a fresh snapshot after every
//! accepted one. Because a single task owns the store, each mutation's
//! validation and write are atomic relative to every other mutation.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use sheet_core::{Attribute, Character, CharacterPatch, CharacterStore, Mutation};

use crate::events::{EventBus, SheetEvent};
use crate::snapshot::CharacterSnapshot;

/// Commands that can be sent to the sheet worker.
pub enum Command {
    IncrementAttribute {
        attribute: Attribute,
        reply: oneshot::Sender<Mutation>,
    },
    DecrementAttribute {
        attribute: Attribute,
        reply: oneshot::Sender<Mutation>,
    },
    SelectClass {
        name: String,
        reply: oneshot::Sender<Mutation>,
    },
    IncrementSkill {
        name: String,
        reply: oneshot::Sender<Mutation>,
    },
    DecrementSkill {
        name: String,
        reply: oneshot::Sender<Mutation>,
    },
    /// Full-replacement write from the sync worker after the remote load.
    Hydrate {
        patch: CharacterPatch,
        reply: oneshot::Sender<()>,
    },
    /// Read the current character (read-only clone).
    QueryCharacter { reply: oneshot::Sender<Character> },
    /// Capture a snapshot of the current state.
    QuerySnapshot {
        reply: oneshot::Sender<CharacterSnapshot>,
    },
}

/// Background task that processes sheet commands.
pub struct SheetWorker {
    store: CharacterStore,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SheetWorker {
    pub fn new(store: CharacterStore, command_rx: mpsc::Receiver<Command>, event_bus: EventBus) -> Self {
        Self {
            store,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every command sender is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("Sheet worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::IncrementAttribute { attribute, reply } => {
                let outcome = self.store.increment_attribute(attribute);
                self.publish_if_applied(outcome);
                let _ = reply.send(outcome);
            }
            Command::DecrementAttribute { attribute, reply } => {
                let outcome = self.store.decrement_attribute(attribute);
                self.publish_if_applied(outcome);
                let _ = reply.send(outcome);
            }
            Command::SelectClass { name, reply } => {
                let outcome = self.store.select_class(&name);
                self.publish_if_applied(outcome);
                let _ = reply.send(outcome);
            }
            Command::IncrementSkill { name, reply } => {
                let outcome = self.store.increment_skill(&name);
                self.publish_if_applied(outcome);
                let _ = reply.send(outcome);
            }
            Command::DecrementSkill { name, reply } => {
                let outcome = self.store.decrement_skill(&name);
                self.publish_if_applied(outcome);
                let _ = reply.send(outcome);
            }
            Command::Hydrate { patch, reply } => {
                self.store.hydrate(patch);
                self.event_bus.publish(SheetEvent::Hydrated);
                let _ = reply.send(());
            }
            Command::QueryCharacter { reply } => {
                let _ = reply.send(self.store.character().clone());
            }
            Command::QuerySnapshot { reply } => {
                let _ = reply.send(CharacterSnapshot::capture(self.store.character()));
            }
        }
    }

    /// Rejected mutations are silent no-ops; only applied ones produce a
    /// snapshot for the sync worker.
    fn publish_if_applied(&self, outcome: Mutation) {
        if outcome.applied() {
            self.event_bus.publish(SheetEvent::MutationApplied {
                snapshot: CharacterSnapshot::capture(self.store.character()),
            });
        }
    }
}
