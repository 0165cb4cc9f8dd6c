//! Sync worker: bridges the sheet worker to the remote store.
//!
//! # Lifecycle
//!
//! The worker issues exactly one load at startup. Until that load resolves
//! (snapshot, not-found, or failure) no save is dispatched - persisting
//! before then would overwrite a real remote record with transient default
//! state. Mutations that arrive in the meantime are coalesced into the
//! pending slot and flushed once the engine is Ready.
//!
//! # Coalescing
//!
//! Saves are full-state overwrites, so intermediate states may be skipped:
//! at most one save is in flight, and the newest snapshot always replaces
//! the pending slot. The last completed save therefore always reflects the
//! last mutation, regardless of how save completions interleave with new
//! mutations.
//!
//! Save failures are logged and dropped; local state stays authoritative
//! and the next mutation schedules another save.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::RemoteError;
use crate::events::SheetEvent;
use crate::remote::RemoteStore;
use crate::snapshot::CharacterSnapshot;
use crate::workers::sheet;

/// Sync engine lifecycle. Transitions are strictly forward:
/// Uninitialized -> Loading -> Ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    /// No load has been issued yet.
    Uninitialized,
    /// Exactly one load request is in flight.
    Loading,
    /// The load resolved; mutations may now trigger saves.
    Ready,
}

/// Commands that can be sent to the sync worker.
pub enum SyncCommand {
    /// Shutdown gracefully, flushing a trailing pending save.
    Shutdown,
}

/// Background worker that owns the sync state machine.
pub struct SyncWorker {
    remote: Arc<dyn RemoteStore>,
    event_rx: broadcast::Receiver<SheetEvent>,
    command_rx: mpsc::Receiver<SyncCommand>,
    sheet_tx: mpsc::Sender<sheet::Command>,

    state: SyncState,
    /// Newest snapshot not yet handed to a save. Single slot: a newer
    /// snapshot simply replaces an older unsent one.
    pending: Option<CharacterSnapshot>,
    /// Whether a save task is currently in flight.
    inflight: bool,
    /// Set when the event stream lagged and snapshots were lost; cleared by
    /// re-capturing the current state.
    lagged: bool,

    save_done_tx: mpsc::Sender<Result<(), RemoteError>>,
    save_done_rx: mpsc::Receiver<Result<(), RemoteError>>,
}

impl SyncWorker {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        event_rx: broadcast::Receiver<SheetEvent>,
        command_rx: mpsc::Receiver<SyncCommand>,
        sheet_tx: mpsc::Sender<sheet::Command>,
    ) -> Self {
        let (save_done_tx, save_done_rx) = mpsc::channel(1);
        Self {
            remote,
            event_rx,
            command_rx,
            sheet_tx,
            state: SyncState::Uninitialized,
            pending: None,
            inflight: false,
            lagged: false,
            save_done_tx,
            save_done_rx,
        }
    }

    /// Main worker loop: load once, then coalesce mutation snapshots into
    /// saves until shutdown.
    pub async fn run(mut self) {
        self.load().await;

        loop {
            tokio::select! {
                event = self.event_rx.recv() => {
                    match event {
                        Ok(SheetEvent::MutationApplied { snapshot }) => {
                            self.enqueue(snapshot);
                        }
                        Ok(SheetEvent::Hydrated) => {
                            // Our own load write-back; nothing to persist.
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!("Sync worker lagged {} events; resyncing from current state", skipped);
                            self.refresh_pending().await;
                            self.maybe_dispatch();
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            debug!("Event bus closed, shutting down sync worker");
                            break;
                        }
                    }
                }

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(SyncCommand::Shutdown) => {
                            info!("Shutdown command received");
                            break;
                        }
                        None => {
                            debug!("Sync command channel closed");
                            break;
                        }
                    }
                }

                Some(result) = self.save_done_rx.recv(), if self.inflight => {
                    self.complete_save(result);
                }
            }
        }

        self.finalize().await;
        info!("Sync worker stopped");
    }

    /// Issue the one-and-only load and hydrate the store from the result.
    ///
    /// Every outcome - snapshot, not-found, failure - moves the engine to
    /// Ready: the session proceeds with local defaults rather than blocking
    /// on an unreachable remote.
    async fn load(&mut self) {
        self.state = SyncState::Loading;

        match self.remote.load().await {
            Ok(Some(snapshot)) => {
                debug!("Remote snapshot loaded, hydrating store");
                let (reply_tx, reply_rx) = oneshot::channel();
                let sent = self
                    .sheet_tx
                    .send(sheet::Command::Hydrate {
                        patch: snapshot.into_patch(),
                        reply: reply_tx,
                    })
                    .await;
                match sent {
                    Ok(()) => {
                        if reply_rx.await.is_err() {
                            warn!("Sheet worker dropped hydrate reply");
                        } else {
                            info!("Character hydrated from remote store");
                        }
                    }
                    Err(_) => warn!("Sheet worker unavailable for hydration"),
                }
            }
            Ok(None) => {
                debug!("No prior character on remote; keeping defaults");
            }
            Err(e) => {
                warn!("Initial load failed, proceeding with defaults: {}", e);
            }
        }

        self.state = SyncState::Ready;
    }

    /// Put a snapshot in the single pending slot and dispatch if idle.
    fn enqueue(&mut self, snapshot: CharacterSnapshot) {
        self.pending = Some(snapshot);
        self.maybe_dispatch();
    }

    fn maybe_dispatch(&mut self) {
        if self.state != SyncState::Ready || self.inflight {
            return;
        }
        if let Some(snapshot) = self.pending.take() {
            self.dispatch(snapshot);
        }
    }

    /// Spawn one save task for `snapshot`. Completion comes back through
    /// `save_done_rx` so the worker keeps processing events meanwhile.
    fn dispatch(&mut self, snapshot: CharacterSnapshot) {
        self.inflight = true;
        let remote = Arc::clone(&self.remote);
        let done = self.save_done_tx.clone();
        tokio::spawn(async move {
            let result = remote.save(&snapshot).await;
            let _ = done.send(result).await;
        });
    }

    fn complete_save(&mut self, result: Result<(), RemoteError>) {
        self.inflight = false;
        match result {
            Ok(()) => debug!("Save completed"),
            Err(e) => warn!("Save failed (no retry, local state remains authoritative): {}", e),
        }
        // A newer snapshot may have arrived while this save was in flight.
        self.maybe_dispatch();
    }

    /// After event lag the newest snapshots are gone; re-capture the
    /// current state so the last-mutation-wins property still holds.
    async fn refresh_pending(&mut self) {
        let (reply_tx, reply_rx) = oneshot::channel();
        let sent = self
            .sheet_tx
            .send(sheet::Command::QuerySnapshot { reply: reply_tx })
            .await;
        if sent.is_ok()
            && let Ok(snapshot) = reply_rx.await
        {
            self.pending = Some(snapshot);
            self.lagged = false;
        }
    }

    /// Pull already-queued mutation events into the pending slot without
    /// waiting. A shutdown command can win the select over events that are
    /// sitting in the channel; the final flush must still reflect them.
    fn drain_events(&mut self) {
        loop {
            match self.event_rx.try_recv() {
                Ok(SheetEvent::MutationApplied { snapshot }) => {
                    self.pending = Some(snapshot);
                }
                Ok(SheetEvent::Hydrated) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!("Sync worker lagged {} events during shutdown", skipped);
                    self.lagged = true;
                }
                Err(_) => break,
            }
        }
    }

    /// Drain the in-flight save and flush the trailing pending snapshot.
    async fn finalize(&mut self) {
        self.drain_events();

        if self.inflight
            && let Some(result) = self.save_done_rx.recv().await
        {
            self.inflight = false;
            if let Err(e) = result {
                warn!("Save failed during shutdown: {}", e);
            }
        }

        // Events may have arrived while the in-flight save completed.
        self.drain_events();
        if self.lagged {
            self.refresh_pending().await;
        }

        if let Some(snapshot) = self.pending.take() {
            debug!("Flushing final pending snapshot");
            if let Err(e) = self.remote.save(&snapshot).await {
                warn!("Final save failed: {}", e);
            }
        }
    }
}
