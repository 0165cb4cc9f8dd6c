//! High-level runtime orchestrator.
//!
//! The runtime owns the background workers, wires up command/event
//! channels, and exposes a builder-based API for clients to drive the
//! sheet.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use sheet_core::{CharacterStore, Ruleset, SheetConfig};

use crate::error::{Result, SyncError};
use crate::events::EventBus;
use crate::handle::SheetHandle;
use crate::remote::RemoteStore;
use crate::workers::{Command, SheetWorker, SyncCommand, SyncWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub sheet_config: SheetConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sheet_config: SheetConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the sheet and sync workers.
///
/// Design: the runtime owns workers and coordinates shutdown.
/// [`SheetHandle`] provides a cloneable facade for clients.
pub struct SheetRuntime {
    handle: SheetHandle,
    sync_command_tx: mpsc::Sender<SyncCommand>,
    sheet_worker_handle: JoinHandle<()>,
    sync_worker_handle: JoinHandle<()>,
}

impl SheetRuntime {
    /// Create a new runtime builder.
    pub fn builder() -> SheetRuntimeBuilder {
        SheetRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> SheetHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// The sync worker drains its in-flight save and flushes any trailing
    /// pending snapshot before exiting. Any handle clones still held
    /// elsewhere must be dropped for the sheet worker to stop.
    pub async fn shutdown(self) -> Result<()> {
        if self.sync_command_tx.send(SyncCommand::Shutdown).await.is_err() {
            tracing::debug!("Sync worker already stopped");
        }
        self.sync_worker_handle
            .await
            .map_err(SyncError::WorkerJoin)?;

        drop(self.handle);
        self.sheet_worker_handle
            .await
            .map_err(SyncError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`SheetRuntime`] with flexible configuration.
pub struct SheetRuntimeBuilder {
    config: RuntimeConfig,
    ruleset: Option<Ruleset>,
    remote: Option<Arc<dyn RemoteStore>>,
}

impl SheetRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            ruleset: None,
            remote: None,
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the ruleset (class/skill tables). Defaults to the built-in
    /// tables from `sheet-content`.
    pub fn ruleset(mut self, ruleset: Ruleset) -> Self {
        self.ruleset = Some(ruleset);
        self
    }

    /// Set the required remote store.
    pub fn remote_store(mut self, remote: impl RemoteStore + 'static) -> Self {
        self.remote = Some(Arc::new(remote));
        self
    }

    /// Set the required remote store from a shared handle, so the caller
    /// can keep inspecting it (tests use this with the in-memory store).
    pub fn shared_remote_store(mut self, remote: Arc<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Build the runtime and spawn its workers. The sync worker issues the
    /// initial load immediately.
    pub fn build(self) -> Result<SheetRuntime> {
        let remote = self.remote.ok_or(SyncError::MissingRemoteStore)?;
        let ruleset = self
            .ruleset
            .unwrap_or_else(sheet_content::default_ruleset);

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size);
        let (sync_command_tx, sync_command_rx) =
            mpsc::channel::<SyncCommand>(self.config.command_buffer_size);
        let event_bus = EventBus::new(self.config.event_buffer_size);

        let store = CharacterStore::new(ruleset, self.config.sheet_config.clone());
        let sheet_worker = SheetWorker::new(store, command_rx, event_bus.clone());

        // Subscribe before spawning the sheet worker so no mutation event
        // can slip past the sync worker.
        let sync_worker = SyncWorker::new(
            remote,
            event_bus.subscribe(),
            sync_command_rx,
            command_tx.clone(),
        );

        let sheet_worker_handle = tokio::spawn(async move {
            sheet_worker.run().await;
        });
        let sync_worker_handle = tokio::spawn(async move {
            sync_worker.run().await;
        });

        let handle = SheetHandle::new(command_tx, event_bus);

        Ok(SheetRuntime {
            handle,
            sync_command_tx,
            sheet_worker_handle,
            sync_worker_handle,
        })
    }
}
