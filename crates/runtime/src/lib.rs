//! Character-sheet runtime: authoritative state plus remote sync.
//!
//! Layered on `sheet-core`: a sheet worker owns the
//! [`sheet_core::CharacterStore`] and serializes all mutations; a sync
//! worker mirrors accepted mutations to a [`remote::RemoteStore`] with a
//! strict load-before-save lifecycle and a single-slot coalescing save
//! queue. Clients drive everything through [`SheetHandle`].

pub mod error;
pub mod events;
pub mod handle;
pub mod remote;
pub mod runtime;
pub mod snapshot;
pub mod workers;

pub use error::{RemoteError, Result, SyncError};
pub use events::{EventBus, SheetEvent};
pub use handle::SheetHandle;
pub use remote::{HttpRemoteStore, MemoryRemoteStore, RemoteStore};
pub use runtime::{RuntimeConfig, SheetRuntime, SheetRuntimeBuilder};
pub use snapshot::CharacterSnapshot;
pub use workers::SyncState;
