//! Background workers: the sheet worker (authoritative state) and the sync
//! worker (remote persistence).

pub mod sheet;
pub mod sync;

pub use sheet::{Command, SheetWorker};
pub use sync::{SyncCommand, SyncState, SyncWorker};
