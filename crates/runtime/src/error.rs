//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the remote store so clients
//! can bubble them up with consistent context. Mutation rejections are not
//! errors; they surface as [`sheet_core::Mutation::Rejected`].

use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("sheet worker command channel closed")]
    CommandChannelClosed,

    #[error("sheet worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a remote store to be configured before building")]
    MissingRemoteStore,
}

/// Failures talking to the remote persistence endpoint.
///
/// Every variant is recoverable: loads fall back to local defaults and
/// saves are dropped (the next mutation schedules another), per the
/// availability-over-persistence design.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("remote returned status {0}")]
    Status(u16),

    #[error("malformed snapshot body: {0}")]
    Malformed(String),
}
