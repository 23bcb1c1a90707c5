//! Unified error types surfaced by the runtime API.
//!
//! Wraps turn rejections, level setup failures, and worker coordination
//! failures so clients can bubble them up with consistent context. Layout
//! parsing errors stay with [`crate::oracle::LayoutError`] since they occur
//! before a runtime exists.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ErrorSeverity, GameError, LifecycleError, TurnError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a board setup before building")]
    MissingBoardSetup,
}

impl RuntimeError {
    /// Severity of the underlying game error, if this wraps one.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Turn(error) => error.severity(),
            RuntimeError::Lifecycle(error) => error.severity(),
            RuntimeError::MissingBoardSetup => ErrorSeverity::Validation,
            RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Internal,
        }
    }

    /// True for a move sent while the player did not own the turn.
    pub fn is_stale_turn(&self) -> bool {
        matches!(
            self,
            RuntimeError::Turn(TurnError::StaleTurnAttempt { .. })
        )
    }
}
