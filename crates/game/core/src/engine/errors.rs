//! Error types for turn coordination and level lifecycle.

use crate::action::MoveError;
use crate::env::SetupError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position, TurnState};

/// Errors surfaced by [`super::TurnCoordinator`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// The actor does not own the current turn. Nothing was mutated; poll
    /// `current_turn_state` before retrying.
    #[error("{actor} attempted to act during {state}")]
    StaleTurnAttempt { actor: EntityId, state: TurnState },

    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    /// An enemy was registered onto a cell that is already occupied.
    #[error("cell {position} is already occupied")]
    CellTaken { position: Position },
}

impl TurnError {
    pub fn stale(actor: EntityId, state: TurnState) -> Self {
        TurnError::StaleTurnAttempt { actor, state }
    }
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::StaleTurnAttempt { .. } => ErrorSeverity::Recoverable,
            TurnError::InvalidMove(error) => error.severity(),
            TurnError::CellTaken { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::StaleTurnAttempt { .. } => "TURN_STALE_ATTEMPT",
            TurnError::InvalidMove(error) => error.error_code(),
            TurnError::CellTaken { .. } => "TURN_CELL_TAKEN",
        }
    }
}

/// Errors surfaced while the lifecycle drives a level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Setup(#[from] SetupError),
}

impl GameError for LifecycleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            LifecycleError::Turn(error) => error.severity(),
            LifecycleError::Setup(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            LifecycleError::Turn(error) => error.error_code(),
            LifecycleError::Setup(error) => error.error_code(),
        }
    }
}
