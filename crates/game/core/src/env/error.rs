//! Board setup errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors raised while a [`super::BoardSetup`] collaborator lays out a level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("board dimensions {width}x{height} are empty")]
    EmptyBoard { width: u32, height: u32 },

    #[error("position {position} is outside the board")]
    OutOfBounds { position: Position },

    #[error("cell {position} is already taken")]
    CellTaken { position: Position },

    #[error("board setup for round {round} failed: {reason}")]
    Collaborator { round: u32, reason: String },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SetupError::EmptyBoard { .. }
            | SetupError::OutOfBounds { .. }
            | SetupError::CellTaken { .. } => ErrorSeverity::Validation,
            SetupError::Collaborator { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SetupError::EmptyBoard { .. } => "SETUP_EMPTY_BOARD",
            SetupError::OutOfBounds { .. } => "SETUP_OUT_OF_BOUNDS",
            SetupError::CellTaken { .. } => "SETUP_CELL_TAKEN",
            SetupError::Collaborator { .. } => "SETUP_COLLABORATOR",
        }
    }
}
