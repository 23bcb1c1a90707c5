//! Deterministic turn coordination and grid movement rules.
//!
//! `game-core` decides whose turn it is, resolves single-cell moves on the
//! board, and sequences non-player actors with per-actor pacing. It performs
//! no I/O and never sleeps: time only advances when a driver calls
//! [`engine::LevelLifecycle::tick`] with the elapsed frame duration.
//!
//! All state lives in an explicitly owned [`GameState`]; the
//! [`engine::TurnCoordinator`] and [`engine::LevelLifecycle`] borrow it for
//! the duration of one operation.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    Direction, EnemyPolicy, GridMotion, Interaction, MoveError, MoveOutcome, MovePolicy,
    MoveResolution, Mover, Obstacle, PlayerPolicy,
};
pub use config::GameConfig;
pub use engine::{
    LevelLifecycle, LifecycleError, PlayerMoveReport, StepEvent, TurnCoordinator, TurnError,
};
pub use env::{
    BoardSetup, LevelBuilder, MapDimensions, SetupError, SetupStatus, TerrainKind,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ActorSequence, ActorState, Board, EnemyState, EntityId, GameState, Pickup, PlayerState,
    Position, RoundContext, SetupProgress, TurnState, TurnTracker, WallState,
};
