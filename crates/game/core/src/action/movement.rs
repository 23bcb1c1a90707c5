//! Single-cell grid movement shared by every actor kind.
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState, Position};

/// Movement invariant violations. Fatal to the call: the caller must correct
/// state before retrying.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("actor {actor} stands outside the board at {position}")]
    OutOfBounds { actor: EntityId, position: Position },

    #[error("axis input ({horizontal}, {vertical}) is not a cardinal step")]
    NonCardinal { horizontal: i32, vertical: i32 },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::ActorNotFound(_) => ErrorSeverity::Internal,
            MoveError::OutOfBounds { .. } | MoveError::NonCardinal { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::ActorNotFound(_) => "MOVE_ACTOR_NOT_FOUND",
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::NonCardinal { .. } => "MOVE_NON_CARDINAL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Converts raw axis input into a direction.
    ///
    /// Horizontal wins: when both axes are non-zero the vertical component is
    /// discarded. `(0, 0)` means no input.
    pub fn from_axes(horizontal: i32, vertical: i32) -> Result<Option<Self>, MoveError> {
        if !(-1..=1).contains(&horizontal) || !(-1..=1).contains(&vertical) {
            return Err(MoveError::NonCardinal {
                horizontal,
                vertical,
            });
        }
        let direction = match (horizontal, vertical) {
            (1, _) => Some(Direction::Right),
            (-1, _) => Some(Direction::Left),
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            _ => None,
        };
        Ok(direction)
    }

    /// Classifies a touch swipe by its dominant axis. Ties go vertical.
    pub fn from_swipe(dx: f32, dy: f32) -> Option<Self> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() > dy.abs() {
            Some(if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if dy > 0.0 {
                Direction::Up
            } else {
                Direction::Down
            })
        }
    }
}

/// What a blocked move ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Obstacle {
    /// Terrain or the board edge; nothing to interact with.
    None,
    /// A damageable wall.
    Wall(EntityId),
    /// Another actor.
    Actor(EntityId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    Moved { from: Position, to: Position },
    Blocked(Obstacle),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    pub fn obstacle(&self) -> Option<Obstacle> {
        match self {
            MoveOutcome::Blocked(obstacle) => Some(*obstacle),
            MoveOutcome::Moved { .. } => None,
        }
    }
}

/// Resolves one-cell cardinal moves against the board and the other actors.
///
/// GridMotion only ever writes the mover's position. Interactions with what
/// blocked the move belong to the caller's policy.
pub struct GridMotion;

impl GridMotion {
    /// Casts from `origin` into the adjacent cell in `direction`.
    ///
    /// Returns `None` when the cell is clear. The board edge and impassable
    /// terrain both report [`Obstacle::None`].
    pub fn probe(state: &GameState, origin: Position, direction: Direction) -> Option<Obstacle> {
        let target = origin.step(direction);
        match state.board.terrain(target) {
            Some(terrain) if terrain.is_passable() => {}
            _ => return Some(Obstacle::None),
        }
        if let Some(wall) = state.board.wall_at(target) {
            return Some(Obstacle::Wall(wall.id));
        }
        state.occupant_at(target).map(Obstacle::Actor)
    }

    /// Attempts to move `actor` one cell in `direction`.
    pub fn attempt_move(
        state: &mut GameState,
        actor: EntityId,
        direction: Direction,
    ) -> Result<MoveOutcome, MoveError> {
        let origin = Self::checked_position(state, actor)?;

        if let Some(obstacle) = Self::probe(state, origin, direction) {
            return Ok(MoveOutcome::Blocked(obstacle));
        }

        let destination = origin.step(direction);
        state
            .actor_mut(actor)
            .ok_or(MoveError::ActorNotFound(actor))?
            .position = destination;

        Ok(MoveOutcome::Moved {
            from: origin,
            to: destination,
        })
    }

    /// Current position of `actor`, verifying it lies on the board.
    pub fn checked_position(state: &GameState, actor: EntityId) -> Result<Position, MoveError> {
        let position = state
            .actor(actor)
            .ok_or(MoveError::ActorNotFound(actor))?
            .position;
        if !state.board.contains(position) {
            return Err(MoveError::OutOfBounds { actor, position });
        }
        Ok(position)
    }
}
