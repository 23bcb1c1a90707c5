//! Collaborator seams for level layout.
//!
//! Board generation is not part of the turn rules. A [`BoardSetup`]
//! implementation lays out terrain, walls, pickups, the player spawn, and the
//! enemy registry through a [`LevelBuilder`], then reports whether the board
//! is ready immediately or will be signalled later.
mod error;
mod map;

pub use error::SetupError;
pub use map::{MapDimensions, TerrainKind};

use crate::engine::TurnCoordinator;
use crate::state::{Board, EnemyState, EntityId, GameState, Pickup, Position, WallState};

/// Completion signal returned by [`BoardSetup::setup_board`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupStatus {
    /// The board is fully laid out; setup can finish once the title card elapses.
    Ready,
    /// The collaborator will call `LevelLifecycle::on_board_ready` later.
    Pending,
}

/// Populates the board and the enemy registry for a round.
pub trait BoardSetup: Send + Sync {
    fn setup_board(
        &self,
        round: u32,
        level: &mut LevelBuilder<'_>,
    ) -> Result<SetupStatus, SetupError>;
}

/// Write access to a freshly cleared level, handed to [`BoardSetup`].
pub struct LevelBuilder<'a> {
    state: &'a mut GameState,
    player_placed: bool,
}

impl<'a> LevelBuilder<'a> {
    pub(crate) fn new(state: &'a mut GameState) -> Self {
        Self {
            state,
            player_placed: false,
        }
    }

    pub fn round(&self) -> u32 {
        self.state.round.round_number
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.state.board.dimensions()
    }

    pub fn player_placed(&self) -> bool {
        self.player_placed
    }

    /// Replaces the board with an empty one of the given size.
    ///
    /// Anything placed earlier in this setup is discarded, including enemies.
    pub fn resize(&mut self, dimensions: MapDimensions) -> Result<(), SetupError> {
        if dimensions.is_empty() {
            return Err(SetupError::EmptyBoard {
                width: dimensions.width,
                height: dimensions.height,
            });
        }
        self.state.board = Board::new(dimensions);
        self.state.round.registry.clear();
        self.player_placed = false;
        Ok(())
    }

    pub fn set_terrain(&mut self, position: Position, kind: TerrainKind) -> Result<(), SetupError> {
        self.ensure_free(position)?;
        self.state.board.set_terrain(position, kind);
        Ok(())
    }

    /// Places a damageable wall and returns its handle.
    pub fn place_wall(&mut self, position: Position, integrity: u32) -> Result<EntityId, SetupError> {
        self.ensure_free(position)?;
        let id = self.state.allocate_entity_id();
        self.state
            .board
            .place_wall(position, WallState { id, integrity });
        Ok(id)
    }

    pub fn place_pickup(&mut self, position: Position, pickup: Pickup) -> Result<(), SetupError> {
        self.ensure_free(position)?;
        self.state.board.place_pickup(position, pickup);
        Ok(())
    }

    pub fn place_exit(&mut self, position: Position) -> Result<(), SetupError> {
        self.ensure_free(position)?;
        self.state.board.set_exit(position);
        Ok(())
    }

    pub fn place_player(&mut self, position: Position) -> Result<(), SetupError> {
        self.ensure_free(position)?;
        self.state.player.actor.position = position;
        self.player_placed = true;
        Ok(())
    }

    /// Appends an enemy to the round's registry; registration order is acting order.
    pub fn register_enemy(&mut self, enemy: EnemyState) -> Result<EntityId, SetupError> {
        self.ensure_free(enemy.position())?;
        Ok(TurnCoordinator::new(self.state).enroll(enemy))
    }

    fn ensure_free(&self, position: Position) -> Result<(), SetupError> {
        if !self.state.board.contains(position) {
            return Err(SetupError::OutOfBounds { position });
        }
        let blocked_by_actor = match self.state.occupant_at(position) {
            Some(id) if id.is_player() => self.player_placed,
            Some(_) => true,
            None => false,
        };
        if blocked_by_actor || self.state.board.is_cell_taken(position) {
            return Err(SetupError::CellTaken { position });
        }
        Ok(())
    }
}
