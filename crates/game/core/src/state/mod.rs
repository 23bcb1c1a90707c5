//! Authoritative session state.
//!
//! [`GameState`] is the explicitly owned session context: turn bookkeeping,
//! the round's enemy registry, the player, and the board. Presentation layers
//! clone or query it; mutation goes through the engine.
pub mod types;

use std::time::Duration;

pub use types::{
    ActorSequence, ActorState, Board, EnemyState, EntityId, Pickup, PlayerState, Position,
    SetupProgress, TurnState, TurnTracker, WallState,
};

use crate::config::GameConfig;
use crate::env::MapDimensions;

/// Round number plus the ordered enemy registry for the current level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundContext {
    /// Shown in game as "Day N"; starts at 1 and increments on every level reload.
    pub round_number: u32,
    /// Registration order is iteration order.
    pub registry: Vec<EnemyState>,
    /// Countdown to the level reload after the player reached the exit.
    pub reload_in: Option<Duration>,
}

impl RoundContext {
    pub fn new() -> Self {
        Self {
            round_number: 1,
            registry: Vec::new(),
            reload_in: None,
        }
    }
}

impl Default for RoundContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical snapshot of one game session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub config: GameConfig,

    /// Sequential entity ID allocator (monotonically increasing).
    ///
    /// Never reused. ID 0 (PLAYER) and u32::MAX (UNASSIGNED) are reserved.
    next_entity_id: u32,

    pub turn: TurnTracker,
    pub round: RoundContext,
    pub player: PlayerState,
    pub board: Board,
}

impl GameState {
    /// Creates a session in `Setup` for round 1 with an empty board.
    pub fn new(config: GameConfig, dimensions: MapDimensions) -> Self {
        let player = PlayerState::new(Position::ORIGIN, &config);
        Self {
            config,
            next_entity_id: 1,
            turn: TurnTracker::new(),
            round: RoundContext::new(),
            player,
            board: Board::new(dimensions),
        }
    }

    /// Allocates a new unique EntityId.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        if self.next_entity_id == EntityId::PLAYER.0 {
            self.next_entity_id += 1;
        }
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self
            .next_entity_id
            .saturating_add(1)
            .min(EntityId::UNASSIGNED.0 - 1);
        id
    }

    pub fn enemy(&self, id: EntityId) -> Option<&EnemyState> {
        self.round.registry.iter().find(|enemy| enemy.id() == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut EnemyState> {
        self.round.registry.iter_mut().find(|enemy| enemy.id() == id)
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        if id.is_player() {
            Some(&self.player.actor)
        } else {
            self.enemy(id).map(|enemy| &enemy.actor)
        }
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        if id.is_player() {
            Some(&mut self.player.actor)
        } else {
            self.enemy_mut(id).map(|enemy| &mut enemy.actor)
        }
    }

    /// The actor standing on `position`, if any.
    pub fn occupant_at(&self, position: Position) -> Option<EntityId> {
        if self.player.position() == position {
            return Some(EntityId::PLAYER);
        }
        self.round
            .registry
            .iter()
            .find(|enemy| enemy.position() == position)
            .map(EnemyState::id)
    }

    pub fn current_turn_state(&self) -> TurnState {
        self.turn.state
    }

    pub fn current_round(&self) -> u32 {
        self.round.round_number
    }

    pub fn is_game_over(&self) -> bool {
        self.turn.state.is_terminal()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), MapDimensions::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn allocated_ids_skip_the_player() {
        let mut state = GameState::default();
        let first = state.allocate_entity_id();
        let second = state.allocate_entity_id();

        assert_ne!(first, EntityId::PLAYER);
        assert_ne!(first, second);
    }

    #[test]
    fn occupant_lookup_covers_player_and_enemies() {
        let mut state = GameState::new(GameConfig::default(), MapDimensions::new(4, 4));
        state.player.actor.position = Position::new(1, 1);
        let mut enemy = EnemyState::new(Position::new(2, 2), 10, Duration::ZERO);
        enemy.actor.id = state.allocate_entity_id();
        let enemy_id = enemy.id();
        state.round.registry.push(enemy);

        assert_eq!(state.occupant_at(Position::new(1, 1)), Some(EntityId::PLAYER));
        assert_eq!(state.occupant_at(Position::new(2, 2)), Some(enemy_id));
        assert_eq!(state.occupant_at(Position::new(3, 3)), None);
    }
}
