//! Event types for different topics.

use game_core::{
    Direction, EntityId, MoveOutcome, MoveResolution, Pickup, Position, TurnState,
};
use serde::{Deserialize, Serialize};

/// Events related to turn ownership (lightweight)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The coordinator moved the turn to another phase.
    PhaseChanged {
        from: TurnState,
        to: TurnState,
        round: u32,
    },
}

/// Events related to moves and their side effects on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// The player's move attempt resolved (moved or blocked).
    PlayerMoved {
        direction: Direction,
        outcome: MoveOutcome,
        food: i32,
    },

    /// An enemy took its step for the round.
    EnemyActed {
        enemy: EntityId,
        direction: Direction,
        outcome: MoveOutcome,
    },

    /// The player chopped a damageable wall. `remaining == 0` means it is gone.
    WallDamaged { wall: EntityId, remaining: u32 },

    PickupConsumed {
        pickup: Pickup,
        position: Position,
        gained: i32,
        food: i32,
    },

    PlayerAttacked {
        enemy: EntityId,
        damage: i32,
        food: i32,
    },

    /// A move attempt was refused without touching state.
    AttemptRejected {
        actor: EntityId,
        state: TurnState,
        error: String,
    },
}

/// Level lifecycle milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelEvent {
    RoundStarted { round: u32 },
    LevelCompleted { round: u32 },
    GameOver { round: u32, food: i32 },
}

impl GameStateEvent {
    pub(crate) fn from_resolution(resolution: &MoveResolution) -> Self {
        if resolution.actor.is_player() {
            GameStateEvent::PlayerMoved {
                direction: resolution.direction,
                outcome: resolution.outcome,
                food: resolution.food_after,
            }
        } else {
            GameStateEvent::EnemyActed {
                enemy: resolution.actor,
                direction: resolution.direction,
                outcome: resolution.outcome,
            }
        }
    }
}
