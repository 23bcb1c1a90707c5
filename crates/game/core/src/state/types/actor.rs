//! Actor state shared by the player and enemies.
use std::time::Duration;

use super::{EntityId, Position};
use crate::config::GameConfig;

/// Base movable entity: where it stands and how long the round waits after it acts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    /// Always inside the board; GridMotion is the only writer.
    pub position: Position,
    /// Pacing gap after this actor acts. Has no effect on movement legality.
    pub move_pace: Duration,
}

impl ActorState {
    pub fn new(id: EntityId, position: Position, move_pace: Duration) -> Self {
        Self {
            id,
            position,
            move_pace,
        }
    }
}

/// The controllable actor. Food is the depletable resource that ends the session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub actor: ActorState,
    pub food: i32,
    pub food_per_move: i32,
    pub wall_damage: u32,
    /// Cleared once the level is finished or lost; a disabled player cannot act.
    pub enabled: bool,
}

impl PlayerState {
    pub fn new(position: Position, config: &GameConfig) -> Self {
        Self {
            actor: ActorState::new(EntityId::PLAYER, position, Duration::ZERO),
            food: config.starting_food,
            food_per_move: config.food_per_move,
            wall_damage: config.wall_damage,
            enabled: true,
        }
    }

    pub fn position(&self) -> Position {
        self.actor.position
    }

    pub fn is_depleted(&self) -> bool {
        self.food <= 0
    }

    pub fn lose_food(&mut self, amount: i32) -> i32 {
        self.food -= amount;
        self.food
    }

    pub fn gain_food(&mut self, amount: i32) -> i32 {
        self.food += amount;
        self.food
    }
}

/// Non-player actor that attacks the player when the player blocks its step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyState {
    pub actor: ActorState,
    pub attack_damage: i32,
}

impl EnemyState {
    /// Creates an unregistered enemy; the id is assigned on registration.
    pub fn new(position: Position, attack_damage: i32, move_pace: Duration) -> Self {
        Self {
            actor: ActorState::new(EntityId::UNASSIGNED, position, move_pace),
            attack_damage,
        }
    }

    pub fn id(&self) -> EntityId {
        self.actor.id
    }

    pub fn position(&self) -> Position {
        self.actor.position
    }
}
