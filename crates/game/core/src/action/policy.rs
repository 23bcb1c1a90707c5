//! Per-actor move policies layered around [`GridMotion`].
//!
//! Player and enemies share the same movement resolution and differ only in
//! what happens before and after it. Each kind supplies a [`MovePolicy`], and
//! [`Mover`] composes the policy with GridMotion.
use super::movement::{Direction, GridMotion, MoveError, MoveOutcome, Obstacle};
use crate::state::{EntityId, GameState, Pickup};

/// Side effect a policy applied in reaction to a resolved move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interaction {
    None,
    /// The player chopped a wall. `remaining == 0` means it was removed.
    WallChopped { wall: EntityId, remaining: u32 },
    PickupConsumed { pickup: Pickup, gained: i32 },
    ExitReached,
    /// An enemy bumped into the player.
    PlayerAttacked { damage: i32 },
}

/// Full record of one move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveResolution {
    pub actor: EntityId,
    pub direction: Direction,
    pub outcome: MoveOutcome,
    pub interaction: Interaction,
    /// Player food after the attempt settled.
    pub food_after: i32,
}

/// Pre/post-move behavior for one actor kind.
pub trait MovePolicy {
    /// Runs after invariants are checked and before GridMotion resolves the step.
    fn before_move(&self, _state: &mut GameState, _actor: EntityId) {}

    /// Reacts to the resolved outcome.
    fn after_move(&self, state: &mut GameState, actor: EntityId, outcome: &MoveOutcome)
    -> Interaction;
}

/// Pays food up front, chops damageable walls, and collects what lies on the new cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerPolicy;

impl MovePolicy for PlayerPolicy {
    fn before_move(&self, state: &mut GameState, _actor: EntityId) {
        let cost = state.player.food_per_move;
        state.player.lose_food(cost);
    }

    fn after_move(
        &self,
        state: &mut GameState,
        _actor: EntityId,
        outcome: &MoveOutcome,
    ) -> Interaction {
        match *outcome {
            MoveOutcome::Blocked(Obstacle::Wall(wall)) => {
                let damage = state.player.wall_damage;
                match state.board.damage_wall(wall, damage) {
                    Some(remaining) => Interaction::WallChopped { wall, remaining },
                    None => Interaction::None,
                }
            }
            MoveOutcome::Blocked(_) => Interaction::None,
            MoveOutcome::Moved { to, .. } => {
                // Starvation from the step cost wins over anything on the new cell.
                if state.player.is_depleted() {
                    return Interaction::None;
                }
                if let Some(pickup) = state.board.take_pickup(to) {
                    let gained = match pickup {
                        Pickup::Food => state.config.points_per_food,
                        Pickup::Soda => state.config.points_per_soda,
                    };
                    state.player.gain_food(gained);
                    Interaction::PickupConsumed { pickup, gained }
                } else if state.board.is_exit(to) {
                    Interaction::ExitReached
                } else {
                    Interaction::None
                }
            }
        }
    }
}

/// Attacks the player on contact. Enemies pay no movement cost.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnemyPolicy;

impl EnemyPolicy {
    /// One step toward the player: vertical when sharing the player's column,
    /// horizontal otherwise.
    pub fn choose_direction(state: &GameState, enemy: EntityId) -> Result<Direction, MoveError> {
        let from = state
            .actor(enemy)
            .ok_or(MoveError::ActorNotFound(enemy))?
            .position;
        let target = state.player.position();

        let direction = if from.x == target.x {
            if target.y > from.y {
                Direction::Up
            } else {
                Direction::Down
            }
        } else if target.x > from.x {
            Direction::Right
        } else {
            Direction::Left
        };
        Ok(direction)
    }
}

impl MovePolicy for EnemyPolicy {
    fn after_move(
        &self,
        state: &mut GameState,
        actor: EntityId,
        outcome: &MoveOutcome,
    ) -> Interaction {
        match *outcome {
            MoveOutcome::Blocked(Obstacle::Actor(target)) if target.is_player() => {
                let Some(damage) = state.enemy(actor).map(|enemy| enemy.attack_damage) else {
                    return Interaction::None;
                };
                state.player.lose_food(damage);
                Interaction::PlayerAttacked { damage }
            }
            _ => Interaction::None,
        }
    }
}

/// An actor bound to its policy, ready to attempt moves.
pub struct Mover<'s, P> {
    state: &'s mut GameState,
    actor: EntityId,
    policy: P,
}

impl<'s> Mover<'s, PlayerPolicy> {
    pub fn player(state: &'s mut GameState) -> Self {
        Self::new(state, EntityId::PLAYER, PlayerPolicy)
    }
}

impl<'s> Mover<'s, EnemyPolicy> {
    pub fn enemy(state: &'s mut GameState, enemy: EntityId) -> Self {
        Self::new(state, enemy, EnemyPolicy)
    }
}

impl<'s, P: MovePolicy> Mover<'s, P> {
    pub fn new(state: &'s mut GameState, actor: EntityId, policy: P) -> Self {
        Self {
            state,
            actor,
            policy,
        }
    }

    /// Runs the policy around one GridMotion step.
    ///
    /// Invariants are checked before the policy runs, so an invalid move has
    /// no side effects at all.
    pub fn attempt_move(&mut self, direction: Direction) -> Result<MoveResolution, MoveError> {
        GridMotion::checked_position(self.state, self.actor)?;

        self.policy.before_move(self.state, self.actor);
        let outcome = GridMotion::attempt_move(self.state, self.actor, direction)?;
        let interaction = self.policy.after_move(self.state, self.actor, &outcome);

        Ok(MoveResolution {
            actor: self.actor,
            direction,
            outcome,
            interaction,
            food_after: self.state.player.food,
        })
    }
}
