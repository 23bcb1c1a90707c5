//! Turn ownership, enemy sequencing, and level lifecycle.
//!
//! [`TurnCoordinator`] is the only writer of [`TurnState`]. It accepts the
//! player's single move per turn, then walks the enemy registry in
//! registration order with per-enemy pacing. [`LevelLifecycle`] wraps it with
//! setup, level reload, and game over handling, and exposes the `tick` step
//! function an external frame driver calls.
//!
//! Neither type sleeps or owns a clock. Pacing is explicit state
//! ([`crate::state::ActorSequence`]) counted down by the `dt` each tick passes in,
//! so a sequence can be resumed or discarded at any point.

mod errors;
mod lifecycle;
mod turns;

pub use errors::{LifecycleError, TurnError};
pub use lifecycle::LevelLifecycle;

use crate::action::{Direction, Interaction, MoveError, MoveResolution, Mover};
use crate::state::{EnemyState, EntityId, GameState, SetupProgress, TurnState};

/// Observable change produced by a coordinator or lifecycle step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepEvent {
    /// `round` is the round the state machine was in when the change happened.
    PhaseChanged {
        from: TurnState,
        to: TurnState,
        round: u32,
    },
    EnemyActed(MoveResolution),
    RoundStarted { round: u32 },
    LevelCompleted { round: u32 },
    GameOver { round: u32, food: i32 },
}

/// Result of an accepted player move attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerMoveReport {
    pub resolution: MoveResolution,
    /// Transitions triggered by the attempt (hand-off to enemies, game over, level exit).
    pub events: Vec<StepEvent>,
}

/// Owns turn transitions over a borrowed [`GameState`].
pub struct TurnCoordinator<'a> {
    state: &'a mut GameState,
}

impl<'a> TurnCoordinator<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &*self.state
    }

    pub fn current_turn_state(&self) -> TurnState {
        self.state.current_turn_state()
    }

    pub fn current_round(&self) -> u32 {
        self.state.current_round()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Appends an enemy to the round's registry and returns its freshly
    /// allocated id. Any id already set on `enemy` is discarded.
    ///
    /// The spawn cell must be on the board and free of actors, walls,
    /// pickups, the exit, and impassable terrain. Enemies registered while
    /// others are acting join from the next round.
    pub fn register_enemy(&mut self, enemy: EnemyState) -> Result<EntityId, TurnError> {
        if self.state.is_game_over() {
            return Err(TurnError::stale(EntityId::UNASSIGNED, TurnState::GameOver));
        }
        let position = enemy.position();
        if !self.state.board.contains(position) {
            return Err(MoveError::OutOfBounds {
                actor: EntityId::UNASSIGNED,
                position,
            }
            .into());
        }
        if self.state.occupant_at(position).is_some() || self.state.board.is_cell_taken(position) {
            return Err(TurnError::CellTaken { position });
        }
        Ok(self.enroll(enemy))
    }

    /// Resolves the player's one move for this turn.
    ///
    /// The move cost is paid whether the step succeeds or is blocked. On
    /// success the turn passes to the enemies, unless the cost starved the
    /// player, in which case the game ends.
    pub fn attempt_player_move(
        &mut self,
        direction: Direction,
    ) -> Result<PlayerMoveReport, TurnError> {
        let turn = self.state.turn.state;
        if turn != TurnState::PlayerTurn || !self.state.player.enabled {
            return Err(TurnError::stale(EntityId::PLAYER, turn));
        }

        let resolution = Mover::player(self.state).attempt_move(direction)?;

        let mut events = Vec::new();
        if self.state.player.is_depleted() {
            LevelLifecycle::new(self.state).player_depleted(&mut events);
        } else {
            if resolution.interaction == Interaction::ExitReached {
                LevelLifecycle::new(self.state).level_exit_reached(&mut events);
            }
            self.begin_actors_acting(&mut events);
        }

        Ok(PlayerMoveReport { resolution, events })
    }

    /// Registry ids are always allocated here so no enemy can alias the
    /// player, a wall, or another enemy.
    pub(crate) fn enroll(&mut self, mut enemy: EnemyState) -> EntityId {
        let id = self.state.allocate_entity_id();
        enemy.actor.id = id;
        self.state.round.registry.push(enemy);
        id
    }

    /// Writes the turn state. Returns false when suppressed by `GameOver` or a no-op.
    pub(crate) fn transition(&mut self, to: TurnState, events: &mut Vec<StepEvent>) -> bool {
        let from = self.state.turn.state;
        if from.is_terminal() || from == to {
            return false;
        }
        self.state.turn.state = to;
        if to != TurnState::ActorsActing {
            self.state.turn.sequence = None;
        }
        events.push(StepEvent::PhaseChanged {
            from,
            to,
            round: self.state.round.round_number,
        });
        true
    }

    /// Re-arms setup, aborting any in-flight enemy sequence.
    pub(crate) fn enter_setup(&mut self, events: &mut Vec<StepEvent>) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        self.state.turn.setup = SetupProgress::new(self.state.config.level_start_delay);
        self.state.turn.sequence = None;
        self.transition(TurnState::Setup, events);
        true
    }

    pub(crate) fn mark_board_ready(&mut self) {
        if self.state.turn.state == TurnState::Setup {
            self.state.turn.setup.board_ready = true;
        }
    }

    pub(crate) fn elapse_setup(&mut self, dt: std::time::Duration, events: &mut Vec<StepEvent>) {
        if self.state.turn.state != TurnState::Setup {
            return;
        }
        self.state.turn.setup.elapse(dt);
        if self.state.turn.setup.is_complete() {
            self.transition(TurnState::PlayerTurn, events);
        }
    }
}
