//! Enemy sequencing while `ActorsActing`.
//!
//! The sequence is a step function over explicit [`ActorSequence`] state: a
//! cursor into the registry and a countdown. Each call to
//! [`TurnCoordinator::advance`] consumes `dt` from the countdown and, once it
//! expires, lets at most one enemy act. After an enemy acts the countdown is
//! re-armed with that enemy's pace, so the last enemy's pace is also the gap
//! before the player regains the turn.
use std::time::Duration;

use super::{LevelLifecycle, StepEvent, TurnCoordinator, TurnError};
use crate::action::{EnemyPolicy, Mover};
use crate::state::{ActorSequence, TurnState};

impl TurnCoordinator<'_> {
    /// Hands the turn to the enemies and arms the sequence.
    ///
    /// Only enemies registered before this call act this round.
    pub(crate) fn begin_actors_acting(&mut self, events: &mut Vec<StepEvent>) {
        let round_len = self.state.round.registry.len();
        let turn_delay = self.state.config.turn_delay;
        // An empty registry still waits so the player cannot chain moves instantly.
        let lead_in = if round_len == 0 {
            turn_delay.saturating_mul(2)
        } else {
            turn_delay
        };

        if self.transition(TurnState::ActorsActing, events) {
            self.state.turn.sequence = Some(ActorSequence::new(round_len, lead_in));
        }
    }

    /// Advances the enemy sequence by `dt`.
    ///
    /// Outside `ActorsActing` this is a no-op that returns no events.
    pub fn advance(&mut self, dt: Duration) -> Result<Vec<StepEvent>, TurnError> {
        let mut events = Vec::new();
        self.advance_into(dt, &mut events)?;
        Ok(events)
    }

    pub(crate) fn advance_into(
        &mut self,
        dt: Duration,
        events: &mut Vec<StepEvent>,
    ) -> Result<(), TurnError> {
        if self.state.turn.state != TurnState::ActorsActing {
            return Ok(());
        }
        let Some(mut sequence) = self.state.turn.sequence else {
            // Lost sequence state: nobody is left to act.
            self.transition(TurnState::PlayerTurn, events);
            return Ok(());
        };

        if sequence.remaining > dt {
            sequence.remaining -= dt;
            self.state.turn.sequence = Some(sequence);
            return Ok(());
        }
        sequence.remaining = Duration::ZERO;

        if sequence.is_exhausted() {
            self.transition(TurnState::PlayerTurn, events);
            return Ok(());
        }

        // The registry can only shrink through a level reload, which drops the sequence.
        let Some(enemy) = self.state.round.registry.get(sequence.cursor) else {
            self.transition(TurnState::PlayerTurn, events);
            return Ok(());
        };
        let enemy_id = enemy.id();
        let pace = enemy.actor.move_pace;

        let direction = EnemyPolicy::choose_direction(self.state, enemy_id)?;
        let resolution = Mover::enemy(self.state, enemy_id).attempt_move(direction)?;
        events.push(StepEvent::EnemyActed(resolution));

        sequence.cursor += 1;
        sequence.remaining = pace;
        self.state.turn.sequence = Some(sequence);

        if self.state.player.is_depleted() {
            LevelLifecycle::new(self.state).player_depleted(events);
        }
        Ok(())
    }
}
