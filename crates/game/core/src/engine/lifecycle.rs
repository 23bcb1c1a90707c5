//! Level lifecycle: setup, play, level completion, and game over.
use std::time::Duration;

use super::{LifecycleError, StepEvent, TurnCoordinator};
use crate::env::{BoardSetup, LevelBuilder, SetupError, SetupStatus};
use crate::state::{Board, GameState, TurnState};

/// Drives one level at a time over a borrowed [`GameState`].
///
/// The board collaborator is passed per call rather than stored, so the
/// coordinator can reach game over without one.
pub struct LevelLifecycle<'a> {
    state: &'a mut GameState,
}

impl<'a> LevelLifecycle<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Clears the level, re-enters `Setup`, and asks `setup` to lay out the
    /// board for the current round.
    ///
    /// Food and the round number carry over; everything else on the board and
    /// in the registry is rebuilt. A no-op once the game is over. If `setup`
    /// fails, the session is restored to how it was before the call.
    pub fn begin_level(&mut self, setup: &dyn BoardSetup) -> Result<Vec<StepEvent>, LifecycleError> {
        let round = self.state.round.round_number;
        self.start_level(round, setup)
    }

    fn start_level(
        &mut self,
        round: u32,
        setup: &dyn BoardSetup,
    ) -> Result<Vec<StepEvent>, LifecycleError> {
        if self.state.is_game_over() {
            return Ok(Vec::new());
        }
        let previous = self.state.clone();
        self.lay_out_level(round, setup).inspect_err(|_| {
            *self.state = previous;
        })
    }

    fn lay_out_level(
        &mut self,
        round: u32,
        setup: &dyn BoardSetup,
    ) -> Result<Vec<StepEvent>, LifecycleError> {
        let mut events = Vec::new();
        TurnCoordinator::new(self.state).enter_setup(&mut events);

        self.state.round.round_number = round;
        self.state.round.registry.clear();
        self.state.round.reload_in = None;
        self.state.board = Board::new(self.state.board.dimensions());
        self.state.player.enabled = true;
        events.push(StepEvent::RoundStarted { round });

        let status = {
            let mut level = LevelBuilder::new(self.state);
            let status = setup.setup_board(round, &mut level)?;
            if !level.player_placed() {
                return Err(SetupError::Collaborator {
                    round,
                    reason: "player spawn was not placed".to_string(),
                }
                .into());
            }
            status
        };

        if status == SetupStatus::Ready {
            self.on_board_ready_into(&mut events);
        }
        Ok(events)
    }

    /// Collaborator signal that a `Pending` board finished laying out.
    pub fn on_board_ready(&mut self) -> Vec<StepEvent> {
        let mut events = Vec::new();
        self.on_board_ready_into(&mut events);
        events
    }

    fn on_board_ready_into(&mut self, events: &mut Vec<StepEvent>) {
        let mut coordinator = TurnCoordinator::new(self.state);
        coordinator.mark_board_ready();
        // The title card may already be gone if the board was slow.
        coordinator.elapse_setup(Duration::ZERO, events);
    }

    /// Ends the session if the player ran out of food. Ignored while food is
    /// still positive.
    pub fn on_player_depleted(&mut self) -> Vec<StepEvent> {
        let mut events = Vec::new();
        self.player_depleted(&mut events);
        events
    }

    pub(crate) fn player_depleted(&mut self, events: &mut Vec<StepEvent>) {
        if self.state.is_game_over() || !self.state.player.is_depleted() {
            return;
        }
        self.state.player.enabled = false;
        self.state.round.reload_in = None;
        TurnCoordinator::new(self.state).transition(TurnState::GameOver, events);
        events.push(StepEvent::GameOver {
            round: self.state.round.round_number,
            food: self.state.player.food,
        });
    }

    /// The player stepped onto the exit: freeze them and schedule the reload.
    pub(crate) fn level_exit_reached(&mut self, events: &mut Vec<StepEvent>) {
        self.state.player.enabled = false;
        self.state.round.reload_in = Some(self.state.config.restart_level_delay);
        events.push(StepEvent::LevelCompleted {
            round: self.state.round.round_number,
        });
    }

    /// Advances to the next round and rebuilds the level.
    ///
    /// Any in-flight enemy sequence is dropped; enemies that had not acted yet
    /// forfeit their move. A failed setup leaves the round number and the
    /// current level untouched.
    pub fn reload_level(&mut self, setup: &dyn BoardSetup) -> Result<Vec<StepEvent>, LifecycleError> {
        let round = self.state.round.round_number.saturating_add(1);
        self.start_level(round, setup)
    }

    /// One scheduler step of `dt`.
    ///
    /// Counts down the pending level reload, the setup title card, and the
    /// enemy sequence, in that order.
    pub fn tick(
        &mut self,
        dt: Duration,
        setup: &dyn BoardSetup,
    ) -> Result<Vec<StepEvent>, LifecycleError> {
        let mut events = Vec::new();
        if self.state.is_game_over() {
            return Ok(events);
        }

        if let Some(remaining) = self.state.round.reload_in {
            if remaining > dt {
                self.state.round.reload_in = Some(remaining - dt);
            } else {
                return self.reload_level(setup).inspect_err(|_| {
                    // The next attempt waits a full restart delay.
                    self.state.round.reload_in = Some(self.state.config.restart_level_delay);
                });
            }
        }

        let mut coordinator = TurnCoordinator::new(self.state);
        match coordinator.current_turn_state() {
            TurnState::Setup => coordinator.elapse_setup(dt, &mut events),
            TurnState::ActorsActing => coordinator.advance_into(dt, &mut events)?,
            TurnState::PlayerTurn | TurnState::GameOver => {}
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Direction;
    use crate::config::GameConfig;
    use crate::env::MapDimensions;
    use crate::state::{EnemyState, Pickup, Position};

    const SECOND: Duration = Duration::from_secs(1);

    /// Open 5x5 field: player bottom-left, exit top-right, one enemy per entry.
    struct OpenField {
        enemies: Vec<Position>,
        status: SetupStatus,
    }

    impl OpenField {
        fn ready(enemies: Vec<Position>) -> Self {
            Self {
                enemies,
                status: SetupStatus::Ready,
            }
        }
    }

    impl BoardSetup for OpenField {
        fn setup_board(
            &self,
            _round: u32,
            level: &mut LevelBuilder<'_>,
        ) -> Result<SetupStatus, SetupError> {
            level.resize(MapDimensions::new(5, 5))?;
            level.place_player(Position::new(0, 0))?;
            level.place_exit(Position::new(4, 4))?;
            level.place_pickup(Position::new(0, 2), Pickup::Food)?;
            for position in &self.enemies {
                level.register_enemy(EnemyState::new(*position, 10, Duration::ZERO))?;
            }
            Ok(self.status)
        }
    }

    struct Broken;

    impl BoardSetup for Broken {
        fn setup_board(
            &self,
            _round: u32,
            _level: &mut LevelBuilder<'_>,
        ) -> Result<SetupStatus, SetupError> {
            Ok(SetupStatus::Ready)
        }
    }

    /// Lays out round 1 and refuses every later round.
    struct FirstRoundOnly(OpenField);

    impl BoardSetup for FirstRoundOnly {
        fn setup_board(
            &self,
            round: u32,
            level: &mut LevelBuilder<'_>,
        ) -> Result<SetupStatus, SetupError> {
            if round > 1 {
                return Err(SetupError::Collaborator {
                    round,
                    reason: "no layout for this round".to_string(),
                });
            }
            self.0.setup_board(round, level)
        }
    }

    fn new_state() -> GameState {
        let config = GameConfig::default()
            .with_level_start_delay(SECOND)
            .with_restart_level_delay(SECOND);
        GameState::new(config, MapDimensions::new(5, 5))
    }

    #[test]
    fn setup_waits_for_title_card_and_board() {
        let mut state = new_state();
        let setup = OpenField {
            enemies: Vec::new(),
            status: SetupStatus::Pending,
        };
        let mut lifecycle = LevelLifecycle::new(&mut state);

        let events = lifecycle.begin_level(&setup).unwrap();
        assert_eq!(events, vec![StepEvent::RoundStarted { round: 1 }]);

        assert!(lifecycle.tick(SECOND * 2, &setup).unwrap().is_empty());
        let events = lifecycle.on_board_ready();
        assert_eq!(
            events,
            vec![StepEvent::PhaseChanged {
                from: TurnState::Setup,
                to: TurnState::PlayerTurn,
                round: 1,
            }]
        );
    }

    #[test]
    fn ready_board_starts_play_after_the_delay() {
        let mut state = new_state();
        let setup = OpenField::ready(vec![Position::new(4, 0)]);
        let mut lifecycle = LevelLifecycle::new(&mut state);
        lifecycle.begin_level(&setup).unwrap();

        assert!(lifecycle.tick(SECOND / 2, &setup).unwrap().is_empty());
        let events = lifecycle.tick(SECOND / 2, &setup).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(state.turn.state, TurnState::PlayerTurn);
        assert_eq!(state.round.registry.len(), 1);
    }

    #[test]
    fn missing_player_spawn_is_a_setup_error() {
        let mut state = new_state();

        let result = LevelLifecycle::new(&mut state).begin_level(&Broken);

        assert!(matches!(
            result,
            Err(LifecycleError::Setup(SetupError::Collaborator { round: 1, .. }))
        ));
        assert_eq!(state.turn.state, TurnState::Setup);
    }

    #[test]
    fn reload_increments_round_and_keeps_food() {
        let mut state = new_state();
        let setup = OpenField::ready(vec![Position::new(4, 0)]);
        LevelLifecycle::new(&mut state).begin_level(&setup).unwrap();
        state.player.food = 42;
        state.turn.state = TurnState::ActorsActing;

        let events = LevelLifecycle::new(&mut state).reload_level(&setup).unwrap();

        assert_eq!(state.round.round_number, 2);
        assert_eq!(state.player.food, 42);
        assert_eq!(state.turn.state, TurnState::Setup);
        assert!(state.turn.sequence.is_none());
        assert_eq!(state.round.registry.len(), 1);
        assert_eq!(
            &events[..2],
            &[
                StepEvent::PhaseChanged {
                    from: TurnState::ActorsActing,
                    to: TurnState::Setup,
                    round: 1,
                },
                StepEvent::RoundStarted { round: 2 },
            ]
        );
    }

    #[test]
    fn reaching_the_exit_reloads_after_the_restart_delay() {
        let mut state = new_state();
        let setup = OpenField::ready(Vec::new());
        LevelLifecycle::new(&mut state).begin_level(&setup).unwrap();
        state.turn.state = TurnState::PlayerTurn;
        state.player.actor.position = Position::new(3, 4);

        let report = TurnCoordinator::new(&mut state)
            .attempt_player_move(Direction::Right)
            .unwrap();
        assert!(report.events.contains(&StepEvent::LevelCompleted { round: 1 }));
        assert!(!state.player.enabled);
        assert_eq!(state.turn.state, TurnState::ActorsActing);

        let mut lifecycle = LevelLifecycle::new(&mut state);
        lifecycle.tick(SECOND / 2, &setup).unwrap();
        let events = lifecycle.tick(SECOND / 2, &setup).unwrap();

        assert!(events.contains(&StepEvent::RoundStarted { round: 2 }));
        assert_eq!(state.turn.state, TurnState::Setup);
        assert!(state.player.enabled);
        assert_eq!(state.player.position(), Position::new(0, 0));
    }

    #[test]
    fn depletion_signal_requires_empty_food() {
        let mut state = new_state();
        let setup = OpenField::ready(Vec::new());
        let mut lifecycle = LevelLifecycle::new(&mut state);
        lifecycle.begin_level(&setup).unwrap();

        assert!(lifecycle.on_player_depleted().is_empty());
        assert!(!state.is_game_over());
        assert_eq!(state.player.food, 100);
    }

    #[test]
    fn depletion_is_terminal() {
        let mut state = new_state();
        let setup = OpenField::ready(Vec::new());
        LevelLifecycle::new(&mut state).begin_level(&setup).unwrap();
        state.player.food = 0;

        let mut lifecycle = LevelLifecycle::new(&mut state);
        let events = lifecycle.on_player_depleted();
        assert!(events.contains(&StepEvent::GameOver { round: 1, food: 0 }));
        assert!(lifecycle.on_player_depleted().is_empty());
        assert!(lifecycle.reload_level(&setup).unwrap().is_empty());
        assert!(lifecycle.begin_level(&setup).unwrap().is_empty());
        assert!(lifecycle.tick(SECOND * 10, &setup).unwrap().is_empty());

        assert_eq!(state.turn.state, TurnState::GameOver);
        assert_eq!(state.round.round_number, 1);
    }

    #[test]
    fn failed_reload_keeps_the_current_level() {
        let mut state = new_state();
        let setup = FirstRoundOnly(OpenField::ready(vec![Position::new(4, 0)]));
        LevelLifecycle::new(&mut state).begin_level(&setup).unwrap();
        state.turn.state = TurnState::PlayerTurn;
        let before = state.clone();

        let mut lifecycle = LevelLifecycle::new(&mut state);
        for _ in 0..2 {
            assert!(matches!(
                lifecycle.reload_level(&setup),
                Err(LifecycleError::Setup(SetupError::Collaborator { round: 2, .. }))
            ));
        }

        assert_eq!(state, before);
        assert_eq!(state.round.round_number, 1);
        assert_eq!(state.turn.state, TurnState::PlayerTurn);
    }

    #[test]
    fn failed_exit_reload_retries_after_the_restart_delay() {
        let mut state = new_state();
        let setup = FirstRoundOnly(OpenField::ready(Vec::new()));
        LevelLifecycle::new(&mut state).begin_level(&setup).unwrap();
        state.turn.state = TurnState::PlayerTurn;
        state.player.actor.position = Position::new(3, 4);
        TurnCoordinator::new(&mut state)
            .attempt_player_move(Direction::Right)
            .unwrap();

        let mut lifecycle = LevelLifecycle::new(&mut state);
        assert!(lifecycle.tick(SECOND, &setup).is_err());

        assert_eq!(state.round.round_number, 1);
        assert_eq!(state.round.reload_in, Some(SECOND));
        assert_eq!(state.player.position(), Position::new(4, 4));
        assert!(!state.player.enabled);
    }
}
