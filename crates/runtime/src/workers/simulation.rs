//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), drives
//! [`LevelLifecycle::tick`] from a tokio interval, and publishes the resulting
//! events to the [`EventBus`]. Every write to the session goes through this
//! task, so turn state and game-over status are always read consistently.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};

use game_core::{
    BoardSetup, Direction, EnemyState, EntityId, GameError, GameState,
    LevelLifecycle, PlayerMoveReport, StepEvent, TurnCoordinator, TurnError,
};
use tracing::{debug, error, info, trace, warn};

use crate::api::{Result, SessionStatus};
use crate::events::{
    Event, EventBus, GameStateEvent, LevelEvent, extract_events, resolution_events,
};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Resolve the player's move for the current turn.
    AttemptPlayerMove {
        direction: Direction,
        reply: oneshot::Sender<Result<PlayerMoveReport>>,
    },
    /// Append an enemy to the current round's registry.
    RegisterEnemy {
        enemy: EnemyState,
        reply: oneshot::Sender<Result<EntityId>>,
    },
    /// Advance to the next round and rebuild the board.
    ReloadLevel { reply: oneshot::Sender<Result<()>> },
    /// A pending board finished laying out.
    BoardReady { reply: oneshot::Sender<()> },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Query the display-facing summary.
    QueryStatus { reply: oneshot::Sender<SessionStatus> },
}

/// Background task that processes gameplay commands and scheduler ticks.
pub struct SimulationWorker {
    state: GameState,
    board: Arc<dyn BoardSetup>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Duration,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        state: GameState,
        board: Arc<dyn BoardSetup>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Duration,
    ) -> Self {
        info!(
            target: "runtime::worker",
            round = state.current_round(),
            turn = %state.current_turn_state(),
            enemies = state.round.registry.len(),
            "SimulationWorker initialized"
        );

        Self {
            state,
            board,
            command_rx,
            event_bus,
            tick_interval,
        }
    }

    /// Main worker loop.
    ///
    /// Runs until every [`RuntimeHandle`](crate::RuntimeHandle) is dropped.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                now = interval.tick() => {
                    let dt = now.saturating_duration_since(last_tick);
                    last_tick = now;
                    self.tick(dt);
                }
            }
        }

        debug!(target: "runtime::worker", "command channel closed, worker exiting");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::AttemptPlayerMove { direction, reply } => {
                let result = self.attempt_player_move(direction);
                let _ = reply.send(result);
            }
            Command::RegisterEnemy { enemy, reply } => {
                let result = self.register_enemy(enemy);
                let _ = reply.send(result);
            }
            Command::ReloadLevel { reply } => {
                let result = self.reload_level();
                let _ = reply.send(result);
            }
            Command::BoardReady { reply } => {
                let events = LevelLifecycle::new(&mut self.state).on_board_ready();
                self.publish_steps(&events);
                let _ = reply.send(());
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::QueryStatus { reply } => {
                let _ = reply.send(self.status());
            }
        }
    }

    fn status(&self) -> SessionStatus {
        SessionStatus {
            turn: self.state.current_turn_state(),
            round: self.state.current_round(),
            food: self.state.player.food,
            game_over: self.state.is_game_over(),
        }
    }

    fn attempt_player_move(&mut self, direction: Direction) -> Result<PlayerMoveReport> {
        match TurnCoordinator::new(&mut self.state).attempt_player_move(direction) {
            Ok(report) => {
                debug!(
                    target: "runtime::worker",
                    direction = %direction,
                    outcome = ?report.resolution.outcome,
                    food = report.resolution.food_after,
                    "Player move resolved"
                );
                for event in resolution_events(&report.resolution) {
                    self.event_bus.publish(Event::GameState(event));
                }
                self.publish_steps(&report.events);
                Ok(report)
            }
            Err(error) => {
                self.reject(EntityId::PLAYER, &error);
                Err(error.into())
            }
        }
    }

    fn register_enemy(&mut self, enemy: EnemyState) -> Result<EntityId> {
        let position = enemy.position();
        match TurnCoordinator::new(&mut self.state).register_enemy(enemy) {
            Ok(id) => {
                debug!(
                    target: "runtime::worker",
                    enemy = %id,
                    position = %position,
                    "Enemy registered"
                );
                Ok(id)
            }
            Err(error) => {
                self.reject(EntityId::UNASSIGNED, &error);
                Err(error.into())
            }
        }
    }

    fn reload_level(&mut self) -> Result<()> {
        let events = LevelLifecycle::new(&mut self.state).reload_level(self.board.as_ref())?;
        self.publish_steps(&events);
        Ok(())
    }

    fn tick(&mut self, dt: Duration) {
        trace!(target: "runtime::worker", dt_ms = dt.as_millis() as u64, "tick");

        match LevelLifecycle::new(&mut self.state).tick(dt, self.board.as_ref()) {
            Ok(events) => self.publish_steps(&events),
            Err(error) if error.severity().is_internal() => error!(
                target: "runtime::worker",
                error = %error,
                code = error.error_code(),
                severity = error.severity().as_str(),
                "Scheduler step failed"
            ),
            Err(error) => warn!(
                target: "runtime::worker",
                error = %error,
                code = error.error_code(),
                "Scheduler step rejected"
            ),
        }
    }

    fn reject(&self, actor: EntityId, error: &TurnError) {
        let state = self.state.current_turn_state();
        if error.severity().is_recoverable() {
            debug!(
                target: "runtime::worker",
                actor = %actor,
                state = %state,
                error = %error,
                "Move attempt rejected"
            );
        } else {
            warn!(
                target: "runtime::worker",
                actor = %actor,
                state = %state,
                error = %error,
                code = error.error_code(),
                "Move attempt violated an invariant"
            );
        }

        self.event_bus
            .publish(Event::GameState(GameStateEvent::AttemptRejected {
                actor,
                state,
                error: error.to_string(),
            }));
    }

    fn publish_steps(&self, steps: &[StepEvent]) {
        if steps.is_empty() {
            return;
        }

        for event in extract_events(steps) {
            match &event {
                Event::Level(LevelEvent::RoundStarted { round }) => {
                    info!(target: "runtime::worker", round, "Round started");
                }
                Event::Level(LevelEvent::LevelCompleted { round }) => {
                    info!(target: "runtime::worker", round, "Level completed");
                }
                Event::Level(LevelEvent::GameOver { round, food }) => {
                    info!(target: "runtime::worker", round, food, "Game over");
                }
                _ => {}
            }
            self.event_bus.publish(event);
        }
    }
}
