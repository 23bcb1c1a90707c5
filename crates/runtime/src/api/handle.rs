//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting player input, querying the session, or streaming events from
//! specific topics.
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Direction, EnemyState, EntityId, GameState, PlayerMoveReport, TurnState};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Display-facing summary of the session, read in one consistent snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub turn: TurnState,
    pub round: u32,
    pub food: i32,
    pub game_over: bool,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Submit the player's move for the current turn.
    ///
    /// Fails with a stale-turn error unless the player owns the turn; poll
    /// [`Self::current_turn_state`] before retrying.
    pub async fn attempt_player_move(&self, direction: Direction) -> Result<PlayerMoveReport> {
        self.request(|reply| Command::AttemptPlayerMove { direction, reply })
            .await?
    }

    /// Append an enemy to the current round's registry.
    pub async fn register_enemy(&self, enemy: EnemyState) -> Result<EntityId> {
        self.request(|reply| Command::RegisterEnemy { enemy, reply })
            .await?
    }

    /// Advance to the next round and rebuild the board.
    pub async fn reload_level(&self) -> Result<()> {
        self.request(|reply| Command::ReloadLevel { reply }).await?
    }

    /// Signal that a board reported as pending has finished laying out.
    pub async fn board_ready(&self) -> Result<()> {
        self.request(|reply| Command::BoardReady { reply }).await
    }

    pub async fn status(&self) -> Result<SessionStatus> {
        self.request(|reply| Command::QueryStatus { reply }).await
    }

    pub async fn current_turn_state(&self) -> Result<TurnState> {
        Ok(self.status().await?.turn)
    }

    pub async fn current_round(&self) -> Result<u32> {
        Ok(self.status().await?.round)
    }

    pub async fn is_game_over(&self) -> Result<bool> {
        Ok(self.status().await?.game_over)
    }

    pub async fn player_food(&self) -> Result<i32> {
        Ok(self.status().await?.food)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Moves, wall damage, pickups, attacks, rejections
    /// - `Topic::Turn` - Turn phase changes
    /// - `Topic::Level` - Round start, level completion, game over
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut level_rx = handle.subscribe(Topic::Level);
    /// while let Ok(event) = level_rx.recv().await {
    ///     // Handle level events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
