use std::time::Duration;

/// Which side currently owns the turn.
///
/// `Setup → PlayerTurn ⇄ ActorsActing`, and any state may fall into the
/// terminal `GameOver`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnState {
    /// Level is being laid out and the title card is showing.
    #[default]
    Setup,
    /// Exactly one player move attempt is accepted.
    PlayerTurn,
    /// Registered enemies act one by one in registration order.
    ActorsActing,
    /// Terminal. All further transitions are suppressed.
    GameOver,
}

impl TurnState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TurnState::GameOver)
    }
}

/// Setup exit condition: the board is ready and the title card delay elapsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetupProgress {
    pub board_ready: bool,
    pub display_remaining: Duration,
}

impl SetupProgress {
    pub fn new(display_delay: Duration) -> Self {
        Self {
            board_ready: false,
            display_remaining: display_delay,
        }
    }

    pub fn elapse(&mut self, dt: Duration) {
        self.display_remaining = self.display_remaining.saturating_sub(dt);
    }

    pub fn is_complete(&self) -> bool {
        self.board_ready && self.display_remaining.is_zero()
    }
}

/// Resumable cursor over the enemy registry while `ActorsActing`.
///
/// `remaining` counts down before the enemy at `cursor` acts; after the last
/// enemy it counts down that enemy's pace before the turn returns to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSequence {
    pub cursor: usize,
    /// Registry length when the round started. Later registrations wait for the next round.
    pub round_len: usize,
    pub remaining: Duration,
}

impl ActorSequence {
    pub fn new(round_len: usize, lead_in: Duration) -> Self {
        Self {
            cursor: 0,
            round_len,
            remaining: lead_in,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.round_len
    }
}

/// Turn bookkeeping. Only the turn coordinator writes `state`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnTracker {
    pub state: TurnState,
    pub setup: SetupProgress,
    /// Present only while `ActorsActing`.
    pub sequence: Option<ActorSequence>,
}

impl TurnTracker {
    pub fn new() -> Self {
        Self::default()
    }
}
