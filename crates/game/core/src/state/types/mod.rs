pub mod actor;
pub mod board;
pub mod common;
pub mod turn;

pub use actor::{ActorState, EnemyState, PlayerState};
pub use board::{Board, Pickup, WallState};
pub use common::{EntityId, Position};
pub use turn::{ActorSequence, SetupProgress, TurnState, TurnTracker};
