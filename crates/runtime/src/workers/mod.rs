//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the game state, applies commands, and drives
//! the scheduler tick.

mod simulation;

pub use simulation::{Command, SimulationWorker};
