//! Runtime orchestration for the turn-based grid game.
//!
//! This crate hosts a single session: the simulation worker owns the
//! [`game_core::GameState`], drives the scheduler tick, and applies commands
//! sent through [`RuntimeHandle`]. Consumers embed [`Runtime`] to submit
//! player input, subscribe to events, and query the session.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] provides board setup collaborators backed by static layouts
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle, SessionStatus};
pub use events::{Event, EventBus, GameStateEvent, LevelEvent, Topic, TurnEvent};
pub use oracle::{DEFAULT_LAYOUT, LayoutBoard, LayoutError};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
