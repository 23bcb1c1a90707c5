//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need.

mod bus;
mod extractor;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use extractor::{extract_events, resolution_events};
pub use types::{GameStateEvent, LevelEvent, TurnEvent};
