//! Board setup collaborators backed by static content.
//!
//! Layout data is immutable at runtime; dynamic state lives in
//! [`game_core::GameState`] inside the simulation worker.
mod layout;

pub use layout::{DEFAULT_LAYOUT, LayoutBoard, LayoutError};
