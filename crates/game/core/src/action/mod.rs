//! Movement resolution and the policies that distinguish actor kinds.
//!
//! [`GridMotion`] resolves a single cardinal step and classifies what, if
//! anything, blocked it. [`Mover`] wraps GridMotion with a [`MovePolicy`] so
//! the player and enemies reuse the same resolution and differ only in cost
//! and interaction handling.
mod movement;
mod policy;

pub use movement::{Direction, GridMotion, MoveError, MoveOutcome, Obstacle};
pub use policy::{EnemyPolicy, Interaction, MovePolicy, MoveResolution, Mover, PlayerPolicy};
