//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, logging setup, and runtime assembly that
//! can be reused by any front-end crate.
pub mod builder;
pub mod config;
pub mod logging;

pub use builder::{SessionBuilder, SessionSetup};
pub use config::BootstrapConfig;
pub use logging::setup_logging;
