//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use runtime::RuntimeConfig;
use tracing::Level;

/// Configuration required to bootstrap a game session.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    pub runtime: RuntimeConfig,
    pub log_level: Level,
    /// Board layout file; the built-in layout is used when unset.
    pub layout_path: Option<PathBuf>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            log_level: Level::INFO,
            layout_path: None,
        }
    }
}

impl BootstrapConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TURN_DELAY_MS` - Lead-in before enemies act (default: 100)
    /// - `LEVEL_START_DELAY_MS` - Title card duration (default: 2000)
    /// - `STARTING_FOOD` - Food for the first level (default: 100)
    /// - `TICK_INTERVAL_MS` - Scheduler step period (default: 16)
    /// - `LOG_LEVEL` - trace, debug, info, warn, or error (default: info)
    /// - `BOARD_LAYOUT_PATH` - Layout file (default: built-in layout)
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let game = &mut config.runtime.game_config;

        if let Some(ms) = read_var::<u64>(&lookup, "TURN_DELAY_MS") {
            game.turn_delay = Duration::from_millis(ms);
        }

        if let Some(ms) = read_var::<u64>(&lookup, "LEVEL_START_DELAY_MS") {
            game.level_start_delay = Duration::from_millis(ms);
        }

        if let Some(food) = read_var::<i32>(&lookup, "STARTING_FOOD") {
            game.starting_food = food.max(1);
        }

        // A zero period would make the tokio interval panic.
        if let Some(ms) = read_var::<u64>(&lookup, "TICK_INTERVAL_MS") {
            config.runtime.tick_interval = Duration::from_millis(ms.max(1));
        }

        if let Some(level) = read_var::<Level>(&lookup, "LOG_LEVEL") {
            config.log_level = level;
        }

        config.layout_path = lookup("BOARD_LAYOUT_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        config
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
