//! Builds the runtime and board layout used by front-ends.
use std::fs;

use anyhow::{Context, Result};
use runtime::{LayoutBoard, Runtime};

use crate::config::BootstrapConfig;

/// Builder that assembles the board layout, runtime, and configuration for clients.
pub struct SessionBuilder {
    config: BootstrapConfig,
    layout: Option<String>,
}

impl SessionBuilder {
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            layout: None,
        }
    }

    /// Loads `.env` (if present) and reads configuration from the environment.
    pub fn from_env() -> Self {
        if let Err(error) = dotenvy::dotenv()
            && !error.not_found()
        {
            tracing::warn!("Failed to load .env: {error}");
        }
        Self::new(BootstrapConfig::from_env())
    }

    /// Use layout text directly instead of reading `layout_path`.
    pub fn layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    fn load_board(&self) -> Result<LayoutBoard> {
        let board = match (&self.layout, &self.config.layout_path) {
            (Some(text), _) => LayoutBoard::parse(text).context("invalid inline board layout")?,
            (None, Some(path)) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read board layout {}", path.display()))?;
                LayoutBoard::parse(&text)
                    .with_context(|| format!("invalid board layout {}", path.display()))?
            }
            (None, None) => LayoutBoard::default_layout().context("invalid built-in layout")?,
        };

        Ok(board.with_enemy_pace(self.config.runtime.game_config.default_enemy_pace))
    }

    pub async fn build(self) -> Result<SessionSetup> {
        let board = self.load_board()?;
        tracing::info!(
            levels = board.level_count(),
            source = ?self.config.layout_path,
            "Board layout loaded"
        );

        let runtime = Runtime::builder()
            .config(self.config.runtime.clone())
            .board_setup(board)
            .build()
            .await?;

        Ok(SessionSetup {
            config: self.config,
            runtime,
        })
    }
}

pub struct SessionSetup {
    pub config: BootstrapConfig,
    pub runtime: Runtime,
}
