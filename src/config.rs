use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::geometry::{Direction, Position};

pub const WINDOW_WIDTH: i32 = 500;
pub const WINDOW_HEIGHT: i32 = 300;
pub const SNAKE_ICON_WIDTH: i32 = 15;
pub const PREY_ICON_WIDTH: i32 = 10;
/// How close a prey center may get to the walls.
pub const PREY_MARGIN: i32 = 15;
pub const TICK_MS: u64 = 150;
pub const REFRESH_MS: u64 = 100;
pub const MIN_START_LENGTH: usize = 5;

const CONFIG_FILE: &str = "snake_config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub step: i32,
    pub prey_size: i32,
    pub prey_margin: i32,
    pub tick_ms: u64,
    pub refresh_ms: u64,
    pub seed: Option<u64>,
    /// Tail first, head last.
    pub start_body: Vec<Position>,
    pub start_direction: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            step: SNAKE_ICON_WIDTH,
            prey_size: PREY_ICON_WIDTH,
            prey_margin: PREY_MARGIN,
            tick_ms: TICK_MS,
            refresh_ms: REFRESH_MS,
            seed: None,
            start_body: vec![
                Position::new(495, 55),
                Position::new(485, 55),
                Position::new(475, 55),
                Position::new(465, 55),
                Position::new(455, 55),
            ],
            start_direction: Direction::Left,
        }
    }
}

impl GameConfig {
    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Reads a config file. A missing file is not an error and yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, "falling back to default config");
                Self::default()
            }
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid("window must have a positive size"));
        }
        if self.step <= 0 || self.prey_size <= 0 {
            return Err(ConfigError::Invalid("step and prey size must be positive"));
        }
        let short_side = self.width.min(self.height);
        if self.step > short_side {
            return Err(ConfigError::Invalid("step must fit inside the window"));
        }
        if self.prey_margin < 0 || self.prey_margin > short_side / 2 {
            return Err(ConfigError::Invalid("prey margin does not fit inside the window"));
        }
        if self.tick_ms == 0 || self.refresh_ms == 0 {
            return Err(ConfigError::Invalid("tick and refresh intervals must be non-zero"));
        }
        if self.start_body.len() < MIN_START_LENGTH {
            return Err(ConfigError::Invalid("snake needs at least five segments"));
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}
