//! Timing configuration for the turn controller.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Per-turn countdown and scheduling delays.
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Seconds each player gets per turn.
    #[serde(default = "default_countdown_secs")]
    countdown_secs: u32,

    /// Delay before the computer plays, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Pause between a result and the next game, in milliseconds.
    #[serde(default = "default_restart_delay_ms")]
    restart_delay_ms: u64,

    /// Length of one countdown second, in milliseconds.
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,
}

fn default_countdown_secs() -> u32 {
    30
}

fn default_computer_delay_ms() -> u64 {
    1000
}

fn default_restart_delay_ms() -> u64 {
    2000
}

fn default_tick_ms() -> u64 {
    1000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            countdown_secs: default_countdown_secs(),
            computer_delay_ms: default_computer_delay_ms(),
            restart_delay_ms: default_restart_delay_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl TimingConfig {
    /// Creates a configuration, rejecting a zero tick length.
    #[instrument]
    pub fn new(
        countdown_secs: u32,
        computer_delay_ms: u64,
        restart_delay_ms: u64,
        tick_ms: u64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            countdown_secs,
            computer_delay_ms,
            restart_delay_ms,
            tick_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading timing config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(?config, "Timing config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::new("tick_ms must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Delay before the computer plays.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    /// Pause before the automatic restart.
    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }

    /// Countdown period.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
