//! Runtime configuration for the paced computer opponent.
//!
//! Loaded from TOML; every field has a default, so an empty or missing
//! file is valid:
//!
//! ```toml
//! [computer]
//! delay_ms = 500
//! hard_trap = true
//! seed = 7
//! ```

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Longest pacing delay accepted from a config file.
pub const MAX_DELAY_MS: u64 = 10_000;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct PlayConfig {
    /// Computer opponent settings.
    #[serde(default)]
    computer: ComputerConfig,
}

/// How the computer seat behaves.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct ComputerConfig {
    /// Pause before the computer answers, in milliseconds.
    #[serde(default = "default_delay_ms")]
    delay_ms: u64,

    /// Hard difficulty plays the beatable search.
    #[serde(default = "default_hard_trap")]
    hard_trap: bool,

    /// Seed for the random strategies; OS entropy when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_delay_ms() -> u64 {
    500
}

fn default_hard_trap() -> bool {
    true
}

impl Default for ComputerConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            hard_trap: default_hard_trap(),
            seed: None,
        }
    }
}

impl ComputerConfig {
    /// Pacing delay as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Random source for the computer, seeded if configured.
    #[instrument(skip(self), fields(seed = ?self.seed))]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl PlayConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            delay_ms = config.computer.delay_ms,
            hard_trap = config.computer.hard_trap,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.computer.delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::new(format!(
                "computer.delay_ms must be at most {} (got {})",
                MAX_DELAY_MS, self.computer.delay_ms
            )));
        }
        Ok(())
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
    /// Creates a new configuration error at the caller's location.
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
