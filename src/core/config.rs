//! Game configuration with documented constants
//!
//! Tunables for the chat challenge, the credit budget and time tracking are
//! collected here. Defaults reproduce the shipped game; a TOML file can
//! override any subset of them.

use crate::core::error::{HuzzError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub chat: ChatConfig,
    pub credits: CreditConfig,
    pub time: TimeConfig,
    pub storage: StorageConfig,
}

/// Final-boss chat tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// User turns allowed per playthrough
    pub message_budget: u32,

    /// Interest level at the start of a playthrough (0-100)
    pub initial_interest: u8,

    /// Smoothness level at the start of a playthrough (0-100)
    pub initial_smoothness: u8,

    /// Simulated "typing" pause before a reply is shown
    ///
    /// The shipped game waits for the reply future only; 0 keeps that
    /// behaviour. The terminal front-end sets a small value for feel.
    pub typing_delay_ms: u64,

    /// Seed for the rule-based responder's line picks
    pub rng_seed: u64,

    /// Whether the external reply generator is consulted at all
    pub external_replies: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            message_budget: 10,
            initial_interest: 50,
            initial_smoothness: 50,
            typing_delay_ms: 0,
            rng_seed: 42,
            external_replies: true,
        }
    }
}

/// Credit budget for external reply generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditConfig {
    /// Credits granted on first run and on reset
    pub initial: u32,

    /// Credits spent per external call
    pub per_request: u32,
}

impl Default for CreditConfig {
    fn default() -> Self {
        Self {
            initial: 1000,
            per_request: 1,
        }
    }
}

/// Time-spent tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Seconds between time-spent ticks; each tick credits one minute
    pub tick_interval_secs: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 60,
        }
    }
}

/// Where the file store keeps its records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".huzzlingo"),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.chat.message_budget == 0 {
            return Err(HuzzError::InvalidConfig(
                "chat.message_budget must be at least 1".into(),
            ));
        }

        if self.chat.initial_interest > 100 || self.chat.initial_smoothness > 100 {
            return Err(HuzzError::InvalidConfig(format!(
                "initial levels must be within 0-100 (interest {}, smoothness {})",
                self.chat.initial_interest, self.chat.initial_smoothness
            )));
        }

        if self.credits.per_request == 0 {
            return Err(HuzzError::InvalidConfig(
                "credits.per_request must be positive".into(),
            ));
        }

        if self.time.tick_interval_secs == 0 {
            return Err(HuzzError::InvalidConfig(
                "time.tick_interval_secs must be positive".into(),
            ));
        }

        Ok(())
    }
}
