//! Match configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// What happens when a submitted move would leave the mover's own king attacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfCheckPolicy {
    /// Refuse the move; the player may submit another.
    #[default]
    Reject,
    /// The mover loses the game.
    Forfeit,
}

impl std::str::FromStr for SelfCheckPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(SelfCheckPolicy::Reject),
            "forfeit" => Ok(SelfCheckPolicy::Forfeit),
            other => Err(format!("unknown self-check policy: {other}")),
        }
    }
}

/// Per-match settings.
///
/// ```toml
/// self_check_policy = "forfeit"
/// start_fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub self_check_policy: SelfCheckPolicy,
    /// Custom starting position. The standard setup when absent.
    #[serde(default)]
    pub start_fen: Option<String>,
}

impl MatchConfig {
    /// Loads configuration from `path`, or the defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_policy(mut self, policy: SelfCheckPolicy) -> Self {
        self.self_check_policy = policy;
        self
    }
}
