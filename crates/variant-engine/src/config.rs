//! Game configuration loaded from TOML.
//!
//! A configuration names the game kind and which automatic draw rules apply.
//! Missing keys fall back to a regular game with every draw rule enabled:
//!
//! ```toml
//! kind = "fischer"
//! fischer_seed = 42
//! starting_color = "white"
//!
//! [draw_rules]
//! repetition = true
//! fifty_moves = false
//! ```

use crate::error::ConfigError;
use crate::rules::{DrawRules, GameKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use variant_core::Color;

/// Settings for starting a new game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// The variant to play. Defaults to a regular game.
    pub kind: GameKind,
    /// Seed for the Fischer-random back rank. A fresh layout is drawn
    /// for every game when absent.
    pub fischer_seed: Option<u64>,
    /// Who moves first. Defaults to white.
    pub starting_color: Color,
    /// Automatic draw rules. All enabled by default.
    pub draw_rules: DrawRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            kind: GameKind::default(),
            fischer_seed: None,
            starting_color: Color::White,
            draw_rules: DrawRules::default(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] for malformed TOML or unknown
    /// values, and [`ConfigError::Invalid`] if the settings contradict each
    /// other.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, in
    /// addition to everything [`Self::from_toml_str`] rejects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), kind = ?config.kind, "loaded game config");
        Ok(config)
    }

    /// Checks that the settings make sense together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fischer_seed.is_some() && self.kind != GameKind::Fischer {
            return Err(ConfigError::Invalid(format!(
                "fischer_seed is only used by fischer games, not {:?}",
                self.kind
            )));
        }
        Ok(())
    }
}
