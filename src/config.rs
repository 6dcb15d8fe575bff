//! Match configuration.

use crate::games::othello::Color;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Who controls a side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerKind {
    /// Moves typed at the console.
    Human,
    /// Greedy computer player.
    #[default]
    Greedy,
}

/// Settings for one side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct PlayerSettings {
    /// Who controls this side.
    kind: PlayerKind,

    /// Display name. Defaults to one derived from kind and color.
    #[setters(strip_option)]
    name: Option<String>,
}

impl PlayerSettings {
    /// Creates settings for the given kind with the default name.
    pub fn new(kind: PlayerKind) -> Self {
        Self { kind, name: None }
    }

    /// Name shown in reports for the side playing `color`.
    pub fn display_name(&self, color: Color) -> String {
        match (&self.name, self.kind) {
            (Some(name), _) => name.clone(),
            (None, PlayerKind::Human) => format!("Human ({})", color),
            (None, PlayerKind::Greedy) => format!("Computer ({})", color),
        }
    }
}

/// Configuration for one match.
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// seed = 42
/// max_rejections = 5
///
/// [black]
/// kind = "human"
/// name = "Ada"
///
/// [white]
/// kind = "greedy"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct MatchConfig {
    /// Black's settings.
    black: PlayerSettings,

    /// White's settings.
    white: PlayerSettings,

    /// Seed for the computer players' tie-breaking.
    seed: Option<u64>,

    /// Consecutive rejected or unreadable moves before a match is aborted.
    /// Unbounded when absent.
    max_rejections: Option<u32>,
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            black = %config.black.kind,
            white = %config.white.kind,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Returns the settings for `color`.
    pub fn side(&self, color: Color) -> &PlayerSettings {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
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
