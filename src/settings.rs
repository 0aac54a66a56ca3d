//! Game settings and tuning
//!
//! Loaded from a JSON file; every field falls back to the arcade defaults in
//! [`crate::consts`] when omitted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Player;

/// Errors from loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for reproducibility
    pub seed: u64,

    // === Playfield ===
    pub width: u32,
    pub height: u32,

    // === Population ===
    /// Rocks kept on the field
    pub initial_rocks: usize,

    // === Player ===
    pub start_lives: u32,
    pub max_health: i32,
    /// Health restored by a shield pickup
    pub shield_heal: i32,
    /// Frames the ship stays hidden after losing a life
    pub respawn_ticks: u32,
    /// Frames each gun upgrade lasts
    pub gun_duration_ticks: u32,

    // === Drops and effects ===
    /// Probability (0.0 - 1.0) that a destroyed rock drops a power-up
    pub power_drop_chance: f32,
    /// Frames per explosion animation frame
    pub explosion_frame_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,

            width: WIDTH,
            height: HEIGHT,

            initial_rocks: INITIAL_ROCKS,

            start_lives: START_LIVES,
            max_health: MAX_HEALTH,
            shield_heal: SHIELD_HEAL,
            respawn_ticks: RESPAWN_TICKS,
            gun_duration_ticks: GUN_DURATION_TICKS,

            power_drop_chance: POWER_DROP_CHANCE,
            explosion_frame_ticks: EXPLOSION_FRAME_TICKS,
        }
    }
}

impl Settings {
    /// Default settings with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::Invalid {
                field: "width/height",
                reason: "playfield must be non-empty",
            });
        }
        if (self.width as f32) < Player::WIDTH
            || (self.height as f32) < Player::HEIGHT + Player::BOTTOM_MARGIN
        {
            return Err(SettingsError::Invalid {
                field: "width/height",
                reason: "playfield must fit the ship",
            });
        }
        if self.initial_rocks == 0 {
            return Err(SettingsError::Invalid {
                field: "initial_rocks",
                reason: "must be at least 1",
            });
        }
        if !(0.0..=1.0).contains(&self.power_drop_chance) {
            return Err(SettingsError::Invalid {
                field: "power_drop_chance",
                reason: "must be within 0.0 - 1.0",
            });
        }
        if self.start_lives == 0 {
            return Err(SettingsError::Invalid {
                field: "start_lives",
                reason: "must be at least 1",
            });
        }
        if self.max_health <= 0 {
            return Err(SettingsError::Invalid {
                field: "max_health",
                reason: "must be positive",
            });
        }
        if self.shield_heal < 0 {
            return Err(SettingsError::Invalid {
                field: "shield_heal",
                reason: "must not be negative",
            });
        }
        if self.explosion_frame_ticks == 0 {
            return Err(SettingsError::Invalid {
                field: "explosion_frame_ticks",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
