//! Field dimensions and gameplay tuning.
//!
//! Every gameplay number the engine uses comes from `Tuning`, whose defaults
//! are the constants in `crate::constants`. Hosts may load overrides from JSON;
//! missing keys fall back to the defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Play-field extent, in the same units as all positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for FieldDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

impl FieldDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field.width", self.width)?;
        positive("field.height", self.height)
    }
}

/// Gameplay tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_width: f64,
    pub player_height: f64,
    pub player_speed: f64,
    pub player_attack_cooldown_ms: f64,
    pub initial_health: i32,

    pub projectile_width: f64,
    pub projectile_height: f64,
    pub projectile_speed: f64,
    pub projectile_exit_margin: f64,

    pub hostile_width: f64,
    pub hostile_height: f64,
    pub hostile_speed: f64,
    pub hostile_exit_x: f64,

    pub initial_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub spawn_interval_factor: f64,
    pub initial_required_kills: u32,
    pub required_kills_per_wave: u32,

    pub special_attack_cooldown_ms: f64,

    /// Deltas above this are clamped before simulation.
    pub max_frame_delta_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_attack_cooldown_ms: PLAYER_ATTACK_COOLDOWN_MS,
            initial_health: INITIAL_HEALTH,
            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            projectile_speed: PROJECTILE_SPEED,
            projectile_exit_margin: PROJECTILE_EXIT_MARGIN,
            hostile_width: HOSTILE_WIDTH,
            hostile_height: HOSTILE_HEIGHT,
            hostile_speed: HOSTILE_SPEED,
            hostile_exit_x: HOSTILE_EXIT_X,
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_factor: SPAWN_INTERVAL_FACTOR,
            initial_required_kills: INITIAL_REQUIRED_KILLS,
            required_kills_per_wave: REQUIRED_KILLS_PER_WAVE,
            special_attack_cooldown_ms: SPECIAL_ATTACK_COOLDOWN_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON. Unlisted keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("player_speed", self.player_speed)?;
        positive("player_attack_cooldown_ms", self.player_attack_cooldown_ms)?;
        if self.initial_health <= 0 {
            return Err(ConfigError::NotPositive {
                field: "initial_health",
                value: self.initial_health as f64,
            });
        }
        positive("projectile_width", self.projectile_width)?;
        positive("projectile_height", self.projectile_height)?;
        positive("projectile_speed", self.projectile_speed)?;
        non_negative("projectile_exit_margin", self.projectile_exit_margin)?;
        positive("hostile_width", self.hostile_width)?;
        positive("hostile_height", self.hostile_height)?;
        positive("hostile_speed", self.hostile_speed)?;
        positive("initial_spawn_interval_ms", self.initial_spawn_interval_ms)?;
        positive("min_spawn_interval_ms", self.min_spawn_interval_ms)?;
        if self.min_spawn_interval_ms > self.initial_spawn_interval_ms {
            return Err(ConfigError::InvertedRange {
                low: "min_spawn_interval_ms",
                high: "initial_spawn_interval_ms",
            });
        }
        if !(self.spawn_interval_factor > 0.0 && self.spawn_interval_factor <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "spawn_interval_factor",
                value: self.spawn_interval_factor,
            });
        }
        if self.initial_required_kills == 0 {
            return Err(ConfigError::NotPositive {
                field: "initial_required_kills",
                value: 0.0,
            });
        }
        positive("special_attack_cooldown_ms", self.special_attack_cooldown_ms)?;
        positive("max_frame_delta_ms", self.max_frame_delta_ms)
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON could not be parsed into the expected shape.
    Parse(String),
    NotPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    OutOfRange { field: &'static str, value: f64 },
    InvertedRange { low: &'static str, high: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "invalid tuning JSON: {msg}"),
            ConfigError::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            ConfigError::OutOfRange { field, value } => {
                write!(f, "{field} is out of range: {value}")
            }
            ConfigError::InvertedRange { low, high } => {
                write!(f, "{low} must not exceed {high}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
