//! Game configuration
//!
//! Every tunable constant lives in [`GameConfig`]. Defaults mirror
//! [`crate::consts`]; hosts may load overrides from JSON before a game starts.
//! A config is fixed for the lifetime of a game.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{entity} of {size} does not fit a {playfield} playfield")]
    DoesNotFit {
        entity: &'static str,
        size: Vec2,
        playfield: Vec2,
    },

    #[error("player start {start} is outside the playfield bounds")]
    StartOutOfBounds { start: Vec2 },

    #[error("spawn chance must be within [0, 1], got {0}")]
    SpawnChance(f32),

    #[error("removal threshold must be within (0, {height}], got {threshold}")]
    RemovalThreshold { threshold: f32, height: f32 },

    #[error("invalid speed ramp: {0}")]
    SpeedRamp(&'static str),
}

/// Optional difficulty curve: obstacles fall faster the longer the player survives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRamp {
    /// Surviving ticks between speed increases
    pub every_ticks: u64,
    /// Added to the fall speed at each step
    pub increment: f32,
    /// Speed never exceeds this
    pub max_speed: f32,
}

impl SpeedRamp {
    /// Speed after surviving `score` ticks, given the current speed
    pub fn apply(&self, speed: f32, score: u64) -> f32 {
        if score > 0 && score.is_multiple_of(self.every_ticks) {
            (speed + self.increment).min(self.max_speed)
        } else {
            speed
        }
    }
}

/// All simulation constants for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Distance the player moves per directional command
    pub step: f32,
    /// Playfield width and height
    pub playfield: Vec2,
    pub player_size: Vec2,
    /// Where the player is placed at start and on every restart
    pub player_start: Vec2,
    pub obstacle_size: Vec2,
    /// Obstacle fall rate at the start of a round
    pub initial_speed: f32,
    /// Bernoulli probability of a spawn each tick
    pub spawn_chance: f32,
    /// Obstacles whose y reaches this value are pruned
    pub removal_threshold: f32,
    pub speed_ramp: Option<SpeedRamp>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            step: MOVE_STEP,
            playfield: Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            obstacle_size: Vec2::splat(OBSTACLE_SIZE),
            initial_speed: INITIAL_SPEED,
            spawn_chance: SPAWN_CHANCE,
            removal_threshold: REMOVAL_THRESHOLD,
            speed_ramp: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Tick interval as a `Duration`
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }

    /// Largest x (or y) the player may occupy
    pub fn player_max(&self) -> Vec2 {
        self.playfield - self.player_size
    }

    /// Largest x an obstacle may spawn at
    pub fn obstacle_max_x(&self) -> f32 {
        self.playfield.x - self.obstacle_size.x
    }

    /// Check that the constants describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "tick_interval_ms",
                value: 0.0,
            });
        }

        let positive = [
            ("step", self.step),
            ("playfield.width", self.playfield.x),
            ("playfield.height", self.playfield.y),
            ("player_size.width", self.player_size.x),
            ("player_size.height", self.player_size.y),
            ("obstacle_size.width", self.obstacle_size.x),
            ("obstacle_size.height", self.obstacle_size.y),
            ("initial_speed", self.initial_speed),
        ];
        // `!(v > 0.0)` also catches NaN
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(ConfigError::NonPositive { field, value });
        }

        if self.player_size.cmpgt(self.playfield).any() {
            return Err(ConfigError::DoesNotFit {
                entity: "player",
                size: self.player_size,
                playfield: self.playfield,
            });
        }
        if self.obstacle_size.cmpgt(self.playfield).any() {
            return Err(ConfigError::DoesNotFit {
                entity: "obstacle",
                size: self.obstacle_size,
                playfield: self.playfield,
            });
        }

        let start = self.player_start;
        if start.cmplt(Vec2::ZERO).any() || start.cmpgt(self.player_max()).any() {
            return Err(ConfigError::StartOutOfBounds { start });
        }

        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::SpawnChance(self.spawn_chance));
        }

        let height = self.playfield.y;
        if !(self.removal_threshold > 0.0 && self.removal_threshold <= height) {
            return Err(ConfigError::RemovalThreshold {
                threshold: self.removal_threshold,
                height,
            });
        }

        if let Some(ramp) = &self.speed_ramp {
            if ramp.every_ticks == 0 {
                return Err(ConfigError::SpeedRamp("every_ticks must be at least 1"));
            }
            if !(ramp.increment >= 0.0) {
                return Err(ConfigError::SpeedRamp("increment must not be negative"));
            }
            if !(ramp.max_speed >= self.initial_speed) {
                return Err(ConfigError::SpeedRamp(
                    "max_speed must not be below initial_speed",
                ));
            }
        }

        Ok(())
    }
}
