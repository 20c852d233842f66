//! Pixel Racer - A top-down obstacle dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, spawning, collisions, game state)
//! - `session`: Owns a running game plus its seeded spawner
//! - `driver`: Fixed cadence tick timer and host-facing handle
//! - `config`: Data-driven game constants
//! - `autopilot`: Demo mode steering

pub mod autopilot;
pub mod config;
pub mod driver;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig, SpeedRamp};
pub use driver::{Arcade, TickTimer};
pub use session::{Session, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick interval (20 Hz)
    pub const TICK_INTERVAL_MS: u64 = 50;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 300.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player car defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_START_X: f32 = 130.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    /// Distance moved per directional command
    pub const MOVE_STEP: f32 = 30.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 40.0;
    /// Fall rate in units per tick
    pub const INITIAL_SPEED: f32 = 4.0;
    /// Per-tick probability of spawning an obstacle
    pub const SPAWN_CHANCE: f32 = 0.05;
    /// Obstacles at or below this y are removed
    pub const REMOVAL_THRESHOLD: f32 = PLAYFIELD_HEIGHT;

    /// Seed used when the host doesn't supply one
    pub const DEFAULT_SEED: u64 = 0x5eed_cafe;
}
