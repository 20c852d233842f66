//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. The randomness
//! source is kept outside so tests can inject their own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::{Direction, InputQueue, try_move};
use super::rect::Rect;
use crate::config::GameConfig;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticking, accepting input
    Running,
    /// Car crashed; waiting for restart
    GameOver,
}

/// The player's car
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
}

impl Player {
    pub fn new(start: Vec2, size: Vec2) -> Self {
        Self {
            rect: Rect::new(start, size),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.rect.pos
    }
}

/// A falling obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Unique, increasing in creation order
    pub id: u32,
    pub rect: Rect,
}

impl Obstacle {
    /// Move down by `speed` units
    pub fn fall(&mut self, speed: f32) {
        self.rect.pos.y += speed;
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Constants this game was created with
    pub config: GameConfig,
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    /// Ticks survived since the last (re)start
    pub score: u64,
    /// Current obstacle fall rate
    pub speed: f32,
    /// Ticks executed since the last (re)start, including the crash tick
    pub time_ticks: u64,
    /// Commands waiting for the next tick
    pub pending: InputQueue,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a running game from a (validated) config
    pub fn new(config: GameConfig) -> Self {
        Self {
            phase: GamePhase::Running,
            player: Player::new(config.player_start, config.player_size),
            obstacles: Vec::new(),
            score: 0,
            speed: config.initial_speed,
            time_ticks: 0,
            pending: InputQueue::default(),
            next_id: 1,
            config,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Queue a steering command for the next tick. Ignored after a crash.
    pub fn press(&mut self, dir: Direction) {
        if self.is_running() {
            self.pending.push(dir);
        }
    }

    /// Apply queued commands to the player, dropping any that would leave the playfield
    pub fn apply_pending_input(&mut self) {
        let step = self.config.step;
        let bounds = self.config.playfield;
        for dir in self.pending.drain() {
            if !try_move(&mut self.player.rect, dir, step, bounds) {
                log::trace!("Dropped {:?}: would leave playfield", dir);
            }
        }
    }

    /// Add an obstacle at the top of the playfield
    pub fn spawn_obstacle_at(&mut self, x: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            rect: Rect::new(Vec2::new(x, 0.0), self.config.obstacle_size),
        });
        id
    }

    /// Remove obstacles that have fallen past the removal threshold
    pub fn prune_obstacles(&mut self) {
        let threshold = self.config.removal_threshold;
        self.obstacles.retain(|o| o.rect.pos.y < threshold);
    }

    /// Count one more survived tick and escalate speed if a ramp is configured
    pub fn record_survival(&mut self) {
        self.score += 1;
        if let Some(ramp) = &self.config.speed_ramp {
            let speed = ramp.apply(self.speed, self.score);
            if speed > self.speed {
                log::debug!("Speed up: {:.2} -> {:.2} at score {}", self.speed, speed, self.score);
                self.speed = speed;
            }
        }
    }

    /// End the round
    pub fn crash(&mut self) {
        self.phase = GamePhase::GameOver;
        self.pending.clear();
        log::info!("Game over - score {}", self.score);
    }

    /// Start a fresh round. Only valid after a crash; returns false otherwise.
    ///
    /// Obstacle IDs keep counting up across restarts.
    pub fn restart(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.player = Player::new(self.config.player_start, self.config.player_size);
        self.obstacles.clear();
        self.score = 0;
        self.speed = self.config.initial_speed;
        self.time_ticks = 0;
        self.pending.clear();
        self.phase = GamePhase::Running;
        log::info!("Round restarted");
        true
    }
}
