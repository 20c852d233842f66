//! A single player's game session
//!
//! Bundles the simulation state with its seeded spawner and tracks teardown.
//! Once torn down, input, ticks and restarts are silently ignored.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::DEFAULT_SEED;
use crate::sim::{Direction, GamePhase, GameState, Obstacle, Rect, TickOutcome, tick};

/// What collaborators (renderers, HUDs, tests) may observe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Rect,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub speed: f32,
    pub phase: GamePhase,
    pub time_ticks: u64,
}

impl Snapshot {
    fn of(state: &GameState) -> Self {
        Self {
            player: state.player.rect,
            obstacles: state.obstacles.clone(),
            score: state.score,
            speed: state.speed,
            phase: state.phase,
            time_ticks: state.time_ticks,
        }
    }
}

/// Game state plus the RNG that feeds its spawner
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    rng: Pcg32,
    seed: u64,
    torn_down: bool,
}

impl Session {
    /// Start a new running game. The config must already be validated.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid config: {:?}",
            config.validate()
        );
        log::info!("Session started with seed: {}", seed);
        Self {
            state: GameState::new(config),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            torn_down: false,
        }
    }

    pub fn with_default_seed(config: GameConfig) -> Self {
        Self::new(config, DEFAULT_SEED)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Queue a steering command for the next tick
    pub fn press(&mut self, dir: Direction) {
        if !self.torn_down {
            self.state.press(dir);
        }
    }

    /// Run one tick. Returns `None` after teardown.
    pub fn step(&mut self) -> Option<TickOutcome> {
        if self.torn_down {
            return None;
        }
        Some(tick(&mut self.state, &mut self.rng))
    }

    /// Restart after a crash. Returns whether a new round started.
    pub fn restart(&mut self) -> bool {
        !self.torn_down && self.state.restart()
    }

    /// Detach the session; everything afterwards is a no-op
    pub fn teardown(&mut self) {
        if !self.torn_down {
            log::debug!("Session torn down at score {}", self.state.score);
            self.torn_down = true;
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }
}
