//! Procedural obstacle spawning
//!
//! Each tick is an independent Bernoulli trial. Randomness comes from a
//! [`SpawnSource`] so tests can swap the seeded RNG for a fixed script.

use std::collections::VecDeque;

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::GameState;

/// Source of spawn decisions and placements
pub trait SpawnSource {
    /// Uniform sample in `[0, 1)` compared against the spawn chance
    fn chance(&mut self) -> f32;
    /// Horizontal position in `[0, max_x]`
    fn lane(&mut self, max_x: f32) -> f32;
}

impl SpawnSource for Pcg32 {
    fn chance(&mut self) -> f32 {
        self.random::<f32>()
    }

    fn lane(&mut self, max_x: f32) -> f32 {
        if max_x <= 0.0 {
            return 0.0;
        }
        self.random_range(0.0..=max_x)
    }
}

/// Deterministic spawn script: `Some(x)` spawns at `x`, `None` skips a tick.
///
/// Once the script runs out, no more obstacles spawn.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSpawns {
    script: VecDeque<Option<f32>>,
    pending_x: Option<f32>,
}

impl ScriptedSpawns {
    pub fn new(script: impl IntoIterator<Item = Option<f32>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            pending_x: None,
        }
    }

    /// A source that never spawns
    pub fn never() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SpawnSource for ScriptedSpawns {
    fn chance(&mut self) -> f32 {
        match self.script.pop_front().flatten() {
            Some(x) => {
                self.pending_x = Some(x);
                0.0
            }
            None => 1.0,
        }
    }

    fn lane(&mut self, max_x: f32) -> f32 {
        self.pending_x.take().unwrap_or(0.0).clamp(0.0, max_x.max(0.0))
    }
}

/// Roll for a spawn this tick. Returns the new obstacle's id if one appeared.
pub fn maybe_spawn<S: SpawnSource + ?Sized>(state: &mut GameState, source: &mut S) -> Option<u32> {
    if source.chance() >= state.config.spawn_chance {
        return None;
    }
    let x = source.lane(state.config.obstacle_max_x());
    let id = state.spawn_obstacle_at(x);
    log::debug!("Spawned obstacle {} at x={:.1}", id, x);
    Some(id)
}
