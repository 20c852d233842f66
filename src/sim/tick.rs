//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one step, in this order:
//! input -> obstacle fall -> spawn -> collision -> score & prune.
//! Collision must follow the fall; swapping them shifts hit timing by a tick.

use serde::{Deserialize, Serialize};

use super::collision::{any_overlap, overlap_count};
use super::spawn::{SpawnSource, maybe_spawn};
use super::state::GameState;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Round continues; `score` already includes this tick
    Survived { score: u64, spawned: Option<u32> },
    /// The car hit an obstacle this tick; `score` is the final score
    Crashed { score: u64 },
    /// Game is over, nothing was simulated
    Halted,
}

impl TickOutcome {
    /// Whether the loop should stop after this tick
    pub fn ends_round(&self) -> bool {
        !matches!(self, TickOutcome::Survived { .. })
    }
}

/// Advance the game state by one fixed timestep
pub fn tick<S: SpawnSource + ?Sized>(state: &mut GameState, source: &mut S) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::Halted;
    }

    state.time_ticks += 1;

    state.apply_pending_input();

    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.fall(speed);
    }

    let spawned = maybe_spawn(state, source);

    if any_overlap(&state.player.rect, &state.obstacles) {
        log::debug!(
            "Car hit {} obstacle(s) on tick {}",
            overlap_count(&state.player.rect, &state.obstacles),
            state.time_ticks
        );
        state.crash();
        // Obstacles still in view stay frozen; anything past the bottom goes now
        state.prune_obstacles();
        return TickOutcome::Crashed { score: state.score };
    }

    state.record_survival();
    state.prune_obstacles();

    log::trace!(
        "tick {} score={} obstacles={}",
        state.time_ticks,
        state.score,
        state.obstacles.len()
    );

    TickOutcome::Survived {
        score: state.score,
        spawned,
    }
}
