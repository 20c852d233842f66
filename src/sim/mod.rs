//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected randomness only (seeded RNG or a script)
//! - Stable iteration order (by entity ID)
//! - No rendering, timer or platform dependencies

pub mod collision;
pub mod input;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{any_overlap, collides};
pub use input::{Direction, InputQueue, try_move};
pub use rect::Rect;
pub use spawn::{ScriptedSpawns, SpawnSource, maybe_spawn};
pub use state::{GamePhase, GameState, Obstacle, Player};
pub use tick::{TickOutcome, tick};
