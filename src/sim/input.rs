//! Directional input handling
//!
//! Key events can arrive at any time, but they only take effect at the start of
//! the next tick. Each axis keeps just its most recent command.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// A discrete steering command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Position change for a command of the given step size
    pub fn delta(self, step: f32) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -step),
            Direction::Down => Vec2::new(0.0, step),
            Direction::Left => Vec2::new(-step, 0.0),
            Direction::Right => Vec2::new(step, 0.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Parse a key name as delivered by a keyboard host
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "Down" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "Left" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "Right" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Commands waiting for the next tick, at most one per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputQueue {
    pub horizontal: Option<Direction>,
    pub vertical: Option<Direction>,
}

impl InputQueue {
    /// Queue a command, replacing any pending command on the same axis
    pub fn push(&mut self, dir: Direction) {
        if dir.is_horizontal() {
            self.horizontal = Some(dir);
        } else {
            self.vertical = Some(dir);
        }
    }

    /// Take pending commands in application order (horizontal, then vertical)
    pub fn drain(&mut self) -> impl Iterator<Item = Direction> + use<> {
        let taken = std::mem::take(self);
        taken.horizontal.into_iter().chain(taken.vertical)
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Move `rect` one step in `dir` if the result stays inside `bounds`.
///
/// Out-of-bounds moves are dropped entirely; there is no partial move.
/// Returns whether the move was applied.
pub fn try_move(rect: &mut Rect, dir: Direction, step: f32, bounds: Vec2) -> bool {
    let moved = rect.translated(dir.delta(step));
    if moved.within(bounds) {
        *rect = moved;
        true
    } else {
        false
    }
}
