//! Collision detection between the car and falling obstacles
//!
//! Plain AABB overlap. A tick only cares whether *any* obstacle hits the car,
//! so the answer is a single boolean and iteration order never leaks out.

use super::rect::Rect;
use super::state::Obstacle;

/// Symmetric AABB overlap test
#[inline]
pub fn collides(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Whether the player overlaps at least one obstacle
pub fn any_overlap(player: &Rect, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|obstacle| collides(player, &obstacle.rect))
}

/// Number of obstacles currently overlapping the player
pub fn overlap_count(player: &Rect, obstacles: &[Obstacle]) -> usize {
    obstacles
        .iter()
        .filter(|obstacle| collides(player, &obstacle.rect))
        .count()
}
