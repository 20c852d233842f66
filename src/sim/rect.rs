//! Axis-aligned rectangle geometry for the car and obstacles
//!
//! Playfield-local coordinates: the origin is the top-left corner and y grows
//! downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test. Rectangles that only share an edge don't intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Whether this rectangle lies fully inside `[0, bounds.x] x [0, bounds.y]`
    pub fn within(&self, bounds: Vec2) -> bool {
        self.pos.cmpge(Vec2::ZERO).all() && (self.pos + self.size).cmple(bounds).all()
    }

    /// Copy of this rectangle moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.pos + delta, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_edges() {
        let r = rect(130.0, 500.0, 40.0, 60.0);
        assert_eq!(r.left(), 130.0);
        assert_eq!(r.right(), 170.0);
        assert_eq!(r.top(), 500.0);
        assert_eq!(r.bottom(), 560.0);
    }

    #[test]
    fn test_intersects_overlap() {
        let car = rect(130.0, 500.0, 40.0, 60.0);
        let rock = rect(140.0, 540.0, 40.0, 40.0);
        assert!(car.intersects(&rock));
        assert!(rock.intersects(&car));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let car = rect(130.0, 500.0, 40.0, 60.0);
        // Directly above, bottom edge touching the car's top
        assert!(!car.intersects(&rect(130.0, 460.0, 40.0, 40.0)));
        // Directly left, right edge touching the car's left
        assert!(!car.intersects(&rect(90.0, 500.0, 40.0, 40.0)));
    }

    #[test]
    fn test_contained_rect_intersects() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(10.0, 10.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_within_bounds() {
        let bounds = Vec2::new(300.0, 600.0);
        assert!(rect(0.0, 0.0, 40.0, 60.0).within(bounds));
        assert!(rect(260.0, 540.0, 40.0, 60.0).within(bounds));
        assert!(!rect(-1.0, 0.0, 40.0, 60.0).within(bounds));
        assert!(!rect(261.0, 0.0, 40.0, 60.0).within(bounds));
        assert!(!rect(0.0, 541.0, 40.0, 60.0).within(bounds));
    }

    #[test]
    fn test_translated() {
        let r = rect(10.0, 20.0, 5.0, 5.0).translated(Vec2::new(-10.0, 4.0));
        assert_eq!(r.pos, Vec2::new(0.0, 24.0));
        assert_eq!(r.size, Vec2::new(5.0, 5.0));
    }
}
