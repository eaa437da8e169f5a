//! 2D geometry and physics primitives
//!
//! Pure math over `glam::Vec2`. Colliders are derived from an entity's
//! current position and size at query time, never stored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Advance a position by one Euler step: `p' = p + v * dt`.
///
/// Slow-motion scaling happens by scaling `dt` at the call site, not here.
#[inline]
pub fn advance(pos: Vec2, vel: Vec2, dt: f32) -> Vec2 {
    pos + vel * dt
}

/// Axis-aligned rectangle collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// AABB overlap test, half-open on the max edge: rectangles that merely
    /// touch do not intersect, so exact contact resolves at most once.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && other.pos.x < self.pos.x + self.size.x
            && self.pos.y < other.pos.y + other.size.y
            && other.pos.y < self.pos.y + self.size.y
    }
}

/// Vertical playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn from_height(height: f32) -> Self {
        Self {
            top: 0.0,
            bottom: height,
        }
    }

    /// Reflect a moving rect off the top or bottom bound: clamp the offending
    /// coordinate back inside and negate vy. Returns whether a bounce fired.
    pub fn vertical_bounce(&self, pos: &mut Vec2, vel: &mut Vec2, size: Vec2) -> bool {
        if pos.y < self.top {
            pos.y = self.top;
            vel.y = -vel.y;
            return true;
        }
        if pos.y + size.y > self.bottom {
            pos.y = self.bottom - size.y;
            vel.y = -vel.y;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_advance_euler_step() {
        let pos = advance(Vec2::new(10.0, 20.0), Vec2::new(100.0, -50.0), 0.1);
        assert_eq!(pos, Vec2::new(20.0, 15.0));
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        // half-open convention: a.max.x == b.min.x is not a hit
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_rect_disjoint() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_bounce_top_clamps_and_flips() {
        let bounds = Bounds::from_height(480.0);
        let mut pos = Vec2::new(100.0, -3.0);
        let mut vel = Vec2::new(250.0, -200.0);

        let bounced = bounds.vertical_bounce(&mut pos, &mut vel, Vec2::new(10.0, 10.0));
        assert!(bounced);
        assert_eq!(pos.y, 0.0);
        assert_eq!(vel.y, 200.0);
        assert_eq!(vel.x, 250.0);
    }

    #[test]
    fn test_bounce_bottom_clamps_and_flips() {
        let bounds = Bounds::from_height(480.0);
        let mut pos = Vec2::new(100.0, 475.0);
        let mut vel = Vec2::new(250.0, 200.0);

        let bounced = bounds.vertical_bounce(&mut pos, &mut vel, Vec2::new(10.0, 10.0));
        assert!(bounced);
        assert_eq!(pos.y, 470.0);
        assert_eq!(vel.y, -200.0);
    }

    #[test]
    fn test_no_bounce_inside_bounds() {
        let bounds = Bounds::from_height(480.0);
        let mut pos = Vec2::new(100.0, 200.0);
        let mut vel = Vec2::new(250.0, 200.0);

        assert!(!bounds.vertical_bounce(&mut pos, &mut vel, Vec2::new(10.0, 10.0)));
        assert_eq!(pos.y, 200.0);
        assert_eq!(vel.y, 200.0);
    }

    proptest! {
        #[test]
        fn prop_bounce_keeps_rect_inside(y in -200.0f32..700.0, vy in -400.0f32..400.0) {
            let bounds = Bounds::from_height(480.0);
            let size = Vec2::new(10.0, 10.0);
            let mut pos = Vec2::new(100.0, y);
            let mut vel = Vec2::new(250.0, vy);

            bounds.vertical_bounce(&mut pos, &mut vel, size);

            // any out-of-bounds coordinate must have been clamped back
            prop_assert!(pos.y >= 0.0);
            prop_assert!(pos.y <= 480.0 - size.y);
        }

        #[test]
        fn prop_bounce_never_changes_horizontal(y in -200.0f32..700.0) {
            let bounds = Bounds::from_height(480.0);
            let mut pos = Vec2::new(100.0, y);
            let mut vel = Vec2::new(250.0, -200.0);

            bounds.vertical_bounce(&mut pos, &mut vel, Vec2::new(10.0, 10.0));

            prop_assert_eq!(pos.x, 100.0);
            prop_assert_eq!(vel.x, 250.0);
        }
    }
}
