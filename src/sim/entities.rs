//! Paddle and ball entities
//!
//! Both are plain position + size + velocity aggregates owned exclusively by
//! the world; systems mutate them through the world each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::{BALL_SIZE, BALL_SPEED, PADDLE_SPEED};

/// A player (or CPU) paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// vx stays 0; vy is written from the movement intent each tick
    pub vel: Vec2,
    /// Maximum vertical speed (units/sec)
    pub speed: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            speed: PADDLE_SPEED,
        }
    }

    /// Collider reflecting the paddle's current position and size
    pub fn collider(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Nominal speed; the live magnitude is in `vel`
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            size: BALL_SIZE,
            vel,
            speed: BALL_SPEED,
        }
    }

    /// Collider reflecting the ball's current position and size
    pub fn collider(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collider_tracks_position() {
        let mut paddle = Paddle::new(Vec2::new(20.0, 100.0), Vec2::new(12.0, 72.0));
        assert_eq!(paddle.collider().pos, Vec2::new(20.0, 100.0));

        paddle.pos.y = 250.0;
        // never cached stale
        assert_eq!(paddle.collider().pos, Vec2::new(20.0, 250.0));
        assert_eq!(paddle.collider().max(), Vec2::new(32.0, 322.0));
    }

    #[test]
    fn test_center_y() {
        let ball = Ball::new(Vec2::new(0.0, 100.0), Vec2::ZERO);
        assert_eq!(ball.center_y(), 105.0);
    }
}
