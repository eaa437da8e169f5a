//! World state for one game session
//!
//! The single mutable aggregate the pipeline runs against. Every toggle is a
//! plain field with an inert default. Created once on scene entry, torn down
//! with the scene, never persisted.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Ball, Paddle};
use crate::consts::{
    BALL_SERVE_VEL, BALL_SIZE, PADDLE_MARGIN, PADDLE_SIZE, SLOW_MO_SCALE, TRAIL_CAPACITY,
};

/// Per-side score, incremented only by the rules system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

/// Fixed-capacity ring of recent ball positions, oldest evicted first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    pub fn push(&mut self, pos: Vec2) {
        if self.points.len() == TRAIL_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(pos);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Playfield size, fixed after creation
    pub viewport: Vec2,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub paused: bool,

    // Velocity snapshots: Some only while paused, consumed once on resume
    pub saved_ball_vel: Option<Vec2>,
    pub saved_left_vel: Option<Vec2>,
    pub saved_right_vel: Option<Vec2>,

    /// Left player's goal is invulnerable
    pub god_mode_p1: bool,
    /// Right player's goal is invulnerable
    pub god_mode_p2: bool,

    /// Global slow motion (scales the whole tick's dt)
    pub slow_mo: bool,
    /// Ball-only slow motion, independent of `slow_mo`
    pub slow_ball: bool,
    pub slow_mo_scale: f32,

    pub trail_mode: bool,
    pub trail: Trail,
}

impl World {
    /// Fresh world sized to the host viewport, entities at serve positions.
    pub fn new(viewport: Vec2) -> Self {
        let (vw, vh) = (viewport.x, viewport.y);
        Self {
            viewport,
            left_paddle: Paddle::new(
                Vec2::new(PADDLE_MARGIN, vh / 2.0 - PADDLE_SIZE.y / 2.0),
                PADDLE_SIZE,
            ),
            right_paddle: Paddle::new(
                Vec2::new(
                    vw - PADDLE_MARGIN - PADDLE_SIZE.x,
                    vh / 2.0 - PADDLE_SIZE.y / 2.0,
                ),
                PADDLE_SIZE,
            ),
            ball: Ball::new(
                Vec2::new(vw / 2.0 - BALL_SIZE.x / 2.0, vh / 2.0 - BALL_SIZE.y / 2.0),
                BALL_SERVE_VEL,
            ),
            score: Score::default(),
            paused: false,
            saved_ball_vel: None,
            saved_left_vel: None,
            saved_right_vel: None,
            god_mode_p1: false,
            god_mode_p2: false,
            slow_mo: false,
            slow_ball: false,
            slow_mo_scale: SLOW_MO_SCALE,
            trail_mode: false,
            trail: Trail::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_world_layout() {
        let world = World::new(Vec2::new(640.0, 480.0));

        assert_eq!(world.left_paddle.pos, Vec2::new(20.0, 204.0));
        assert_eq!(world.right_paddle.pos, Vec2::new(608.0, 204.0));
        assert_eq!(world.ball.pos, Vec2::new(315.0, 235.0));
        assert_eq!(world.ball.vel, Vec2::new(-250.0, -200.0));
        assert_eq!(world.score, Score::default());
        assert!(!world.paused);
        assert!(world.saved_ball_vel.is_none());
        assert!(world.trail.is_empty());
    }

    #[test]
    fn test_trail_evicts_oldest() {
        let mut trail = Trail::default();
        for i in 0..(TRAIL_CAPACITY + 5) {
            trail.push(Vec2::new(i as f32, 0.0));
        }

        assert_eq!(trail.len(), TRAIL_CAPACITY);
        // first five entries are gone
        assert_eq!(trail.iter().next().unwrap().x, 5.0);
        assert_eq!(trail.iter().last().unwrap().x, (TRAIL_CAPACITY + 4) as f32);
    }

    #[test]
    fn test_trail_clear() {
        let mut trail = Trail::default();
        trail.push(Vec2::new(1.0, 2.0));
        trail.clear();
        assert!(trail.is_empty());

        // still usable for the next capture
        trail.push(Vec2::new(3.0, 4.0));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_world_serde_round_trip() {
        let mut world = World::new(Vec2::new(640.0, 480.0));
        world.score.left = 3;
        world.trail_mode = true;
        world.trail.push(Vec2::new(1.0, 2.0));

        let json = serde_json::to_string(&world).unwrap();
        let back: World = serde_json::from_str(&json).unwrap();
        assert_eq!(back, world);
    }

    proptest! {
        #[test]
        fn prop_trail_never_exceeds_capacity(pushes in 0usize..200) {
            let mut trail = Trail::default();
            for i in 0..pushes {
                trail.push(Vec2::new(i as f32, i as f32));
            }
            prop_assert!(trail.len() <= TRAIL_CAPACITY);
            prop_assert_eq!(trail.len(), pushes.min(TRAIL_CAPACITY));
        }
    }
}
