//! CPU paddle controller and difficulty presets
//!
//! The controller is a heuristic, not a planner: it reacts to the current
//! ball/paddle geometry and nothing else. Its only state is an aim offset
//! sampled once at construction from a seeded RNG, so identical seeds replay
//! identically.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Ball, Paddle};

/// Which goal a controller defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// CPU difficulty settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuConfig {
    /// How fast the CPU paddle moves (units/sec)
    pub max_speed: f32,
    /// Hold still when the target is closer than this (kills jitter)
    pub dead_zone: f32,
    /// Ignore the ball while it is farther away than this
    pub reaction_distance: f32,
    /// Vertical aim error range; larger margins miss more
    pub error_margin: f32,
    /// Reserved for future inertia smoothing
    pub inertia_factor: f32,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl CpuConfig {
    pub const EASY: CpuConfig = CpuConfig {
        max_speed: 65.0,
        dead_zone: 16.0,
        reaction_distance: 180.0,
        error_margin: 24.0,
        inertia_factor: 1.0,
    };

    pub const NORMAL: CpuConfig = CpuConfig {
        max_speed: 160.0,
        dead_zone: 12.0,
        reaction_distance: 260.0,
        error_margin: 14.0,
        inertia_factor: 1.0,
    };

    pub const HARD: CpuConfig = CpuConfig {
        max_speed: 260.0,
        dead_zone: 8.0,
        reaction_distance: 420.0,
        error_margin: 6.0,
        inertia_factor: 1.0,
    };

    /// Named preset table, externally indexed by the settings value
    pub const PRESETS: &'static [(&'static str, CpuConfig)] = &[
        ("easy", Self::EASY),
        ("normal", Self::NORMAL),
        ("hard", Self::HARD),
    ];

    /// Look up a preset by name; unknown names fall back to "normal".
    pub fn preset(name: &str) -> CpuConfig {
        let name = name.to_ascii_lowercase();
        Self::PRESETS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, config)| *config)
            .unwrap_or(Self::NORMAL)
    }

    /// Preset names in table order (for menu cycling)
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        Self::PRESETS.iter().map(|(key, _)| *key)
    }
}

/// Heuristic paddle controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuController {
    pub side: Side,
    pub config: CpuConfig,
    /// Sampled once per controller; models consistent-but-imperfect aim
    aim_offset: f32,
}

impl CpuController {
    pub fn new(side: Side, config: CpuConfig, rng: &mut Pcg32) -> Self {
        let m = config.error_margin;
        let aim_offset = if m > 0.0 { rng.random_range(-m..=m) } else { 0.0 };
        Self {
            side,
            config,
            aim_offset,
        }
    }

    /// Decide the paddle move axis: -1.0 = up, 0.0 = hold, +1.0 = down.
    ///
    /// Pure given the current geometry and the fixed aim offset.
    pub fn compute_move(&self, ball: &Ball, paddle: &Paddle) -> f32 {
        let vx = ball.vel.x;

        // react only to a ball moving toward this side
        match self.side {
            Side::Right if vx <= 0.0 => return 0.0,
            Side::Left if vx >= 0.0 => return 0.0,
            _ => {}
        }

        // horizontal gap, facing edge to facing edge
        let distance_x = match self.side {
            Side::Right => paddle.pos.x - (ball.pos.x + ball.size.x),
            Side::Left => ball.pos.x - (paddle.pos.x + paddle.size.x),
        };
        if distance_x > self.config.reaction_distance {
            return 0.0;
        }

        let target_y = ball.center_y() + self.aim_offset;
        let diff = target_y - paddle.center_y();
        if diff.abs() < self.config.dead_zone {
            return 0.0;
        }

        if diff > 0.0 { 1.0 } else { -1.0 }
    }
}
