//! Deja Bounce - deterministic two-paddle ball game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, world state, system pipeline)
//! - `render`: Frame description produced by the render system
//! - `commands`: Deferred side effects drained and executed after each tick
//! - `services`: Narrow host service interfaces (audio, capture)
//! - `scene`: Wires world + pipeline + services into a host-facing scene
//!
//! The host owns the window, assets, menus and the frame loop. Once per frame
//! it hands the scene an input snapshot and a delta time, receives a
//! [`render::RenderPacket`] back, then drains and executes the command queue.

pub mod commands;
pub mod render;
pub mod scene;
pub mod services;
pub mod sim;

pub use scene::PongScene;
pub use sim::{CpuConfig, World};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Paddle dimensions (width, height)
    pub const PADDLE_SIZE: Vec2 = Vec2::new(12.0, 72.0);
    /// Gap between a paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 20.0;
    /// Default paddle speed (units/sec)
    pub const PADDLE_SPEED: f32 = 300.0;

    /// Ball dimensions
    pub const BALL_SIZE: Vec2 = Vec2::new(10.0, 10.0);
    /// Nominal ball speed (informational)
    pub const BALL_SPEED: f32 = 400.0;
    /// Velocity of the opening serve (toward the left player)
    pub const BALL_SERVE_VEL: Vec2 = Vec2::new(-250.0, -200.0);
    /// Horizontal speed magnitude after a goal respawn
    pub const BALL_RESET_SPEED_X: f32 = 250.0;
    /// Vertical speed after a goal respawn
    pub const BALL_RESET_SPEED_Y: f32 = -200.0;

    /// dt multiplier applied by slow motion (global and ball-only)
    pub const SLOW_MO_SCALE: f32 = 0.25;

    /// Ball trail ring buffer capacity
    pub const TRAIL_CAPACITY: usize = 30;

    /// Paddle influence: vertical speed imparted by hit offset (units/sec)
    pub const INFLUENCE_BASE_VY: f32 = 220.0;
    /// Paddle influence: fraction of paddle velocity carried into the ball
    pub const INFLUENCE_INERTIA: f32 = 0.30;
    /// Paddle influence: vertical speed clamp
    pub const INFLUENCE_MAX_VY: f32 = 400.0;
    /// Horizontal speed gain on every paddle hit (intentional, unbounded)
    pub const PADDLE_SPEEDUP: f32 = 1.03;

    /// Replay file path passed along with replay commands
    pub const REPLAY_PATH: &str = "pong_replay.bin";
}
