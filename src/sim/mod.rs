//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One pipeline pass per host tick, stages in fixed ascending order
//! - Seeded RNG only (the CPU aim offset)
//! - No I/O beyond the injected service handles

pub mod cpu;
pub mod entities;
pub mod geometry;
pub mod intent;
pub mod pipeline;
pub mod systems;
pub mod world;

pub use cpu::{CpuConfig, CpuController, Side};
pub use entities::{Ball, Paddle};
pub use geometry::{Bounds, Rect, advance};
pub use intent::{InputFrame, Intent, Key};
pub use pipeline::{System, SystemPipeline, TickContext};
pub use world::{Score, Trail, World};
