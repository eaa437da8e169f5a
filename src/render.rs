//! Frame description produced by the render system
//!
//! A packet is an ordered list of draw operations. The host walks the list
//! front to back; the simulation never touches a drawing backend itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, channels in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// The 200/255 grey used for the center line and score digits
    pub const GREY: Color = Color::rgb(0.784, 0.784, 0.784);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// Horizontal text anchoring; the host measures glyphs and aligns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Right,
}

/// One draw operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        align: TextAlign,
        color: Color,
    },
}

/// Ordered, side-effect-free description of one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderPacket {
    pub ops: Vec<DrawOp>,
}

impl RenderPacket {
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
