//! Per-tick input snapshot and derived intent

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the simulation cares about. The host maps its backend's key codes
/// onto these and performs the edge detection for `pressed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    Escape,
    T,
    F9,
    F10,
    F11,
    F12,
}

/// One frame of raw input: keys held and keys newly pressed this frame
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub down: HashSet<Key>,
    pub pressed: HashSet<Key>,
}

impl InputFrame {
    pub fn held(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

/// Immutable per-tick intent derived from input.
///
/// The CPU stage replaces the whole value, explicitly carrying through every
/// field it does not own; last writer wins per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// -1.0 (up) to +1.0 (down)
    pub move_left_paddle: f32,
    /// -1.0 (up) to +1.0 (down)
    pub move_right_paddle: f32,
    /// Pause was pressed this frame (edge, not level)
    pub pause: bool,

    pub toggle_trail: bool,
    pub screenshot: bool,
    pub replay_record: bool,
    pub replay_play: bool,
    pub video_record: bool,
}
