//! Deferred commands and their dispatcher
//!
//! Systems never flip world toggles or talk to the host mid-tick; they push
//! commands onto an ordered queue. After the tick the host drains the queue
//! and feeds each command to [`execute`]. World-mutating variants resolve
//! right there; anything the core cannot do itself (scene transitions,
//! screenshots, replay control) comes back as a [`HostRequest`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::sim::World;

/// Player identifier for per-player toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    P1,
    P2,
}

/// Closed set of deferred actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Push the pause overlay scene
    PauseOverlay,
    /// Resume from pause, restoring the velocity snapshot
    Continue,
    /// Toggle the ball trail; turning it off clears the buffer
    ToggleTrail,
    Screenshot { label: String },
    /// Make the named player's goal invulnerable (the "GOD" cheat)
    ToggleGodMode { player: Player },
    /// Ball-only slow motion (the "SLOW" cheat)
    ToggleSlowBall,
    /// Global slow motion
    ToggleSlowMo,
    StartReplayRecord { path: String },
    StopReplayRecord,
    StartReplayPlay { path: String },
    StopReplayPlay,
    StartVideoRecord,
    StopVideoRecord,
}

/// Actions the dispatcher hands back for the host to perform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostRequest {
    PushPauseOverlay,
    PopOverlay,
    Screenshot { label: String },
    StartReplayRecord { path: String },
    StopReplayRecord,
    StartReplayPlay { path: String },
    StopReplayPlay,
    StartVideoRecord,
    StopVideoRecord,
}

/// Ordered FIFO of commands, drained by the host after each tick
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<Command>,
}

impl CommandQueue {
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Execute one command against the world.
///
/// The single dispatch point: one arm per variant, no open-ended dispatch.
pub fn execute(command: Command, world: &mut World) -> Option<HostRequest> {
    match command {
        Command::PauseOverlay => Some(HostRequest::PushPauseOverlay),
        Command::Continue => {
            log::info!("resuming from pause");
            world.paused = false;
            // snapshots are consumed exactly once
            if let Some(vel) = world.saved_ball_vel.take() {
                world.ball.vel = vel;
            }
            if let Some(vel) = world.saved_left_vel.take() {
                world.left_paddle.vel = vel;
            }
            if let Some(vel) = world.saved_right_vel.take() {
                world.right_paddle.vel = vel;
            }
            Some(HostRequest::PopOverlay)
        }
        Command::ToggleTrail => {
            world.trail_mode = !world.trail_mode;
            if !world.trail_mode {
                world.trail.clear();
            }
            None
        }
        Command::Screenshot { label } => Some(HostRequest::Screenshot { label }),
        Command::ToggleGodMode { player } => {
            log::info!("toggling god mode for {player:?}");
            match player {
                Player::P1 => world.god_mode_p1 = !world.god_mode_p1,
                Player::P2 => world.god_mode_p2 = !world.god_mode_p2,
            }
            None
        }
        Command::ToggleSlowBall => {
            world.slow_ball = !world.slow_ball;
            None
        }
        Command::ToggleSlowMo => {
            world.slow_mo = !world.slow_mo;
            None
        }
        Command::StartReplayRecord { path } => Some(HostRequest::StartReplayRecord { path }),
        Command::StopReplayRecord => Some(HostRequest::StopReplayRecord),
        Command::StartReplayPlay { path } => Some(HostRequest::StartReplayPlay { path }),
        Command::StopReplayPlay => Some(HostRequest::StopReplayPlay),
        Command::StartVideoRecord => Some(HostRequest::StartVideoRecord),
        Command::StopVideoRecord => Some(HostRequest::StopVideoRecord),
    }
}
