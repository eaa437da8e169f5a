//! The ordered update systems
//!
//! Execution order (ascending order key):
//! input 10, pause 12, hotkeys 13, time scale 14, cpu intent 15, paddles 20,
//! ball movement 30, trail capture 35, collision 40, rules 50, render 100.
//!
//! Every system that depends on an optional upstream value (intent, attached
//! controller) silently no-ops when it is absent; skipping one stage for a
//! frame never corrupts the world.

use glam::Vec2;

use crate::commands::Command;
use crate::consts::{
    BALL_RESET_SPEED_X, BALL_RESET_SPEED_Y, INFLUENCE_BASE_VY, INFLUENCE_INERTIA,
    INFLUENCE_MAX_VY, PADDLE_SPEEDUP, REPLAY_PATH,
};
use crate::render::{Color, DrawOp, RenderPacket, TextAlign};
use crate::services::{SOUND_PADDLE_HIT, SOUND_WALL_HIT};

use super::cpu::{CpuController, Side};
use super::entities::{Ball, Paddle};
use super::geometry::{Bounds, advance};
use super::intent::{Intent, Key};
use super::pipeline::{System, TickContext};

/// Builds this tick's intent from the raw input snapshot
#[derive(Debug, Default)]
pub struct InputSystem;

impl System for InputSystem {
    fn name(&self) -> &'static str {
        "input"
    }

    fn order(&self) -> i32 {
        10
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        let input = ctx.input;

        // held keys drive the movement axes
        let left = (input.held(Key::S) as i32 - input.held(Key::W) as i32) as f32;
        let right = (input.held(Key::Down) as i32 - input.held(Key::Up) as i32) as f32;

        ctx.intent = Some(Intent {
            move_left_paddle: left,
            move_right_paddle: right,
            // edge-triggered flags come from pressed-this-frame keys
            pause: input.just_pressed(Key::Escape),
            toggle_trail: input.just_pressed(Key::T),
            screenshot: input.just_pressed(Key::F9),
            replay_record: input.just_pressed(Key::F10),
            replay_play: input.just_pressed(Key::F11),
            video_record: input.just_pressed(Key::F12),
        });
    }
}

/// Freezes the world on the pause edge, snapshotting velocities once
#[derive(Debug, Default)]
pub struct PauseSystem;

impl System for PauseSystem {
    fn name(&self) -> &'static str {
        "pause"
    }

    fn order(&self) -> i32 {
        12
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        let Some(intent) = ctx.intent else { return };
        if !intent.pause {
            return;
        }
        // already paused: keep the existing snapshot intact
        if ctx.world.paused {
            return;
        }

        let world = &mut *ctx.world;
        world.paused = true;

        world.saved_ball_vel = Some(world.ball.vel);
        world.saved_left_vel = Some(world.left_paddle.vel);
        world.saved_right_vel = Some(world.right_paddle.vel);

        world.ball.vel = Vec2::ZERO;
        world.left_paddle.vel = Vec2::ZERO;
        world.right_paddle.vel = Vec2::ZERO;

        ctx.commands.push(Command::PauseOverlay);
    }
}

/// One-shot hotkey side effects, emitted as commands
#[derive(Debug, Default)]
pub struct HotkeysSystem;

impl System for HotkeysSystem {
    fn name(&self) -> &'static str {
        "hotkeys"
    }

    fn order(&self) -> i32 {
        13
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        let Some(intent) = ctx.intent else { return };

        if intent.toggle_trail {
            ctx.commands.push(Command::ToggleTrail);
        }

        if intent.screenshot {
            ctx.commands.push(Command::Screenshot {
                label: "pong".into(),
            });
        }

        let capture = &ctx.services.capture;

        // record and play are mutually exclusive: starting one stops the other
        if intent.replay_record {
            if capture.replay_recording() {
                ctx.commands.push(Command::StopReplayRecord);
            } else {
                if capture.replay_playing() {
                    ctx.commands.push(Command::StopReplayPlay);
                }
                ctx.commands.push(Command::StartReplayRecord {
                    path: REPLAY_PATH.into(),
                });
            }
        }

        if intent.replay_play {
            if capture.replay_playing() {
                ctx.commands.push(Command::StopReplayPlay);
            } else {
                if capture.replay_recording() {
                    ctx.commands.push(Command::StopReplayRecord);
                }
                ctx.commands.push(Command::StartReplayPlay {
                    path: REPLAY_PATH.into(),
                });
            }
        }

        // video capture is independent of the replay pair
        if intent.video_record {
            if capture.video_recording() {
                ctx.commands.push(Command::StopVideoRecord);
            } else {
                ctx.commands.push(Command::StartVideoRecord);
            }
        }
    }
}

/// Scales this tick's dt while global slow motion is on
#[derive(Debug, Default)]
pub struct TimeScaleSystem;

impl System for TimeScaleSystem {
    fn name(&self) -> &'static str {
        "time_scale"
    }

    fn order(&self) -> i32 {
        14
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.world.paused {
            return;
        }
        if ctx.world.slow_mo {
            // the only place dt is modified; every later stage sees it scaled
            ctx.dt *= ctx.world.slow_mo_scale;
        }
    }
}

/// Replaces the intent, overriding only the CPU-controlled axis
#[derive(Default)]
pub struct CpuIntentSystem {
    pub controller: Option<CpuController>,
}

impl System for CpuIntentSystem {
    fn name(&self) -> &'static str {
        "cpu_intent"
    }

    fn order(&self) -> i32 {
        15
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        let Some(controller) = &self.controller else { return };
        let Some(intent) = ctx.intent else { return };

        let world = &*ctx.world;
        let paddle = match controller.side {
            Side::Left => &world.left_paddle,
            Side::Right => &world.right_paddle,
        };
        let axis = controller.compute_move(&world.ball, paddle);

        // copy-with-override: every human-owned field passes through untouched
        ctx.intent = Some(match controller.side {
            Side::Left => Intent {
                move_left_paddle: axis,
                ..intent
            },
            Side::Right => Intent {
                move_right_paddle: axis,
                ..intent
            },
        });
    }
}

/// Applies movement intent to both paddles
#[derive(Debug, Default)]
pub struct PaddleSystem;

impl System for PaddleSystem {
    fn name(&self) -> &'static str {
        "paddles"
    }

    fn order(&self) -> i32 {
        20
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.world.paused {
            return;
        }
        let Some(intent) = ctx.intent else { return };

        let dt = ctx.dt;
        let world = &mut *ctx.world;
        let max_y = world.viewport.y;

        let paddles = [
            (&mut world.left_paddle, intent.move_left_paddle),
            (&mut world.right_paddle, intent.move_right_paddle),
        ];
        for (paddle, axis) in paddles {
            paddle.vel.y = axis * paddle.speed;
            paddle.pos = advance(paddle.pos, paddle.vel, dt);
            // paddles never leave the playfield
            paddle.pos.y = paddle.pos.y.clamp(0.0, max_y - paddle.size.y);
        }
    }
}

/// Integrates the ball, with its own independent slow-motion scale
#[derive(Debug, Default)]
pub struct BallMovementSystem;

impl System for BallMovementSystem {
    fn name(&self) -> &'static str {
        "ball_movement"
    }

    fn order(&self) -> i32 {
        30
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.world.paused {
            return;
        }

        let world = &mut *ctx.world;
        let mut ball_dt = ctx.dt;
        // composes with the global slow-mo scale already applied to ctx.dt
        if world.slow_ball {
            ball_dt *= world.slow_mo_scale;
        }

        world.ball.pos = advance(world.ball.pos, world.ball.vel, ball_dt);
    }
}

/// Records the ball position into the trail ring while trail mode is on
#[derive(Debug, Default)]
pub struct TrailCaptureSystem;

impl System for TrailCaptureSystem {
    fn name(&self) -> &'static str {
        "trail_capture"
    }

    fn order(&self) -> i32 {
        35
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        let world = &mut *ctx.world;
        if world.paused || !world.trail_mode {
            return;
        }
        let pos = world.ball.pos;
        world.trail.push(pos);
    }
}

/// Ball vs walls, then ball vs the paddle in its direction of travel
#[derive(Debug, Default)]
pub struct CollisionSystem;

impl CollisionSystem {
    fn apply_paddle_influence(ball: &mut Ball, paddle: &Paddle) {
        let offset = ball.center_y() - paddle.center_y();
        let half_height = paddle.size.y / 2.0;
        // degenerate zero-height paddle falls back to a denominator of 1
        let denom = if half_height > 0.0 { half_height } else { 1.0 };
        let norm = (offset / denom).clamp(-1.0, 1.0);

        let new_vy = norm * INFLUENCE_BASE_VY + paddle.vel.y * INFLUENCE_INERTIA;
        ball.vel.y = new_vy.clamp(-INFLUENCE_MAX_VY, INFLUENCE_MAX_VY);

        // the ball speeds up a little on every paddle hit
        ball.vel.x *= PADDLE_SPEEDUP;
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn order(&self) -> i32 {
        40
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.world.paused {
            return;
        }
        let world = &mut *ctx.world;

        // 1) top/bottom bounce first
        let bounds = Bounds::from_height(world.viewport.y);
        let ball = &mut world.ball;
        let size = ball.size;
        if bounds.vertical_bounce(&mut ball.pos, &mut ball.vel, size) {
            ctx.services.audio.play(SOUND_WALL_HIT);
        }

        // 2) paddle test uses the velocity sign AFTER the bounce; only the
        //    paddle in the direction of travel is considered
        let vx = world.ball.vel.x;
        if vx < 0.0 {
            let ball = &mut world.ball;
            let paddle = &world.left_paddle;
            if ball.collider().intersects(&paddle.collider()) {
                // flush against the paddle face, no tunneling past it
                ball.pos.x = paddle.pos.x + paddle.size.x;
                ball.vel.x = ball.vel.x.abs();
                Self::apply_paddle_influence(ball, paddle);
                ctx.services.audio.play(SOUND_PADDLE_HIT);
            }
        } else if vx > 0.0 {
            let ball = &mut world.ball;
            let paddle = &world.right_paddle;
            if ball.collider().intersects(&paddle.collider()) {
                ball.pos.x = paddle.pos.x - ball.size.x;
                ball.vel.x = -ball.vel.x.abs();
                Self::apply_paddle_influence(ball, paddle);
                ctx.services.audio.play(SOUND_PADDLE_HIT);
            }
        }
    }
}

/// Scoring and goal-line handling
#[derive(Debug, Default)]
pub struct RulesSystem;

impl System for RulesSystem {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn order(&self) -> i32 {
        50
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.world.paused {
            return;
        }
        let world = &mut *ctx.world;
        let (vw, vh) = (world.viewport.x, world.viewport.y);
        let ball = &mut world.ball;
        let (bw, bh) = (ball.size.x, ball.size.y);
        let center = Vec2::new(vw / 2.0 - bw / 2.0, vh / 2.0 - bh / 2.0);

        // ball fully past the left goal line
        if ball.pos.x + bw < 0.0 {
            if world.god_mode_p1 {
                // protected goal: bounce back in place, no score
                ball.pos.x = 0.0;
                ball.vel.x = if ball.vel.x != 0.0 {
                    ball.vel.x.abs()
                } else {
                    BALL_RESET_SPEED_X
                };
                return;
            }

            world.score.right += 1;
            ball.pos = center;
            ball.vel = Vec2::new(BALL_RESET_SPEED_X, BALL_RESET_SPEED_Y);
            return;
        }

        // ball past the right goal line (mirrored)
        if ball.pos.x > vw {
            if world.god_mode_p2 {
                ball.pos.x = vw - bw;
                ball.vel.x = if ball.vel.x != 0.0 {
                    -ball.vel.x.abs()
                } else {
                    -BALL_RESET_SPEED_X
                };
                return;
            }

            world.score.left += 1;
            ball.pos = center;
            ball.vel = Vec2::new(-BALL_RESET_SPEED_X, BALL_RESET_SPEED_Y);
        }
    }
}

/// Assembles the frame description; reads the world, never writes it.
/// Runs even while paused so a paused frame still redraws.
#[derive(Debug, Default)]
pub struct RenderSystem;

impl RenderSystem {
    const DASH_WIDTH: f32 = 4.0;
    const DASH_HEIGHT: f32 = 16.0;
    const DASH_GAP: f32 = 12.0;
    /// Distance from the center line to each score digit
    const SCORE_GAP: f32 = 40.0;
    const SCORE_Y: f32 = 20.0;
    /// Newest trail point tops out at half opacity
    const TRAIL_MAX_ALPHA: f32 = 0.5;
}

impl System for RenderSystem {
    fn name(&self) -> &'static str {
        "render"
    }

    fn order(&self) -> i32 {
        100
    }

    fn step(&mut self, ctx: &mut TickContext<'_>) {
        let world = &*ctx.world;
        let (vw, vh) = (world.viewport.x, world.viewport.y);
        let mut packet = RenderPacket::default();

        // dashed center line (2px-centered on the midline)
        let line_x = vw / 2.0 - Self::DASH_WIDTH / 2.0;
        let mut y = 0.0;
        while y < vh {
            packet.push(DrawOp::Rect {
                pos: Vec2::new(line_x, y),
                size: Vec2::new(Self::DASH_WIDTH, Self::DASH_HEIGHT),
                color: Color::GREY,
            });
            y += Self::DASH_HEIGHT + Self::DASH_GAP;
        }

        for paddle in [&world.left_paddle, &world.right_paddle] {
            packet.push(DrawOp::Rect {
                pos: paddle.pos,
                size: paddle.size,
                color: Color::WHITE,
            });
        }

        // trail, oldest (faintest) first so newer points draw on top
        if world.trail_mode && !world.trail.is_empty() {
            let count = world.trail.len();
            for (i, pos) in world.trail.iter().enumerate() {
                let t = (i + 1) as f32 / count as f32;
                packet.push(DrawOp::Rect {
                    pos: *pos,
                    size: world.ball.size,
                    color: Color::WHITE.with_alpha(t * Self::TRAIL_MAX_ALPHA),
                });
            }
        }

        packet.push(DrawOp::Rect {
            pos: world.ball.pos,
            size: world.ball.size,
            color: Color::WHITE,
        });

        // left score right-aligned, right score left-aligned, both offset
        // from the horizontal center by a fixed gap
        let center_x = vw / 2.0;
        packet.push(DrawOp::Text {
            pos: Vec2::new(center_x - Self::SCORE_GAP, Self::SCORE_Y),
            text: world.score.left.to_string(),
            align: TextAlign::Right,
            color: Color::GREY,
        });
        packet.push(DrawOp::Text {
            pos: Vec2::new(center_x + Self::SCORE_GAP, Self::SCORE_Y),
            text: world.score.right.to_string(),
            align: TextAlign::Left,
            color: Color::GREY,
        });

        ctx.packet = Some(packet);
    }
}
