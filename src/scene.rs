//! The playable scene: world + pipeline + services
//!
//! The host calls [`PongScene::tick`] once per frame with an input snapshot
//! and a delta time, renders the returned packet, then drains the command
//! queue and feeds each command to [`PongScene::execute`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::commands::{Command, CommandQueue, HostRequest, execute};
use crate::render::RenderPacket;
use crate::services::Services;
use crate::sim::{
    CpuConfig, CpuController, InputFrame, Side, System, SystemPipeline, TickContext, World,
};
use crate::sim::systems::{
    BallMovementSystem, CollisionSystem, CpuIntentSystem, HotkeysSystem, InputSystem,
    PaddleSystem, PauseSystem, RenderSystem, RulesSystem, TimeScaleSystem, TrailCaptureSystem,
};

pub struct PongScene {
    world: World,
    pipeline: SystemPipeline,
    services: Services,
    commands: CommandQueue,
}

impl PongScene {
    /// Build a single-player scene sized to the host viewport.
    ///
    /// `difficulty` is a preset name (unknown names fall back to "normal");
    /// `seed` fixes the CPU's aim error so runs reproduce exactly.
    pub fn new(viewport: Vec2, difficulty: &str, seed: u64, services: Services) -> Self {
        let mut world = World::new(viewport);

        let config = CpuConfig::preset(difficulty);
        let mut rng = Pcg32::seed_from_u64(seed);
        let controller = CpuController::new(Side::Right, config, &mut rng);
        // the CPU paddle moves at its profile's speed
        world.right_paddle.speed = config.max_speed;

        log::info!(
            "pong scene: viewport {}x{}, difficulty {difficulty}, seed {seed}",
            viewport.x,
            viewport.y
        );

        Self {
            world,
            pipeline: Self::build_pipeline(Some(controller)),
            services,
            commands: CommandQueue::default(),
        }
    }

    /// Two-human variant: no CPU controller attached.
    pub fn new_two_player(viewport: Vec2, services: Services) -> Self {
        log::info!(
            "pong scene (two player): viewport {}x{}",
            viewport.x,
            viewport.y
        );

        Self {
            world: World::new(viewport),
            pipeline: Self::build_pipeline(None),
            services,
            commands: CommandQueue::default(),
        }
    }

    fn build_pipeline(controller: Option<CpuController>) -> SystemPipeline {
        let mut pipeline = SystemPipeline::new();
        pipeline.extend([
            Box::new(InputSystem) as Box<dyn System>,
            Box::new(PauseSystem),
            Box::new(HotkeysSystem),
            Box::new(TimeScaleSystem),
            Box::new(CpuIntentSystem { controller }),
            Box::new(PaddleSystem),
            Box::new(BallMovementSystem),
            Box::new(TrailCaptureSystem),
            Box::new(CollisionSystem),
            Box::new(RulesSystem),
            Box::new(RenderSystem),
        ]);
        pipeline
    }

    /// Advance one frame and produce its render description.
    pub fn tick(&mut self, input: &InputFrame, dt: f32) -> RenderPacket {
        let mut ctx = TickContext {
            input,
            dt,
            world: &mut self.world,
            commands: &mut self.commands,
            services: &mut self.services,
            intent: None,
            packet: None,
        };
        self.pipeline.step(&mut ctx);
        // the render system always runs, so a packet is always present
        ctx.packet.unwrap_or_default()
    }

    /// Take this frame's deferred commands for host execution.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        self.commands.drain().collect()
    }

    /// Execute one command against this scene's world.
    pub fn execute(&mut self, command: Command) -> Option<HostRequest> {
        execute(command, &mut self.world)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Key;

    const DT: f32 = 1.0 / 60.0;

    fn scene() -> PongScene {
        PongScene::new(Vec2::new(640.0, 480.0), "normal", 42, Services::null())
    }

    #[test]
    fn test_tick_always_yields_a_packet() {
        let mut scene = scene();
        let packet = scene.tick(&InputFrame::default(), DT);
        // center line dashes + 2 paddles + ball + 2 score digits at minimum
        assert!(packet.len() >= 5);
    }

    #[test]
    fn test_pause_key_emits_overlay_command() {
        let mut scene = scene();
        let mut input = InputFrame::default();
        input.pressed.insert(Key::Escape);

        scene.tick(&input, DT);
        let commands = scene.drain_commands();
        assert_eq!(commands, [Command::PauseOverlay]);
        assert!(scene.world().paused);
    }

    #[test]
    fn test_pause_then_continue_round_trip() {
        let mut scene = scene();

        // advance a few frames before pausing
        for _ in 0..10 {
            scene.tick(&InputFrame::default(), DT);
        }
        let vel_before = scene.world().ball.vel;

        let mut input = InputFrame::default();
        input.pressed.insert(Key::Escape);
        scene.tick(&input, DT);
        for command in scene.drain_commands() {
            scene.execute(command);
        }
        assert!(scene.world().paused);
        assert_eq!(scene.world().ball.vel, Vec2::ZERO);

        let request = scene.execute(Command::Continue);
        assert_eq!(request, Some(HostRequest::PopOverlay));
        assert!(!scene.world().paused);
        // bit-for-bit restore
        assert_eq!(scene.world().ball.vel, vel_before);
    }

    #[test]
    fn test_identical_seeds_replay_identically() {
        let mut a = scene();
        let mut b = scene();

        let mut held = InputFrame::default();
        held.down.insert(Key::S);
        let idle = InputFrame::default();

        for frame in 0..240 {
            let input = if frame % 3 == 0 { &held } else { &idle };
            let pa = a.tick(input, DT);
            let pb = b.tick(input, DT);
            assert_eq!(pa, pb);
        }
        assert_eq!(a.world(), b.world());
    }

    #[test]
    fn test_two_player_scene_has_no_cpu_override() {
        let mut scene = PongScene::new_two_player(Vec2::new(640.0, 480.0), Services::null());
        let mut input = InputFrame::default();
        input.down.insert(Key::Down);

        let before = scene.world().right_paddle.pos.y;
        scene.tick(&input, DT);
        assert!(scene.world().right_paddle.pos.y > before);
    }
}
