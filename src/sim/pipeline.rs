//! System trait, tick context, and the ordered pipeline
//!
//! One pipeline pass per host frame. Stages run synchronously to completion
//! in ascending order-key order; later stages read state written by earlier
//! ones within the same tick, so the order is part of the simulation
//! contract, not an implementation detail.

use crate::commands::CommandQueue;
use crate::render::RenderPacket;
use crate::services::Services;

use super::intent::{InputFrame, Intent};
use super::world::World;

/// Shared per-tick state threaded through every system
pub struct TickContext<'a> {
    pub input: &'a InputFrame,
    /// Delta time for this tick; only the time-scale system writes it
    pub dt: f32,
    pub world: &'a mut World,
    pub commands: &'a mut CommandQueue,
    pub services: &'a mut Services,
    /// Set by the input system, possibly replaced by the CPU system
    pub intent: Option<Intent>,
    /// Set by the render system
    pub packet: Option<RenderPacket>,
}

/// One ordered unit of the pipeline with a single responsibility
pub trait System {
    fn name(&self) -> &'static str;

    /// Execution order key; lower runs first. Fixed per system.
    fn order(&self) -> i32;

    fn step(&mut self, ctx: &mut TickContext<'_>);
}

/// Systems kept sorted by ascending order key, stepped once per tick
#[derive(Default)]
pub struct SystemPipeline {
    systems: Vec<Box<dyn System>>,
}

impl SystemPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, system: Box<dyn System>) {
        self.systems.push(system);
        // stable: insertion order breaks ties
        self.systems.sort_by_key(|s| s.order());
    }

    pub fn extend(&mut self, systems: impl IntoIterator<Item = Box<dyn System>>) {
        self.systems.extend(systems);
        self.systems.sort_by_key(|s| s.order());
    }

    /// Run every system once, in order
    pub fn step(&mut self, ctx: &mut TickContext<'_>) {
        for system in &mut self.systems {
            system.step(ctx);
        }
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        order: i32,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl System for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn order(&self) -> i32 {
            self.order
        }

        fn step(&mut self, _ctx: &mut TickContext<'_>) {
            self.log.borrow_mut().push(self.name);
        }
    }

    #[test]
    fn test_systems_run_in_ascending_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = SystemPipeline::new();

        // inserted shuffled on purpose
        for (name, order) in [("rules", 50), ("input", 10), ("render", 100), ("paddles", 20)] {
            pipeline.push(Box::new(Recorder {
                name,
                order,
                log: Rc::clone(&log),
            }));
        }

        let input = InputFrame::default();
        let mut world = World::new(Vec2::new(640.0, 480.0));
        let mut commands = CommandQueue::default();
        let mut services = Services::null();
        let mut ctx = TickContext {
            input: &input,
            dt: 1.0 / 60.0,
            world: &mut world,
            commands: &mut commands,
            services: &mut services,
            intent: None,
            packet: None,
        };

        pipeline.step(&mut ctx);

        assert_eq!(*log.borrow(), ["input", "paddles", "rules", "render"]);
    }
}
