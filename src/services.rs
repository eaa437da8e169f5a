//! Narrow host service interfaces
//!
//! The simulation performs no I/O itself. These traits are implemented by the
//! host and invoked synchronously, fire-and-forget, from the pipeline.

/// Sound id emitted on a wall bounce
pub const SOUND_WALL_HIT: &str = "wall_hit";
/// Sound id emitted on a paddle hit
pub const SOUND_PADDLE_HIT: &str = "paddle_hit";

/// Fire-and-forget audio playback; implementations must not block.
pub trait AudioService {
    fn play(&mut self, id: &str);
}

/// Capture subsystem queries (the triggers go through commands)
pub trait CaptureService {
    fn replay_recording(&self) -> bool;
    fn replay_playing(&self) -> bool;
    fn video_recording(&self) -> bool;
}

/// Service bundle threaded through the pipeline each tick
pub struct Services {
    pub audio: Box<dyn AudioService>,
    pub capture: Box<dyn CaptureService>,
}

impl Services {
    /// All-no-op services for tests and headless runs
    pub fn null() -> Self {
        Self {
            audio: Box::new(NullAudio),
            capture: Box::new(NullCapture),
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::null()
    }
}

/// Discards every sound request
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioService for NullAudio {
    fn play(&mut self, _id: &str) {}
}

/// Reports no capture activity
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCapture;

impl CaptureService for NullCapture {
    fn replay_recording(&self) -> bool {
        false
    }

    fn replay_playing(&self) -> bool {
        false
    }

    fn video_recording(&self) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records every requested sound id for assertions
    #[derive(Debug, Default, Clone)]
    pub struct RecordingAudio {
        pub played: Rc<RefCell<Vec<String>>>,
    }

    impl AudioService for RecordingAudio {
        fn play(&mut self, id: &str) {
            self.played.borrow_mut().push(id.to_string());
        }
    }

    /// Capture stub with settable flags
    #[derive(Debug, Default, Clone, Copy)]
    pub struct StubCapture {
        pub recording: bool,
        pub playing: bool,
        pub video: bool,
    }

    impl CaptureService for StubCapture {
        fn replay_recording(&self) -> bool {
            self.recording
        }

        fn replay_playing(&self) -> bool {
            self.playing
        }

        fn video_recording(&self) -> bool {
            self.video
        }
    }
}
