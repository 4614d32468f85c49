use std::time::{Duration, Instant};

use engine::{AudioClip, SoundTrigger};
use tracing::debug;

/// Stand-in clip. Decoding and playback belong to the host environment;
/// the game only cares that trigger timing is observable, so the clip logs.
#[derive(Debug)]
pub(crate) struct LogClip {
    name: &'static str,
}

impl LogClip {
    fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl AudioClip for LogClip {
    fn play(&mut self) {
        debug!(clip = self.name, "clip_play");
    }

    fn stop(&mut self) {
        debug!(clip = self.name, "clip_stop");
    }

    fn seek(&mut self, position: Duration) {
        debug!(
            clip = self.name,
            position_ms = position.as_millis() as u64,
            "clip_seek"
        );
    }
}

/// The match's sound effects. Start offsets and stop windows match the
/// source clips: the lasers and the explosion are short one-shots, the
/// thruster clip skips its attack transient and loops via retriggering.
pub(crate) struct SoundBank {
    pub(crate) laser1: SoundTrigger<LogClip>,
    pub(crate) laser2: SoundTrigger<LogClip>,
    pub(crate) explosion: SoundTrigger<LogClip>,
    pub(crate) thrusters: SoundTrigger<LogClip>,
}

impl SoundBank {
    pub(crate) fn new() -> Self {
        Self {
            laser1: SoundTrigger::new(
                LogClip::new("laser1"),
                Duration::ZERO,
                Duration::from_millis(300),
            ),
            laser2: SoundTrigger::new(
                LogClip::new("laser2"),
                Duration::ZERO,
                Duration::from_millis(300),
            ),
            explosion: SoundTrigger::new(
                LogClip::new("explosion"),
                Duration::ZERO,
                Duration::from_millis(300),
            ),
            thrusters: SoundTrigger::new(
                LogClip::new("thrusters"),
                Duration::from_millis(100),
                Duration::from_millis(350),
            ),
        }
    }

    pub(crate) fn tick(&mut self, now: Instant) {
        self.laser1.tick(now);
        self.laser2.tick(now);
        self.explosion.tick(now);
        self.thrusters.tick(now);
    }
}

impl Default for SoundBank {
    fn default() -> Self {
        Self::new()
    }
}
