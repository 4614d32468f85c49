//! One-shot sound triggering over an abstract clip.
//!
//! Decoding and playback live behind [`AudioClip`]; the engine only owns the
//! retrigger policy: a fired clip plays from its configured start offset and
//! is stopped and rewound once its window elapses, and firing again while
//! the window is open is a no-op so rapid game events cannot stack the same
//! effect on top of itself.

use std::time::{Duration, Instant};

pub trait AudioClip {
    fn play(&mut self);
    fn stop(&mut self);
    fn seek(&mut self, position: Duration);
}

pub struct SoundTrigger<C: AudioClip> {
    clip: C,
    start: Duration,
    window: Duration,
    playing_until: Option<Instant>,
}

impl<C: AudioClip> SoundTrigger<C> {
    /// `start` is the in-clip offset playback begins from; `window` is how
    /// long the clip is allowed to play before it is stopped and rewound.
    pub fn new(clip: C, start: Duration, window: Duration) -> Self {
        Self {
            clip,
            start,
            window,
            playing_until: None,
        }
    }

    /// Starts playback unless the previous firing is still inside its
    /// window.
    pub fn fire(&mut self, now: Instant) {
        if let Some(until) = self.playing_until {
            if now < until {
                return;
            }
        }
        self.clip.seek(self.start);
        self.clip.play();
        self.playing_until = Some(now + self.window);
    }

    /// Stops and rewinds the clip once its window has elapsed. Called once
    /// per frame by the loop.
    pub fn tick(&mut self, now: Instant) {
        if let Some(until) = self.playing_until {
            if now >= until {
                self.clip.stop();
                self.clip.seek(self.start);
                self.playing_until = None;
            }
        }
    }

    pub fn is_playing(&self, now: Instant) -> bool {
        self.playing_until.is_some_and(|until| now < until)
    }
}
