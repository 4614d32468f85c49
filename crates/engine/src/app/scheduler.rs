//! Fixed-timestep scheduling.
//!
//! The scheduler decides, once per frame-driver callback, how many fixed
//! simulation steps are due. Steps are sized `1 / target_tps` regardless of
//! how the display paces its callbacks, which is what keeps simulation
//! behavior reproducible across machines with different refresh rates.
//!
//! Catch-up work per frame is bounded by `max_catchup_steps`: a long stall
//! (window dragged, process suspended) resumes with at most that many steps,
//! and the remaining backlog is dropped by resyncing the deadline to `now`.
//! Dropping is deliberate; paying the backlog off over later frames would
//! let one stall snowball into a permanently-behind loop.

use std::time::{Duration, Instant};

/// What one frame owes: how many simulation steps to run, and how much
/// backlog (if any) was discarded because the catch-up cap was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPlan {
    pub steps: u32,
    pub dropped_backlog: Duration,
}

impl TickPlan {
    /// A frame draws exactly once, and only when at least one step ran.
    pub fn should_draw(&self) -> bool {
        self.steps > 0
    }
}

#[derive(Debug)]
pub struct FixedStepScheduler {
    step_interval: Duration,
    max_catchup_steps: u32,
    next_deadline: Instant,
    last_tick: Option<Instant>,
    steps_last_tick: u32,
}

impl FixedStepScheduler {
    /// `now` is the bring-up instant; the first step falls due one full
    /// interval later, so the step count over any elapsed duration `d` is
    /// `floor(d / step_interval)` (absent cap hits).
    pub fn new(step_interval: Duration, max_catchup_steps: u32, now: Instant) -> Self {
        Self {
            step_interval,
            max_catchup_steps: max_catchup_steps.max(1),
            next_deadline: now + step_interval,
            last_tick: None,
            steps_last_tick: 0,
        }
    }

    /// Plans one frame. `now` is injected rather than read internally so
    /// tests can drive the scheduler with a synthetic clock.
    pub fn tick(&mut self, now: Instant) -> TickPlan {
        self.steps_last_tick = 0;
        self.last_tick = Some(now);

        while now > self.next_deadline && self.steps_last_tick < self.max_catchup_steps {
            self.next_deadline += self.step_interval;
            self.steps_last_tick += 1;
        }

        let mut dropped_backlog = Duration::ZERO;
        if now > self.next_deadline {
            // Cap hit with time still owed: discard it and restart the
            // cadence from the present.
            dropped_backlog = now.saturating_duration_since(self.next_deadline);
            self.next_deadline = now + self.step_interval;
        }

        TickPlan {
            steps: self.steps_last_tick,
            dropped_backlog,
        }
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn steps_last_tick(&self) -> u32 {
        self.steps_last_tick
    }

    pub fn last_tick(&self) -> Option<Instant> {
        self.last_tick
    }
}
