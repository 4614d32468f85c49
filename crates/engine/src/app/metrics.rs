use std::time::{Duration, Instant};

/// Rolling frame/step counters, flushed to a snapshot once per configured
/// interval. The runner logs each snapshot as a `loop_metrics` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub tps: f32,
    pub frame_time_ms: f32,
}

#[derive(Debug)]
pub struct MetricsAccumulator {
    interval_start: Instant,
    interval: Duration,
    frames: u32,
    steps: u32,
    frame_time_sum: Duration,
}

impl MetricsAccumulator {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval_start: now,
            interval: if interval.is_zero() {
                Duration::from_secs(1)
            } else {
                interval
            },
            frames: 0,
            steps: 0,
            frame_time_sum: Duration::ZERO,
        }
    }

    pub fn record_frame(&mut self, frame_dt: Duration) {
        self.frames = self.frames.saturating_add(1);
        self.frame_time_sum = self.frame_time_sum.saturating_add(frame_dt);
    }

    pub fn record_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    pub fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let frame_time_ms = if self.frames == 0 {
            0.0
        } else {
            (self.frame_time_sum.as_secs_f32() / self.frames as f32) * 1000.0
        };

        let snapshot = LoopMetricsSnapshot {
            fps: self.frames as f32 / elapsed_seconds,
            tps: self.steps as f32 / elapsed_seconds,
            frame_time_ms,
        };

        self.interval_start = now;
        self.frames = 0;
        self.steps = 0;
        self.frame_time_sum = Duration::ZERO;

        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_computes_expected_rates() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1), base);

        accumulator.record_frame(Duration::from_millis(16));
        accumulator.record_frame(Duration::from_millis(16));
        for _ in 0..4 {
            accumulator.record_step();
        }

        let snapshot = accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("snapshot should be emitted");

        assert!((snapshot.fps - 2.0).abs() < 0.05);
        assert!((snapshot.tps - 4.0).abs() < 0.05);
        assert!((snapshot.frame_time_ms - 16.0).abs() < 0.001);
    }

    #[test]
    fn snapshot_not_emitted_before_interval() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1), base);
        accumulator.record_frame(Duration::from_millis(16));

        assert!(accumulator
            .maybe_snapshot(base + Duration::from_millis(500))
            .is_none());
    }

    #[test]
    fn counters_reset_after_snapshot() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1), base);
        accumulator.record_frame(Duration::from_millis(10));
        accumulator.record_step();

        accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("first snapshot");
        let second = accumulator
            .maybe_snapshot(base + Duration::from_secs(2))
            .expect("second snapshot");
        assert_eq!(second.fps, 0.0);
        assert_eq!(second.tps, 0.0);
        assert_eq!(second.frame_time_ms, 0.0);
    }

    #[test]
    fn zero_interval_falls_back_to_one_second() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::new(Duration::ZERO, base);
        assert!(accumulator
            .maybe_snapshot(base + Duration::from_millis(100))
            .is_none());
        assert!(accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .is_some());
    }
}
