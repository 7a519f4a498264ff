//! Frame clock with fixed-timestep accumulator

use std::time::{Duration, Instant};

/// Longest wall-clock gap a single frame is allowed to observe. Anything
/// larger (host slept, window minimized) is capped here before the overload
/// policy is applied.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(1000);

/// Measures wall-clock time between frames and banks it for fixed-step
/// consumption.
///
/// The clock holds timing state only; the step size and stall threshold are
/// passed in per call so configuration edits take effect on the next frame.
pub struct FrameClock {
    /// Instant of the previous frame. `None` until seeded.
    last_time: Option<Instant>,
    /// Wall-clock time not yet converted into update steps.
    accumulated: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_time: None,
            accumulated: Duration::ZERO,
        }
    }

    /// Set the reference instant without banking any time. Called on engine
    /// init so the first frame does not observe the gap since construction.
    pub fn seed(&mut self, now: Instant) {
        self.last_time = Some(now);
    }

    /// Measure the delta at `now`, apply the cap and the stall collapse, and
    /// bank the result. Returns the delta this frame observes.
    ///
    /// A delta beyond `time_step * skip_frame_count` means the host stalled
    /// for too long to catch up step by step; it collapses to a single
    /// nominal step and the rest of the elapsed time is discarded.
    pub fn advance(
        &mut self,
        now: Instant,
        time_step: Duration,
        skip_frame_count: u32,
    ) -> Duration {
        let last = match self.last_time {
            Some(last) => last,
            None => {
                self.last_time = Some(now);
                return Duration::ZERO;
            }
        };

        // Saturating: a clock anomaly (now earlier than last) reads as zero
        // rather than underflowing the accumulator.
        let mut delta = now.saturating_duration_since(last).min(MAX_FRAME_DELTA);
        if delta > time_step * skip_frame_count {
            delta = time_step;
        }

        self.accumulated += delta;
        self.last_time = Some(now);
        delta
    }

    /// True while at least one whole step is banked.
    pub fn should_step(&self, time_step: Duration) -> bool {
        self.accumulated >= time_step
    }

    /// Consume one step from the bank.
    pub fn consume_step(&mut self, time_step: Duration) {
        self.accumulated = self.accumulated.saturating_sub(time_step);
    }

    /// Wall-clock time banked but not yet consumed.
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(33);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn unseeded_advance_returns_zero_and_seeds() {
        let mut clock = FrameClock::new();
        let now = Instant::now();
        assert_eq!(clock.advance(now, STEP, 10), Duration::ZERO);
        assert_eq!(clock.accumulated(), Duration::ZERO);

        // Seeded now: the next advance measures from `now`.
        assert_eq!(clock.advance(now + ms(33), STEP, 10), ms(33));
    }

    #[test]
    fn hundred_ms_drains_three_steps_with_remainder() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        clock.seed(base);

        let delta = clock.advance(base + ms(100), STEP, 10);
        assert_eq!(delta, ms(100));

        let mut steps = 0;
        while clock.should_step(STEP) {
            clock.consume_step(STEP);
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(clock.accumulated(), ms(1));
    }

    #[test]
    fn drain_leaves_less_than_one_step() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        clock.seed(base);

        let mut now = base;
        for delta in [16u64, 33, 100, 7, 329, 1, 62] {
            now += ms(delta);
            clock.advance(now, STEP, 10);
            while clock.should_step(STEP) {
                clock.consume_step(STEP);
            }
            assert!(clock.accumulated() < STEP);
        }
    }

    #[test]
    fn stall_collapses_to_single_step() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        clock.seed(base);

        // 2000ms gap: capped to 1000ms, still beyond the 330ms threshold,
        // so it collapses to exactly one nominal step.
        let delta = clock.advance(base + ms(2000), STEP, 10);
        assert_eq!(delta, STEP);

        let mut steps = 0;
        while clock.should_step(STEP) {
            clock.consume_step(STEP);
            steps += 1;
        }
        assert_eq!(steps, 1);
        assert_eq!(clock.accumulated(), Duration::ZERO);
    }

    #[test]
    fn delta_within_threshold_is_kept() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        clock.seed(base);

        // 300ms < 33ms * 10, so the full backlog is banked.
        let delta = clock.advance(base + ms(300), STEP, 10);
        assert_eq!(delta, ms(300));

        let mut steps = 0;
        while clock.should_step(STEP) {
            clock.consume_step(STEP);
            steps += 1;
        }
        assert_eq!(steps, 9);
        assert_eq!(clock.accumulated(), ms(3));
    }

    #[test]
    fn backwards_clock_reads_as_zero() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        clock.seed(base + ms(50));

        let delta = clock.advance(base, STEP, 10);
        assert_eq!(delta, Duration::ZERO);
        assert_eq!(clock.accumulated(), Duration::ZERO);
        assert!(!clock.should_step(STEP));
    }

    #[test]
    fn consume_never_underflows() {
        let mut clock = FrameClock::new();
        clock.consume_step(STEP);
        assert_eq!(clock.accumulated(), Duration::ZERO);
    }
}
