//! Demo systems for the player

use kiln_core::Result;
use kiln_runtime::RuntimeSystem;
use log::debug;
use std::time::Duration;

/// Counts fixed steps and logs simulated time about once per second.
pub struct Heartbeat {
    steps: u64,
    sim_time: Duration,
    since_log: Duration,
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new()
    }
}

impl Heartbeat {
    pub fn new() -> Self {
        Self {
            steps: 0,
            sim_time: Duration::ZERO,
            since_log: Duration::ZERO,
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl RuntimeSystem for Heartbeat {
    fn name(&self) -> &str {
        "heartbeat"
    }

    fn update(&mut self, dt: Duration) -> Result<()> {
        self.steps += 1;
        self.sim_time += dt;
        self.since_log += dt;
        if self.since_log >= Duration::from_secs(1) {
            debug!(
                "heartbeat: {} steps, {:.1}s simulated",
                self.steps,
                self.sim_time.as_secs_f64()
            );
            self.since_log = Duration::ZERO;
        }
        Ok(())
    }

    fn render(&mut self, _dt: Duration) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_fixed_steps_only() {
        let mut heartbeat = Heartbeat::new();
        for _ in 0..3 {
            heartbeat.update(Duration::from_millis(33)).unwrap();
        }
        heartbeat.render(Duration::from_millis(100)).unwrap();
        assert_eq!(heartbeat.steps(), 3);
    }
}
