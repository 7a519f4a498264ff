//! Engine configuration

use kiln_core::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest usable update step. A zero step would make the drain loop spin
/// forever, so the scheduler never reads anything below this.
pub const MIN_TIME_STEP: Duration = Duration::from_millis(1);

/// Engine tuning knobs.
///
/// Fields are plain data and may be edited at runtime through
/// [`Engine::config_mut`](crate::Engine::config_mut); the scheduler reads
/// them fresh on every frame. Missing fields deserialize to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Mount target for the host shell (window title, canvas id). Opaque to
    /// the core.
    pub container_id: String,
    /// Milliseconds of simulation advanced by one update step.
    pub time_step_ms: u64,
    /// Stall threshold in whole steps: a frame delta beyond
    /// `time_step * skip_frame_count` resynchronizes with a single step
    /// instead of catching up.
    pub skip_frame_count: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            container_id: "game".to_string(),
            time_step_ms: 33,
            skip_frame_count: 10,
        }
    }
}

impl EngineConfig {
    /// Parse from TOML, substituting defaults for missing fields.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The update step as a duration, clamped to [`MIN_TIME_STEP`].
    pub fn time_step(&self) -> Duration {
        Duration::from_millis(self.time_step_ms).max(MIN_TIME_STEP)
    }

    /// The stall threshold step count, clamped to at least one.
    pub fn effective_skip_frame_count(&self) -> u32 {
        self.skip_frame_count.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.container_id, "game");
        assert_eq!(config.time_step(), Duration::from_millis(33));
        assert_eq!(config.effective_skip_frame_count(), 10);
    }

    #[test]
    fn zero_time_step_clamps_to_minimum() {
        let config = EngineConfig {
            time_step_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.time_step(), MIN_TIME_STEP);
    }

    #[test]
    fn zero_skip_count_clamps_to_one() {
        let config = EngineConfig {
            skip_frame_count: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_skip_frame_count(), 1);
    }

    #[test]
    fn partial_toml_substitutes_defaults() {
        let config = EngineConfig::from_toml_str("time_step_ms = 16\n").unwrap();
        assert_eq!(config.time_step_ms, 16);
        assert_eq!(config.container_id, "game");
        assert_eq!(config.skip_frame_count, 10);
    }

    #[test]
    fn toml_round_trip() {
        let config = EngineConfig {
            container_id: "demo".to_string(),
            time_step_ms: 16,
            skip_frame_count: 5,
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(EngineConfig::from_toml_str("time_step_ms = \"fast\"").is_err());
    }
}
