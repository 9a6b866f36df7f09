//! Engine configuration: pacing, pause polling, persistence and limits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SortError, SortResult};
use crate::step::DEFAULT_STEP_DELAY_MS;

/// Smallest per-step delay a caller may request (ms).
pub const MIN_DELAY_MS: u64 = 100;
/// Largest per-step delay a caller may request (ms).
pub const MAX_DELAY_MS: u64 = 2000;

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Advisory delay recorded on each step when the caller supplies none.
    pub default_delay_ms: u64,
    /// Re-poll interval while a run is paused.
    pub pause_poll_interval_ms: u64,
    /// Sleep for each step's delay while generating (cancellable).
    pub pace_steps: bool,
    /// Hand successful runs to the step store.
    pub persist_steps: bool,
    /// Widest `max - min + 1` counting sort will allocate a table for.
    pub max_counting_span: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_delay_ms: DEFAULT_STEP_DELAY_MS,
            pause_poll_interval_ms: 100,
            pace_steps: false,
            persist_steps: true,
            max_counting_span: 1 << 20,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> SortResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| SortError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SortResult<()> {
        if self.pause_poll_interval_ms == 0 {
            return Err(SortError::InvalidConfig {
                reason: "pause_poll_interval_ms must be > 0".to_string(),
            });
        }
        if self.max_counting_span == 0 {
            return Err(SortError::InvalidConfig {
                reason: "max_counting_span must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Clamp a caller-requested delay into `[MIN_DELAY_MS, MAX_DELAY_MS]`.
    pub fn clamp_delay(delay_ms: u64) -> u64 {
        delay_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS)
    }

    pub fn pause_poll_interval(&self) -> Duration {
        Duration::from_millis(self.pause_poll_interval_ms)
    }
}
