use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing of the render loop's deferred work.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Delay between two frames of the agent's move animation.
    pub animation_step_ms: u64,
    /// How long a finished round stays on screen before the board resets.
    pub reset_delay_ms: u64,
    /// Seed for board generation, random when unset.
    pub seed: Option<u64>,
}

impl LoopConfig {
    pub const fn animation_step(&self) -> Duration {
        Duration::from_millis(self.animation_step_ms)
    }

    pub const fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            animation_step_ms: 100,
            reset_delay_ms: 1500,
            seed: None,
        }
    }
}
