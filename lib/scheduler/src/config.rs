//! Scheduler configuration.

use serde::{Deserialize, Serialize};
use time::TimeProviderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub target_fps: u32,
    pub max_updates_per_frame: u32,
    /// Size of the rolling window [`crate::PerfMonitor`] keeps for frame
    /// time, FPS and update-count samples.
    pub perf_window_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { target_fps: 60, max_updates_per_frame: 5, perf_window_size: 60 }
    }
}

impl SchedulerConfig {
    pub fn time_provider_config(&self) -> TimeProviderConfig {
        TimeProviderConfig { target_fps: self.target_fps }
    }
}
