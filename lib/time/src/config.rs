//! Clock configuration.

use crate::error::TimeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeProviderConfig {
    pub target_fps: u32,
}

impl Default for TimeProviderConfig {
    fn default() -> Self {
        Self { target_fps: 60 }
    }
}

impl TimeProviderConfig {
    pub fn validate(&self) -> Result<(), TimeError> {
        if self.target_fps == 0 {
            return Err(TimeError::InvalidTargetFps);
        }
        Ok(())
    }

    /// The fixed simulation step, in seconds, derived from `target_fps`.
    pub fn fixed_dt(&self) -> f64 {
        1.0 / self.target_fps as f64
    }
}
