//! Calibration routine configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub sample_count: u32,
    pub min_samples: u32,
    pub outlier_mad_factor: f64,
    /// Below this, a successful calibration is still stored but returned
    /// as [`crate::CalibrationError::LowConfidence`].
    pub low_confidence_threshold: f64,
    pub sample_timeout_ms: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            sample_count: 12,
            min_samples: 3,
            outlier_mad_factor: 3.0,
            low_confidence_threshold: 0.5,
            sample_timeout_ms: 5_000.0,
        }
    }
}
