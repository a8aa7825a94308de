//! Per-device calibration data.

use serde::{Deserialize, Serialize};

/// Persisted latency profile for one input device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    pub device_id: String,
    pub input_method: String,
    pub audio_offset_ms: f64,
    pub visual_offset_ms: f64,
    pub input_offset_ms: f64,
    /// Caller-supplied timestamp (milliseconds) of the last successful
    /// calibration run. The crate never reads the system clock itself, so
    /// this is whatever clock domain the host passes in.
    pub last_calibrated_ms: f64,
    pub confidence: f64,
}

impl CalibrationProfile {
    /// A fresh, uncalibrated profile: all offsets zero, as specified for a
    /// device's first run.
    pub fn zeroed(device_id: impl Into<String>, input_method: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            input_method: input_method.into(),
            audio_offset_ms: 0.0,
            visual_offset_ms: 0.0,
            input_offset_ms: 0.0,
            last_calibrated_ms: 0.0,
            confidence: 0.0,
        }
    }

    /// The offset subtracted from a raw input timestamp to align it to
    /// game time.
    pub fn combined_offset_ms(&self) -> f64 {
        self.audio_offset_ms + self.input_offset_ms
    }

    pub fn compensate(&self, raw_input_ms: f64) -> f64 {
        raw_input_ms - self.combined_offset_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_offset_is_audio_plus_input() {
        let profile = CalibrationProfile {
            audio_offset_ms: 20.0,
            input_offset_ms: 30.0,
            ..CalibrationProfile::zeroed("alesis-nitro", "midi")
        };
        assert_eq!(profile.combined_offset_ms(), 50.0);
        assert_eq!(profile.compensate(1050.0), 1000.0);
    }

    #[test]
    fn zeroed_profile_has_no_offsets() {
        let profile = CalibrationProfile::zeroed("alesis-nitro", "midi");
        assert_eq!(profile.combined_offset_ms(), 0.0);
        assert_eq!(profile.confidence, 0.0);
    }
}
