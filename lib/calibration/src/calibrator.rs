//! Turns raw cue/hit timing samples into a persisted per-device offset.

use crate::config::CalibrationConfig;
use crate::error::CalibrationError;
use crate::profile::CalibrationProfile;
use crate::store::CalibrationStore;

/// Runs the calibration protocol and persists the result through a
/// [`CalibrationStore`].
pub struct LatencyCalibrator<S: CalibrationStore> {
    config: CalibrationConfig,
    store: S,
}

impl<S: CalibrationStore> LatencyCalibrator<S> {
    pub fn new(config: CalibrationConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    fn key_for(device_id: &str) -> String {
        format!("calibration:{device_id}")
    }

    /// Loads a device's profile, or a zeroed one if nothing has been
    /// stored for it yet.
    pub fn load(&self, device_id: &str) -> Result<CalibrationProfile, CalibrationError> {
        match self.store.get(&Self::key_for(device_id))? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| CalibrationError::Storage { reason: err.to_string() }),
            None => Ok(CalibrationProfile::zeroed(device_id, "unknown")),
        }
    }

    fn save(&mut self, profile: &CalibrationProfile) -> Result<(), CalibrationError> {
        let bytes = serde_json::to_vec(profile)
            .map_err(|err| CalibrationError::Storage { reason: err.to_string() })?;
        self.store.put(&Self::key_for(&profile.device_id), bytes)
    }

    /// Runs one calibration pass from `(t_cue, t_input)` sample pairs and
    /// persists the resulting profile's `input_offset_ms` and `confidence`.
    ///
    /// Returns [`CalibrationError::NotEnoughSamples`] without touching the
    /// stored profile if fewer than `min_samples` pairs are given.
    /// Returns [`CalibrationError::LowConfidence`] *after* persisting if
    /// the computed confidence falls below the configured threshold — the
    /// profile is still usable, just flagged.
    pub fn calibrate(
        &mut self,
        device_id: &str,
        input_method: &str,
        samples: &[(f64, f64)],
        now_ms: f64,
    ) -> Result<CalibrationProfile, CalibrationError> {
        if samples.len() < self.config.min_samples as usize {
            return Err(CalibrationError::NotEnoughSamples {
                received: samples.len(),
                required: self.config.min_samples as usize,
            });
        }

        let deltas: Vec<f64> = samples.iter().map(|&(t_cue, t_in)| t_in - t_cue).collect();
        let raw_median = median(&deltas);
        let mad_value = mad(&deltas, raw_median);
        let threshold = self.config.outlier_mad_factor * mad_value;
        let filtered: Vec<f64> = if mad_value > 0.0 {
            deltas.iter().copied().filter(|d| (d - raw_median).abs() <= threshold).collect()
        } else {
            deltas
        };
        let offset = median(&filtered);
        let mean_value = mean(&filtered);
        let stddev_value = stddev(&filtered, mean_value);
        let confidence = if mean_value.abs() < f64::EPSILON {
            0.0
        } else {
            (1.0 - stddev_value / mean_value).clamp(0.0, 1.0)
        };

        let mut profile = self.load(device_id)?;
        profile.device_id = device_id.to_string();
        profile.input_method = input_method.to_string();
        profile.input_offset_ms = offset;
        profile.last_calibrated_ms = now_ms;
        profile.confidence = confidence;
        self.save(&profile)?;

        if confidence < self.config.low_confidence_threshold {
            Err(CalibrationError::LowConfidence { confidence })
        } else {
            Ok(profile)
        }
    }

    pub fn set_visual_offset(
        &mut self,
        device_id: &str,
        visual_offset_ms: f64,
        now_ms: f64,
    ) -> Result<CalibrationProfile, CalibrationError> {
        let mut profile = self.load(device_id)?;
        profile.visual_offset_ms = visual_offset_ms;
        profile.last_calibrated_ms = now_ms;
        self.save(&profile)?;
        Ok(profile)
    }

    pub fn set_audio_offset(
        &mut self,
        device_id: &str,
        audio_offset_ms: f64,
        now_ms: f64,
    ) -> Result<CalibrationProfile, CalibrationError> {
        let mut profile = self.load(device_id)?;
        profile.audio_offset_ms = audio_offset_ms;
        profile.last_calibrated_ms = now_ms;
        self.save(&profile)?;
        Ok(profile)
    }

    pub fn compensate(&self, device_id: &str, raw_input_ms: f64) -> Result<f64, CalibrationError> {
        Ok(self.load(device_id)?.compensate(raw_input_ms))
    }
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn mad(values: &[f64], center: f64) -> f64 {
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn stddev(values: &[f64], mean_value: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean_value).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
