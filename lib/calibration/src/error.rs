//! Calibration and persistence errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("not enough calibration samples: received {received}, need at least {required}")]
    NotEnoughSamples { received: usize, required: usize },

    /// Still stored (with `confidence` set on the profile) — this is a
    /// warning the caller may surface, not a rejection.
    #[error("calibration confidence is low: {confidence:.2}")]
    LowConfidence { confidence: f64 },

    #[error("calibration store failed: {reason}")]
    Storage { reason: String },
}
