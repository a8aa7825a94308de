//! Adapts a concrete `LatencyCalibrator` to the judge's narrow
//! `HitCompensator` seam, so `lib/judge` never has to depend on
//! `lib/calibration`'s store-parameterized generic.

use calibration::{CalibrationStore, LatencyCalibrator};
use judge::HitCompensator;

pub struct CalibratorAdapter<S: CalibrationStore> {
    calibrator: LatencyCalibrator<S>,
}

impl<S: CalibrationStore> CalibratorAdapter<S> {
    pub fn new(calibrator: LatencyCalibrator<S>) -> Self {
        Self { calibrator }
    }
}

impl<S: CalibrationStore> HitCompensator for CalibratorAdapter<S> {
    fn compensate(&self, device_id: &str, raw_input_ms: f64) -> f64 {
        match self.calibrator.compensate(device_id, raw_input_ms) {
            Ok(compensated) => compensated,
            Err(err) => {
                log::warn!("no usable calibration for '{device_id}' ({err}), using raw timestamp");
                raw_input_ms
            }
        }
    }
}
