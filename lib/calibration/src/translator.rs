//! Maps raw input-domain timestamps into the audio/game clock domain.

/// Input event timestamps and audio-scheduling timestamps may originate in
/// different clock domains (e.g. a MIDI device's own clock vs. the audio
/// backend's). `ClockTranslator` records the first observed pair and
/// applies a fixed affine transform for everything after, so the rest of
/// the system never touches a raw input clock directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockTranslator {
    origin: Option<(f64, f64)>,
}

impl ClockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `(audio_t0, input_t0)` on the first call; subsequent calls
    /// are no-ops so the mapping stays fixed for the session.
    pub fn record_start(&mut self, audio_t0: f64, input_t0: f64) {
        if self.origin.is_none() {
            self.origin = Some((audio_t0, input_t0));
        }
    }

    pub fn is_established(&self) -> bool {
        self.origin.is_some()
    }

    /// Converts a raw input-domain timestamp to the audio/game domain.
    /// Returns the timestamp unchanged if the origin pair hasn't been
    /// recorded yet.
    pub fn to_audio_domain(&self, input_raw_ms: f64) -> f64 {
        match self.origin {
            Some((audio_t0, input_t0)) => audio_t0 + (input_raw_ms - input_t0),
            None => input_raw_ms,
        }
    }

    pub fn reset(&mut self) {
        self.origin = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_input_domain_to_audio_domain_after_origin_recorded() {
        let mut translator = ClockTranslator::new();
        translator.record_start(1_000.0, 50_000.0);
        assert_eq!(translator.to_audio_domain(50_100.0), 1_100.0);
    }

    #[test]
    fn ignores_subsequent_record_start_calls() {
        let mut translator = ClockTranslator::new();
        translator.record_start(1_000.0, 50_000.0);
        translator.record_start(9_999.0, 1.0);
        assert_eq!(translator.to_audio_domain(50_050.0), 1_050.0);
    }

    #[test]
    fn passes_through_before_origin_is_established() {
        let translator = ClockTranslator::new();
        assert!(!translator.is_established());
        assert_eq!(translator.to_audio_domain(42.0), 42.0);
    }
}
