//! Incoming drum-hit events, as delivered by an external MIDI adapter.

use crate::note::DrumKind;
use serde::{Deserialize, Serialize};

/// A single drum hit produced by a MIDI adapter (out of scope for this
/// crate — the adapter owns mapping MIDI note numbers to [`DrumKind`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEvent {
    pub kind: DrumKind,
    pub raw_timestamp_ms: f64,
    /// MIDI velocity, 0..=127.
    pub velocity: u8,
    pub device_id: String,
}

impl HitEvent {
    pub fn new(
        kind: DrumKind,
        raw_timestamp_ms: f64,
        velocity: u8,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            raw_timestamp_ms,
            velocity: velocity.min(127),
            device_id: device_id.into(),
        }
    }
}
