//! Drum notes and the kinds of hits they represent.

use serde::{Deserialize, Serialize};

/// The kind of drum hit a note (or an incoming [`HitEvent`](crate::HitEvent))
/// represents.
///
/// The set is open: `Other` carries whatever label an upstream chart or
/// transcription pipeline produced that doesn't map to a known kind, so the
/// core never has to reject a pattern just because it names an unfamiliar
/// drum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrumKind {
    Kick,
    Snare,
    HiHat,
    Tom,
    Cymbal,
    Other(String),
}

impl std::fmt::Display for DrumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kick => write!(f, "kick"),
            Self::Snare => write!(f, "snare"),
            Self::HiHat => write!(f, "hihat"),
            Self::Tom => write!(f, "tom"),
            Self::Cymbal => write!(f, "cymbal"),
            Self::Other(label) => write!(f, "{label}"),
        }
    }
}

/// A single scheduled drum hit within a [`Pattern`](crate::Pattern).
///
/// Notes are immutable once loaded. Per-session state — whether a note has
/// been triggered for rendering, or judged by the scorer — is owned by the
/// components that need it ([`crate::pattern`] callers, the judge), never by
/// the note itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Scheduled time in milliseconds, relative to pattern start.
    pub time_ms: f64,
    pub kind: DrumKind,
    /// Free-form metadata (e.g. accent, limb assignment); untouched by the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Note {
    pub fn new(time_ms: f64, kind: DrumKind) -> Self {
        Self {
            time_ms,
            kind,
            metadata: None,
        }
    }

    pub fn with_metadata(
        mut self,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
