//! Judgment outcomes: how a hit (or its absence) was scored.

use crate::hit::HitEvent;
use serde::{Deserialize, Serialize};

/// The accuracy tier assigned to a hit, miss or ghost tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accuracy {
    Perfect,
    Good,
    Ok,
    Miss,
    Ghost,
}

impl std::fmt::Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Perfect => write!(f, "perfect"),
            Self::Good => write!(f, "good"),
            Self::Ok => write!(f, "ok"),
            Self::Miss => write!(f, "miss"),
            Self::Ghost => write!(f, "ghost"),
        }
    }
}

/// The result of matching (or failing to match) a hit against the pattern.
///
/// Exactly one `Judgment` is emitted per hit event, and one per note that is
/// retired as a miss — never both for the same note/hit pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    /// Index into the pattern's notes, if this judgment resolved a note.
    pub note_index: Option<usize>,
    /// The hit that triggered this judgment, if any (absent for misses).
    pub hit: Option<HitEvent>,
    pub accuracy: Accuracy,
    /// Signed delta in milliseconds; negative = early. Zero for miss/ghost.
    pub delta_ms: f64,
    pub score_delta: u64,
    pub combo_after: u32,
    /// Game time at which this judgment was emitted.
    pub game_time_ms: f64,
}
