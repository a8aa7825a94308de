//! Hit windows and the scoring table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub perfect_window_ms: f64,
    pub good_window_ms: f64,
    pub ok_window_ms: f64,

    pub points_perfect: u64,
    pub points_good: u64,
    pub points_ok: u64,
    pub points_miss: u64,

    /// An `ok` judgment keeps the combo running unless this is set.
    pub combo_breaks_on_ok: bool,
    /// A ghost hit never breaks combo unless this is set.
    pub ghost_hit_breaks_combo: bool,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            perfect_window_ms: 30.0,
            good_window_ms: 60.0,
            ok_window_ms: 100.0,
            points_perfect: 100,
            points_good: 50,
            points_ok: 20,
            points_miss: 0,
            combo_breaks_on_ok: false,
            ghost_hit_breaks_combo: false,
        }
    }
}
