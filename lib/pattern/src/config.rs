//! Pattern player configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternPlayerConfig {
    /// A note at `time_ms <= t + trigger_buffer_ms` fires, letting a
    /// slightly-early check still land in the current tick.
    pub trigger_buffer_ms: f64,
    /// Notes within `[t, t + lookahead_ms]` are exposed for upcoming-note
    /// rendering.
    pub lookahead_ms: f64,
}

impl Default for PatternPlayerConfig {
    fn default() -> Self {
        Self { trigger_buffer_ms: 10.0, lookahead_ms: 500.0 }
    }
}
