//! The closed set of events the core publishes.

use engine::{Judgment, Note, Section};

/// Discriminant for an [`Event`], used for subscription and for tagging
/// synthetic `ERROR` events with the kind that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    Stop,
    Pause,
    Resume,
    Update,
    Render,
    Error,
    PatternLoaded,
    PatternStarted,
    PatternPaused,
    PatternResumed,
    PatternStopped,
    PatternCompleted,
    SectionChanged,
    NoteTriggered,
    HitJudged,
    CalibrationUpdated,
}

/// A single published event, carrying whatever payload its kind defines.
#[derive(Debug, Clone)]
pub enum Event {
    Start,
    Stop,
    Pause,
    Resume,
    Update { game_time_ms: f64 },
    Render { delta_time_ms: f64, interpolation: f64 },
    /// Carries the event kind that failed and the reason; emitted by the
    /// bus itself when a handler errors, never manufactured by callers.
    Error { source_kind: EventKind, reason: String },
    PatternLoaded { pattern_id: String },
    PatternStarted { pattern_id: String },
    PatternPaused { pattern_id: String },
    PatternResumed { pattern_id: String },
    PatternStopped { pattern_id: String },
    PatternCompleted { pattern_id: String },
    SectionChanged { section: Section, game_time_ms: f64 },
    NoteTriggered { note_index: usize, note: Note, scheduled_ms: f64, game_time_ms: f64 },
    HitJudged { judgment: Judgment },
    CalibrationUpdated { device_id: String },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Start => EventKind::Start,
            Self::Stop => EventKind::Stop,
            Self::Pause => EventKind::Pause,
            Self::Resume => EventKind::Resume,
            Self::Update { .. } => EventKind::Update,
            Self::Render { .. } => EventKind::Render,
            Self::Error { .. } => EventKind::Error,
            Self::PatternLoaded { .. } => EventKind::PatternLoaded,
            Self::PatternStarted { .. } => EventKind::PatternStarted,
            Self::PatternPaused { .. } => EventKind::PatternPaused,
            Self::PatternResumed { .. } => EventKind::PatternResumed,
            Self::PatternStopped { .. } => EventKind::PatternStopped,
            Self::PatternCompleted { .. } => EventKind::PatternCompleted,
            Self::SectionChanged { .. } => EventKind::SectionChanged,
            Self::NoteTriggered { .. } => EventKind::NoteTriggered,
            Self::HitJudged { .. } => EventKind::HitJudged,
            Self::CalibrationUpdated { .. } => EventKind::CalibrationUpdated,
        }
    }
}
