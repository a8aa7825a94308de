//! Core data model for the rhythm timing engine.
//!
//! This crate defines the value types shared by every other component:
//! patterns and notes loaded ahead of time, hit events delivered by an
//! external MIDI adapter, and the judgments/score produced by scoring them.
//! It owns no clocks, no threads, no I/O — just the shapes everyone else
//! agrees on.

mod error;
mod hit;
mod judgment;
mod note;
mod pattern;
mod score;

pub use error::PatternDataError;
pub use hit::HitEvent;
pub use judgment::{Accuracy, Judgment};
pub use note::{DrumKind, Note};
pub use pattern::{DuplicateNote, Pattern, PatternMetadata, Section};
pub use score::{multiplier_for_combo, JudgmentCounts, ScoreState};
