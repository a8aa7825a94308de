//! Validation errors for the core data model.

use thiserror::Error;

/// Raised while constructing a [`crate::Pattern`] from loaded data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatternDataError {
    #[error("notes are not sorted ascending by time_ms (violation at note index {at_index})")]
    NotesNotSorted { at_index: usize },

    #[error("sections overlap: '{first}' and '{second}'")]
    OverlappingSections { first: String, second: String },

    #[error("section '{id}' has end_ms before start_ms")]
    InvalidSection { id: String },
}
