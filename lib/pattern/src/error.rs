//! Pattern player and loader errors.

use thiserror::Error;

/// Raised by a [`crate::PatternLoader`] when it cannot produce a pattern
/// for a given path.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("failed to load pattern from '{path}': {reason}")]
pub struct LoadError {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatternError {
    /// Returned by operations that require a loaded pattern when none is
    /// loaded; callers generally treat this as a no-op rather than a hard
    /// failure.
    #[error("no pattern is loaded")]
    Unloaded,

    #[error("failed to load pattern: {0}")]
    LoadFailed(#[from] LoadError),

    #[error(transparent)]
    InvalidPattern(#[from] engine::PatternDataError),
}
