//! Judge configuration and runtime errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JudgeError {
    /// A hit arrived with a drum kind the judge has no window for.
    #[error("hit carries an unknown kind")]
    UnknownKind,
}
