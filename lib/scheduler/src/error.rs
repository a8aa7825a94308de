//! Errors the scheduler catches on behalf of its caller.
//!
//! Neither variant ever escapes [`crate::Scheduler::tick`]: both are caught,
//! logged and turned into a synthetic `ERROR` event on the bus.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("update callback failed: {reason}")]
    UpdateFailure { reason: String },

    #[error("render callback failed: {reason}")]
    RenderFailure { reason: String },
}
