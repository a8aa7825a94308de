//! Errors raised while configuring or driving the game clock.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimeError {
    /// A negative time scale was requested. The provider clamps silently and
    /// never returns this from [`crate::TimeProvider::set_time_scale`]; it
    /// exists so configuration loaders can reject malformed input up front.
    #[error("time scale must be >= 0")]
    NegativeTimeScale,

    #[error("target_fps must be greater than 0")]
    InvalidTargetFps,
}
