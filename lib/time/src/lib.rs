//! The deterministic game clock underlying the rhythm timing engine.
//!
//! [`TimeProvider`] turns variable wall-clock ticks into a fixed-timestep
//! accumulator: it never decides how many steps to actually run per frame,
//! that policy belongs to whatever drives it (the scheduler). It only
//! measures and bookkeeps.

mod config;
mod error;
mod provider;

pub use config::TimeProviderConfig;
pub use error::TimeError;
pub use provider::{FrameAdvance, TimeProvider};
