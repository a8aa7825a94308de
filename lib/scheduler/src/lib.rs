//! Fixed-timestep driver sitting between a variable-rate frame source and
//! the rest of the rhythm timing engine.

mod config;
mod error;
mod perf;
mod scheduler;

pub use config::SchedulerConfig;
pub use error::SchedulerError;
pub use perf::{PerfMonitor, PerfStats};
pub use scheduler::Scheduler;
