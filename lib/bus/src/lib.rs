//! Synchronous in-process publish/subscribe for the rhythm timing engine's
//! lifecycle and timing events.
//!
//! The bus is deliberately not thread-safe: the core is single-threaded
//! cooperative (frame tick and hit events are the only entry points), so
//! handler storage uses `Rc`/`RefCell` rather than atomics or locks.

mod bus;
mod error;
mod event;

pub use bus::{EventBus, SubscriptionToken};
pub use error::BusError;
pub use event::{Event, EventKind};
