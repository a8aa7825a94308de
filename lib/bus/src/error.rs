//! Event bus errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusError {
    /// A subscribed handler returned an error while processing an event.
    /// The bus catches this, logs it, and (unless the original event was
    /// itself `ERROR`) re-emits it as a synthetic `ERROR` event — this
    /// variant never escapes `emit`.
    #[error("handler failed while processing {kind:?}: {reason}")]
    HandlerFailure { kind: crate::event::EventKind, reason: String },
}
