//! The synchronous, single-threaded event bus.

use crate::error::BusError;
use crate::event::{Event, EventKind};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A value returned by [`EventBus::subscribe`] that identifies a
/// registered handler so it can later be removed with
/// [`EventBus::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

struct Handler {
    once: bool,
    callback: Box<dyn FnMut(&Event) -> Result<(), String>>,
}

/// Fan-out of [`Event`]s to zero or more listeners, dispatched synchronously
/// in subscription order.
///
/// Dispatch iterates a snapshot of the handler list taken at the start of
/// `emit`: a handler that subscribes or unsubscribes in response to an
/// event never affects the dispatch already in progress. The bus is not
/// `Send`/`Sync` — it is only ever touched from the core thread.
#[derive(Default)]
pub struct EventBus {
    next_token: u64,
    handlers: HashMap<EventKind, Vec<(u64, Rc<RefCell<Handler>>)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `kind`, invoked on every matching `emit`
    /// until unsubscribed.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&Event) -> Result<(), String> + 'static,
    ) -> SubscriptionToken {
        self.insert_handler(kind, handler, false)
    }

    /// Registers `handler` for `kind`; it is automatically unsubscribed
    /// after its first invocation, whether or not it returned an error.
    pub fn subscribe_once(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&Event) -> Result<(), String> + 'static,
    ) -> SubscriptionToken {
        self.insert_handler(kind, handler, true)
    }

    fn insert_handler(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&Event) -> Result<(), String> + 'static,
        once: bool,
    ) -> SubscriptionToken {
        let token = self.next_token;
        self.next_token += 1;
        let entry = Rc::new(RefCell::new(Handler { once, callback: Box::new(handler) }));
        self.handlers.entry(kind).or_default().push((token, entry));
        SubscriptionToken(token)
    }

    /// Removes a single handler by its token, regardless of kind.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) {
        for handlers in self.handlers.values_mut() {
            handlers.retain(|(t, _)| *t != token.0);
        }
    }

    /// Removes every handler subscribed to `kind`.
    pub fn unsubscribe_kind(&mut self, kind: EventKind) {
        self.handlers.remove(&kind);
    }

    /// Removes every handler for every kind.
    pub fn unsubscribe_all(&mut self) {
        self.handlers.clear();
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Dispatches `event` to every handler subscribed to its kind, in
    /// subscription order.
    ///
    /// A handler error is logged and, unless `event` is itself `Error`,
    /// re-emitted as a synthetic [`Event::Error`] — it never propagates to
    /// the caller of `emit`.
    pub fn emit(&mut self, event: &Event) {
        let kind = event.kind();
        let snapshot: Vec<(u64, Rc<RefCell<Handler>>)> =
            self.handlers.get(&kind).cloned().unwrap_or_default();

        let mut once_tokens = Vec::new();
        for (token, handler_rc) in snapshot {
            let outcome = {
                let mut handler = handler_rc.borrow_mut();
                (handler.callback)(event)
            };
            if handler_rc.borrow().once {
                once_tokens.push(token);
            }
            if let Err(reason) = outcome {
                let failure = BusError::HandlerFailure { kind, reason: reason.clone() };
                log::error!("{failure}");
                if kind != EventKind::Error {
                    self.emit(&Event::Error { source_kind: kind, reason });
                }
            }
        }
        for token in once_tokens {
            self.unsubscribe(SubscriptionToken(token));
        }
    }
}
