//! Observer registry for engine lifecycle and phase events
//!
//! Subscribers are plain `FnMut` closures delivered synchronously in
//! subscription order, each call blocking the next. Delivery is fail-fast:
//! a panicking subscriber aborts the frame that emitted the event; nothing
//! is caught or isolated.

use std::time::Duration;

/// Identifies a subscription within the [`Signal`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A single broadcast channel with ordered, synchronous delivery.
pub struct Signal<T> {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    /// Register a handler. Handlers fire in subscription order.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if the id was already disposed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Deliver `payload` to every handler in subscription order.
    pub fn emit(&mut self, payload: &T) {
        for (_, handler) in &mut self.handlers {
            handler(payload);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// The four engine event channels.
#[derive(Default)]
pub struct EngineEvents {
    /// Fired after the engine has initialized.
    pub on_init: Signal<()>,
    /// Fired before the engine stops.
    pub on_stop: Signal<()>,
    /// Fired before each update phase, with the fixed step delta.
    pub on_update: Signal<Duration>,
    /// Fired before each render phase, with the wall-clock frame delta.
    pub on_render: Signal<Duration>,
}
