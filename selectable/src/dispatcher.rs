//! Notification dispatcher.
//!
//! Wraps [`PubSub`] with the dual-dispatch convention: before a notification
//! is broadcast, the handler registered in the emitting component's local
//! slot for that kind (see [`EventKind::handler`]) is invoked with the same
//! notification.

use std::collections::HashMap;

use log::{debug, trace};

use crate::event::{Handler, Notification, handler_name};
use crate::id::{Source, SubscriptionId};
use crate::pubsub::{Callback, PubSub};

/// Local handlers plus the subscriber bus.
#[derive(Default)]
pub struct Dispatcher {
    bus: PubSub,
    handlers: HashMap<(Source, Handler), Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the local handler for `slot` on `source`.
    ///
    /// Returns true if an existing handler was replaced.
    pub fn set_handler<F>(&mut self, source: Source, slot: Handler, callback: F) -> bool
    where
        F: FnMut(&Notification) + 'static,
    {
        self.handlers
            .insert((source, slot), Box::new(callback))
            .is_some()
    }

    /// Remove the local handler for `slot` on `source`.
    pub fn clear_handler(&mut self, source: Source, slot: Handler) -> bool {
        self.handlers.remove(&(source, slot)).is_some()
    }

    /// Check whether `source` defines a handler for `slot`.
    pub fn has_handler(&self, source: Source, slot: Handler) -> bool {
        self.handlers.contains_key(&(source, slot))
    }

    pub fn subscribe<F>(
        &mut self,
        source: Source,
        name: impl Into<String>,
        callback: F,
    ) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        self.bus.subscribe(source, name, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn subscriber_count(&self, source: Source) -> usize {
        self.bus.subscriber_count(source)
    }

    /// Invoke the local handler, then broadcast.
    pub fn emit(&mut self, notification: Notification) {
        debug!("{}", notification);
        let source = notification.source;
        if let Some(handler) = self
            .handlers
            .get_mut(&(source, notification.kind.handler()))
        {
            handler(&notification);
        }
        self.bus
            .notify(source, notification.kind.name(), &notification);
    }

    /// Broadcast on an internal channel name. Local handlers are never invoked.
    pub fn emit_internal(&mut self, name: &str, notification: &Notification) {
        debug_assert!(handler_name(name).is_none(), "'{}' is not internal", name);
        trace!("{} {}", notification.source, name);
        self.bus.notify(notification.source, name, notification);
    }

    /// Drop every subscription and handler of `source`.
    pub fn release(&mut self, source: Source) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|(s, _), _| *s != source);
        (before - self.handlers.len()) + self.bus.unsubscribe_source(source)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("bus", &self.bus)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
