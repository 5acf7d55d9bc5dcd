//! Generic publish/subscribe keyed by source and raw notification name.

use crate::event::{ALL_EVENTS, INTERNAL_MARKER, Notification};
use crate::id::{Source, SubscriptionId};

/// Subscriber callback.
pub type Callback = Box<dyn FnMut(&Notification)>;

struct Subscription {
    id: SubscriptionId,
    source: Source,
    name: String,
    callback: Callback,
}

impl Subscription {
    fn matches(&self, source: Source, name: &str) -> bool {
        self.source == source
            && (self.name == name
                || (self.name == ALL_EVENTS && !name.starts_with(INTERNAL_MARKER)))
    }
}

/// Publish/subscribe registry.
///
/// Subscribers registered under [`ALL_EVENTS`] receive every public
/// notification of their source. Callbacks run in subscription order.
#[derive(Default)]
pub struct PubSub {
    subscriptions: Vec<Subscription>,
}

impl PubSub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `name` on `source`.
    pub fn subscribe<F>(
        &mut self,
        source: Source,
        name: impl Into<String>,
        callback: F,
    ) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        let id = SubscriptionId::new();
        self.subscriptions.push(Subscription {
            id,
            source,
            name: name.into(),
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a subscription. Returns false if it did not exist.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Remove every subscription on `source`. Returns how many were removed.
    pub fn unsubscribe_source(&mut self, source: Source) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.source != source);
        before - self.subscriptions.len()
    }

    /// Deliver `notification` to every subscriber of `name` on `source`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn notify(&mut self, source: Source, name: &str, notification: &Notification) -> usize {
        let mut delivered = 0;
        for subscription in self
            .subscriptions
            .iter_mut()
            .filter(|s| s.matches(source, name))
        {
            (subscription.callback)(notification);
            delivered += 1;
        }
        delivered
    }

    /// Number of subscriptions on `source`.
    pub fn subscriber_count(&self, source: Source) -> usize {
        self.subscriptions
            .iter()
            .filter(|s| s.source == source)
            .count()
    }
}

impl std::fmt::Debug for PubSub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubSub")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
