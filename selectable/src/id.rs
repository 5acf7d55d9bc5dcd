//! Identifiers for items, hosts and subscriptions.
//!
//! Ids are handed out from process-wide counters, so they are unique for the
//! lifetime of the process and order by creation. Back-references between
//! items and hosts are always stored as ids and resolved through the
//! [`Engine`](crate::Engine), never as owning pointers.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Unique identifier for a selectable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ItemId(usize);

impl ItemId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Get the raw counter value.
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

/// Unique identifier for a selection host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HostId(usize);

impl HostId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Get the raw counter value.
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for HostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "host:{}", self.0)
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

impl SubscriptionId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub:{}", self.0)
    }
}

/// The component a notification is raised on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Item(ItemId),
    Host(HostId),
}

impl From<ItemId> for Source {
    fn from(id: ItemId) -> Self {
        Source::Item(id)
    }
}

impl From<HostId> for Source {
    fn from(id: HostId) -> Self {
        Source::Host(id)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Item(id) => id.fmt(f),
            Source::Host(id) => id.fmt(f),
        }
    }
}
