//! Operation context and the propagation guard.
//!
//! One `OperationContext` is created at the top of every public call (bulk
//! multi-pick calls create one per member) and handed by `&mut` through every
//! nested call that belongs to the same logical operation. Items call hosts
//! and hosts call items; the guard stops that mutual recursion by recording
//! which component already handled which step.
//!
//! The same set also marks multi-pick hosts that are in the middle of a
//! mutation, so only the outermost call on a host reports its aggregate.

use std::collections::HashSet;

use log::trace;

use crate::id::{HostId, ItemId};

/// Direction of a propagation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Select,
    Deselect,
}

/// Key recorded in the guard once a component has handled a step.
///
/// Hosts are keyed per item so a host can settle several items within one
/// operation (a single-pick swap touches two).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardKey {
    Item(ItemId, Step),
    Edge(HostId, ItemId, Step),
    /// A multi-pick host is settling a mutation; held until it has emitted
    /// its aggregate, then released with [`OperationContext::leave`].
    Aggregate(HostId),
}

/// State shared by every call of one logical operation.
#[derive(Debug, Default)]
pub struct OperationContext {
    processed: HashSet<GuardKey>,
}

impl OperationContext {
    /// Create a fresh context for a top-level call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as processed.
    ///
    /// Returns false if it already was, in which case the caller must return
    /// without mutating or notifying.
    pub fn enter(&mut self, key: GuardKey) -> bool {
        let fresh = self.processed.insert(key);
        if !fresh {
            trace!("guard: {:?} already processed", key);
        }
        fresh
    }

    /// Release a scoped key such as [`GuardKey::Aggregate`].
    pub fn leave(&mut self, key: GuardKey) {
        self.processed.remove(&key);
    }

    /// Check whether `key` has been processed in this operation.
    pub fn is_processed(&self, key: GuardKey) -> bool {
        self.processed.contains(&key)
    }

    /// Number of steps processed so far.
    pub fn len(&self) -> usize {
        self.processed.len()
    }

    /// Check if nothing has been processed yet.
    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_once() {
        let mut ctx = OperationContext::new();
        let key = GuardKey::Item(ItemId::new(), Step::Select);
        assert!(ctx.enter(key));
        assert!(!ctx.enter(key));
        assert!(ctx.is_processed(key));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_steps_are_distinct() {
        let mut ctx = OperationContext::new();
        let item = ItemId::new();
        let host = HostId::new();
        assert!(ctx.enter(GuardKey::Edge(host, item, Step::Select)));
        assert!(ctx.enter(GuardKey::Edge(host, item, Step::Deselect)));
        assert!(ctx.enter(GuardKey::Item(item, Step::Select)));
        assert!(!ctx.is_processed(GuardKey::Item(item, Step::Deselect)));
    }

    #[test]
    fn test_aggregate_key_is_scoped() {
        let mut ctx = OperationContext::new();
        let host = HostId::new();
        assert!(ctx.enter(GuardKey::Aggregate(host)));
        assert!(!ctx.enter(GuardKey::Aggregate(host)));
        ctx.leave(GuardKey::Aggregate(host));
        assert!(!ctx.is_processed(GuardKey::Aggregate(host)));
        assert!(ctx.enter(GuardKey::Aggregate(host)));
    }
}
