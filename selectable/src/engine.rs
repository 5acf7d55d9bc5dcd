//! The engine: owner of every item and host, and the public operations.
//!
//! Items and hosts reference each other only by id. Each public operation
//! creates a fresh [`OperationContext`] and runs to completion, including
//! all propagation and notification, before it returns.
//!
//! # Example
//!
//! ```
//! use selectable::Engine;
//!
//! let mut engine = Engine::new();
//! let host = engine.multi_host();
//! let a = engine.create_item();
//! let b = engine.create_item();
//! engine.add(host, a).unwrap();
//! engine.add(host, b).unwrap();
//!
//! engine.select_all(host).unwrap();
//! assert_eq!(engine.selected_count(host).unwrap(), 2);
//! assert!(engine.is_selected(a).unwrap());
//! ```

use std::collections::HashMap;

use log::debug;

use crate::context::OperationContext;
use crate::dispatcher::Dispatcher;
use crate::error::{InvariantViolation, SelectError};
use crate::event::{ALL_EVENTS, EventKind, Handler, Notification, Payload};
use crate::host::{Host, HostConfig, HostKind, HostState};
use crate::id::{HostId, ItemId, Source, SubscriptionId};
use crate::item::Item;
use crate::options::SelectOptions;

/// Owner of all items, hosts and notification plumbing.
#[derive(Debug, Default)]
pub struct Engine {
    pub(crate) items: HashMap<ItemId, Item>,
    pub(crate) hosts: HashMap<HostId, Host>,
    pub(crate) dispatcher: Dispatcher,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Creation and lifecycle
    // -------------------------------------------------------------------------

    /// Create an unselected item that belongs to no host.
    pub fn create_item(&mut self) -> ItemId {
        let item = Item::new();
        let id = item.id();
        self.items.insert(id, item);
        id
    }

    /// Create a host with an empty backing collection.
    pub fn create_host(&mut self, config: HostConfig) -> HostId {
        let host = Host::new(config);
        let id = host.id();
        debug!("created {} host {}", host.kind(), host.display_name());
        self.hosts.insert(id, host);
        id
    }

    pub fn single_host(&mut self) -> HostId {
        self.create_host(HostConfig::single())
    }

    pub fn multi_host(&mut self) -> HostId {
        self.create_host(HostConfig::multi())
    }

    /// Close a host.
    ///
    /// Every member's membership with the host is released and the host's
    /// subscriptions and handlers are dropped. Item flags are left as they are.
    pub fn close_host(&mut self, host: HostId) -> Result<(), SelectError> {
        let closed = self
            .hosts
            .remove(&host)
            .ok_or(SelectError::UnknownHost(host))?;
        for item in closed.items.iter() {
            self.release(item, host);
        }
        let dropped = self.dispatcher.release(Source::Host(host));
        debug!("closed {} ({} listeners dropped)", closed.display_name(), dropped);
        Ok(())
    }

    /// Remove an item from every host it belongs to, then drop it.
    pub fn remove_item(&mut self, item: ItemId) -> Result<(), SelectError> {
        let hosts = self.require_item(item)?.memberships.hosts();
        for host in hosts {
            self.remove(host, item)?;
        }
        self.items.remove(&item);
        self.dispatcher.release(Source::Item(item));
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Item operations
    // -------------------------------------------------------------------------

    pub fn select_item(&mut self, item: ItemId) -> Result<(), SelectError> {
        self.select_item_with(item, SelectOptions::default())
    }

    /// Select an item and every host it belongs to.
    ///
    /// Selecting an already selected item is a reselection: nothing changes,
    /// but hosts are reached again and `reselected` is emitted.
    pub fn select_item_with(
        &mut self,
        item: ItemId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_item(item)?;
        let mut ctx = OperationContext::new();
        self.item_select(&mut ctx, item, opts);
        Ok(())
    }

    pub fn deselect_item(&mut self, item: ItemId) -> Result<(), SelectError> {
        self.deselect_item_with(item, SelectOptions::default())
    }

    pub fn deselect_item_with(
        &mut self,
        item: ItemId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_item(item)?;
        let mut ctx = OperationContext::new();
        self.item_deselect(&mut ctx, item, opts);
        Ok(())
    }

    pub fn toggle_item(&mut self, item: ItemId) -> Result<(), SelectError> {
        self.toggle_item_with(item, SelectOptions::default())
    }

    pub fn toggle_item_with(
        &mut self,
        item: ItemId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_item(item)?;
        let mut ctx = OperationContext::new();
        self.item_toggle(&mut ctx, item, opts);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Host operations
    // -------------------------------------------------------------------------

    pub fn select(&mut self, host: HostId, item: ItemId) -> Result<(), SelectError> {
        self.select_with(host, item, SelectOptions::default())
    }

    /// Select `item` in `host`. A no-op if the item is not a member.
    pub fn select_with(
        &mut self,
        host: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_host(host)?;
        self.require_item(item)?;
        let mut ctx = OperationContext::new();
        self.host_select(&mut ctx, host, item, opts);
        Ok(())
    }

    pub fn deselect(&mut self, host: HostId, item: ItemId) -> Result<(), SelectError> {
        self.deselect_with(host, item, SelectOptions::default())
    }

    /// Deselect `item` in `host`. A no-op if the host does not hold it.
    pub fn deselect_with(
        &mut self,
        host: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_host(host)?;
        self.require_item(item)?;
        let mut ctx = OperationContext::new();
        self.host_deselect(&mut ctx, host, item, opts);
        Ok(())
    }

    pub fn toggle(&mut self, host: HostId, item: ItemId) -> Result<(), SelectError> {
        self.toggle_with(host, item, SelectOptions::default())
    }

    pub fn toggle_with(
        &mut self,
        host: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_host(host)?;
        self.require_item(item)?;
        let mut ctx = OperationContext::new();
        self.host_toggle(&mut ctx, host, item, opts);
        Ok(())
    }

    pub fn select_all(&mut self, host: HostId) -> Result<(), SelectError> {
        self.select_all_with(host, SelectOptions::default())
    }

    /// Select every member of a multi-pick host with one aggregate notification.
    ///
    /// Each member is settled as its own propagation.
    pub fn select_all_with(
        &mut self,
        host: HostId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_kind(host, HostKind::Multi)?;
        self.multi_select_all(host, opts);
        Ok(())
    }

    pub fn deselect_all(&mut self, host: HostId) -> Result<(), SelectError> {
        self.deselect_all_with(host, SelectOptions::default())
    }

    /// Deselect everything in a multi-pick host with one aggregate notification.
    pub fn deselect_all_with(
        &mut self,
        host: HostId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_kind(host, HostKind::Multi)?;
        self.multi_deselect_all(host, opts);
        Ok(())
    }

    /// Alias of [`deselect_all`](Self::deselect_all).
    pub fn select_none(&mut self, host: HostId) -> Result<(), SelectError> {
        self.deselect_all(host)
    }

    pub fn select_none_with(
        &mut self,
        host: HostId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.deselect_all_with(host, opts)
    }

    pub fn toggle_select_all(&mut self, host: HostId) -> Result<(), SelectError> {
        self.toggle_select_all_with(host, SelectOptions::default())
    }

    /// Select all if anything is unselected, otherwise deselect all.
    pub fn toggle_select_all_with(
        &mut self,
        host: HostId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_kind(host, HostKind::Multi)?;
        self.multi_toggle_select_all(host, opts);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Structural operations
    // -------------------------------------------------------------------------

    pub fn add(&mut self, host: HostId, item: ItemId) -> Result<(), SelectError> {
        self.add_with(host, item, SelectOptions::default())
    }

    /// Append `item` to the host's backing collection and reconcile.
    pub fn add_with(
        &mut self,
        host: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        let end = self.require_host(host)?.total_count();
        self.insert_at_with(host, end, item, opts)
    }

    pub fn insert_at(
        &mut self,
        host: HostId,
        index: usize,
        item: ItemId,
    ) -> Result<(), SelectError> {
        self.insert_at_with(host, index, item, SelectOptions::default())
    }

    pub fn insert_at_with(
        &mut self,
        host: HostId,
        index: usize,
        item: ItemId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_item(item)?;
        let change = self.require_host_mut(host)?.items.insert_at(index, item);
        if let Some(change) = change {
            self.reconcile(host, change, opts);
        }
        Ok(())
    }

    pub fn remove(&mut self, host: HostId, item: ItemId) -> Result<(), SelectError> {
        self.remove_with(host, item, SelectOptions::default())
    }

    /// Remove `item` from the host's backing collection and reconcile.
    pub fn remove_with(
        &mut self,
        host: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) -> Result<(), SelectError> {
        self.require_item(item)?;
        let change = self.require_host_mut(host)?.items.remove(item);
        if let Some(change) = change {
            self.reconcile(host, change, opts);
        }
        Ok(())
    }

    pub fn reset<I>(&mut self, host: HostId, items: I) -> Result<(), SelectError>
    where
        I: IntoIterator<Item = ItemId>,
    {
        self.reset_with(host, items, SelectOptions::default())
    }

    /// Replace the host's backing collection and reconcile.
    pub fn reset_with<I>(
        &mut self,
        host: HostId,
        items: I,
        opts: SelectOptions,
    ) -> Result<(), SelectError>
    where
        I: IntoIterator<Item = ItemId>,
    {
        let items: Vec<ItemId> = items.into_iter().collect();
        for &item in &items {
            self.require_item(item)?;
        }
        let change = self.require_host_mut(host)?.items.reset(items);
        self.reconcile(host, change, opts);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn item(&self, item: ItemId) -> Option<&Item> {
        self.items.get(&item)
    }

    pub fn host(&self, host: HostId) -> Option<&Host> {
        self.hosts.get(&host)
    }

    pub fn is_selected(&self, item: ItemId) -> Result<bool, SelectError> {
        Ok(self.require_item(item)?.is_selected())
    }

    pub fn host_kind(&self, host: HostId) -> Result<HostKind, SelectError> {
        Ok(self.require_host(host)?.kind())
    }

    /// The selected item of a single-pick host.
    pub fn selected_item(&self, host: HostId) -> Result<Option<ItemId>, SelectError> {
        self.require_kind(host, HostKind::Single)?;
        Ok(self.require_host(host)?.selected_item())
    }

    pub fn selected_ids(&self, host: HostId) -> Result<Vec<ItemId>, SelectError> {
        Ok(self.require_host(host)?.selected_ids())
    }

    pub fn selected_count(&self, host: HostId) -> Result<usize, SelectError> {
        Ok(self.require_host(host)?.selected_count())
    }

    pub fn total_count(&self, host: HostId) -> Result<usize, SelectError> {
        Ok(self.require_host(host)?.total_count())
    }

    /// Members of the host's backing collection, in order.
    pub fn items_of(&self, host: HostId) -> Result<Vec<ItemId>, SelectError> {
        Ok(self.require_host(host)?.items().iter().collect())
    }

    /// Hosts the item currently belongs to.
    pub fn hosts_of(&self, item: ItemId) -> Result<Vec<HostId>, SelectError> {
        Ok(self.require_item(item)?.memberships().hosts())
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Subscribe to a raw notification name on a component.
    ///
    /// Any name is accepted, including [`ALL_EVENTS`] and internal names.
    pub fn subscribe<F>(
        &mut self,
        source: impl Into<Source>,
        name: &str,
        callback: F,
    ) -> Result<SubscriptionId, SelectError>
    where
        F: FnMut(&Notification) + 'static,
    {
        let source = self.require_source(source.into())?;
        Ok(self.dispatcher.subscribe(source, name, callback))
    }

    pub fn subscribe_kind<F>(
        &mut self,
        source: impl Into<Source>,
        kind: EventKind,
        callback: F,
    ) -> Result<SubscriptionId, SelectError>
    where
        F: FnMut(&Notification) + 'static,
    {
        self.subscribe(source, kind.name(), callback)
    }

    /// Subscribe to every public notification of a component.
    pub fn subscribe_all<F>(
        &mut self,
        source: impl Into<Source>,
        callback: F,
    ) -> Result<SubscriptionId, SelectError>
    where
        F: FnMut(&Notification) + 'static,
    {
        self.subscribe(source, ALL_EVENTS, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    /// Install a local handler, invoked right before the matching broadcast.
    pub fn set_handler<F>(
        &mut self,
        source: impl Into<Source>,
        slot: Handler,
        callback: F,
    ) -> Result<bool, SelectError>
    where
        F: FnMut(&Notification) + 'static,
    {
        let source = self.require_source(source.into())?;
        Ok(self.dispatcher.set_handler(source, slot, callback))
    }

    pub fn clear_handler(&mut self, source: impl Into<Source>, slot: Handler) -> bool {
        self.dispatcher.clear_handler(source.into(), slot)
    }

    pub(crate) fn notify(
        &mut self,
        kind: EventKind,
        source: Source,
        payload: Payload,
        opts: &SelectOptions,
    ) {
        self.dispatcher
            .emit(Notification::new(kind, source, payload, opts.external));
    }

    // -------------------------------------------------------------------------
    // Invariants
    // -------------------------------------------------------------------------

    /// Check the selection invariants across every host and item.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut host_ids: Vec<_> = self.hosts.keys().copied().collect();
        host_ids.sort();
        for id in host_ids {
            let Some(host) = self.hosts.get(&id) else {
                continue;
            };
            if let HostState::Multi { selected, count } = &host.state
                && *count != selected.len()
            {
                return Err(InvariantViolation::CountMismatch {
                    host: id,
                    count: *count,
                    len: selected.len(),
                });
            }
            for item in host.selected_ids() {
                if !host.items.contains(item) {
                    return Err(InvariantViolation::HeldNonMember { host: id, item });
                }
                if !self.items.get(&item).is_some_and(Item::is_selected) {
                    return Err(InvariantViolation::HeldButUnflagged { host: id, item });
                }
            }
            for item in host.items.iter() {
                let flagged = self.items.get(&item).is_some_and(Item::is_selected);
                if flagged && !host.is_selected(item) {
                    return Err(InvariantViolation::FlaggedButNotHeld { host: id, item });
                }
            }
        }

        let mut item_ids: Vec<_> = self.items.keys().copied().collect();
        item_ids.sort();
        for id in item_ids {
            let Some(item) = self.items.get(&id) else {
                continue;
            };
            let hosts = item.memberships().hosts();
            if item.is_selected()
                && !hosts.is_empty()
                && !hosts
                    .iter()
                    .any(|h| self.hosts.get(h).is_some_and(|h| h.is_selected(id)))
            {
                return Err(InvariantViolation::UnheldFlag { item: id });
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lookup helpers
    // -------------------------------------------------------------------------

    fn require_item(&self, item: ItemId) -> Result<&Item, SelectError> {
        self.items.get(&item).ok_or(SelectError::UnknownItem(item))
    }

    fn require_host(&self, host: HostId) -> Result<&Host, SelectError> {
        self.hosts.get(&host).ok_or(SelectError::UnknownHost(host))
    }

    fn require_host_mut(&mut self, host: HostId) -> Result<&mut Host, SelectError> {
        self.hosts.get_mut(&host).ok_or(SelectError::UnknownHost(host))
    }

    fn require_kind(&self, host: HostId, expected: HostKind) -> Result<(), SelectError> {
        if self.require_host(host)?.kind() != expected {
            return Err(SelectError::WrongHostKind { host, expected });
        }
        Ok(())
    }

    fn require_source(&self, source: Source) -> Result<Source, SelectError> {
        match source {
            Source::Item(item) => self.require_item(item).map(|_| source),
            Source::Host(host) => self.require_host(host).map(|_| source),
        }
    }
}
