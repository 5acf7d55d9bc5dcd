//! Selectable items and the item side of the propagation protocol.

use std::collections::BTreeSet;

use log::trace;

use crate::context::{GuardKey, OperationContext, Step};
use crate::engine::Engine;
use crate::event::{EventKind, INTERNAL_DESELECTED, INTERNAL_SELECTED, Notification, Payload};
use crate::id::{HostId, ItemId, Source};
use crate::options::SelectOptions;

/// Hosts an item currently belongs to.
///
/// The common case of a single host is stored inline; the set is only
/// allocated once the item is shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Membership {
    #[default]
    None,
    One(HostId),
    Shared(BTreeSet<HostId>),
}

impl Membership {
    /// Register a host. Returns false if it was already registered.
    pub fn insert(&mut self, host: HostId) -> bool {
        match self {
            Membership::None => {
                *self = Membership::One(host);
                true
            }
            Membership::One(existing) if *existing == host => false,
            Membership::One(existing) => {
                let existing = *existing;
                *self = Membership::Shared(BTreeSet::from([existing, host]));
                true
            }
            Membership::Shared(hosts) => hosts.insert(host),
        }
    }

    /// Release a host. Returns false if it was not registered.
    pub fn remove(&mut self, host: HostId) -> bool {
        match self {
            Membership::None => false,
            Membership::One(existing) => {
                if *existing != host {
                    return false;
                }
                *self = Membership::None;
                true
            }
            Membership::Shared(hosts) => {
                if !hosts.remove(&host) {
                    return false;
                }
                let last = hosts.first().copied();
                match (hosts.len(), last) {
                    (0, _) => *self = Membership::None,
                    (1, Some(last)) => *self = Membership::One(last),
                    _ => {}
                }
                true
            }
        }
    }

    pub fn contains(&self, host: HostId) -> bool {
        match self {
            Membership::None => false,
            Membership::One(existing) => *existing == host,
            Membership::Shared(hosts) => hosts.contains(&host),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Membership::None => 0,
            Membership::One(_) => 1,
            Membership::Shared(hosts) => hosts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether more than one host holds the item.
    pub fn is_shared(&self) -> bool {
        self.len() > 1
    }

    /// Registered hosts in ascending id order.
    pub fn hosts(&self) -> Vec<HostId> {
        match self {
            Membership::None => Vec::new(),
            Membership::One(host) => vec![*host],
            Membership::Shared(hosts) => hosts.iter().copied().collect(),
        }
    }
}

/// An addressable unit with a selected flag.
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    pub(crate) selected: bool,
    pub(crate) memberships: Membership,
}

impl Item {
    pub(crate) fn new() -> Self {
        Self {
            id: ItemId::new(),
            selected: false,
            memberships: Membership::None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn memberships(&self) -> &Membership {
        &self.memberships
    }
}

impl Engine {
    /// Select an item and propagate to its hosts.
    pub(crate) fn item_select(
        &mut self,
        ctx: &mut OperationContext,
        id: ItemId,
        opts: SelectOptions,
    ) {
        let Some(item) = self.items.get_mut(&id) else {
            return;
        };
        if !ctx.enter(GuardKey::Item(id, Step::Select)) {
            return;
        }

        let reselected = item.selected;
        item.selected = true;
        let hosts = item.memberships.hosts();
        trace!("{}: select (reselect: {}) -> {:?}", id, reselected, hosts);

        if hosts.len() > 1 {
            let bounce = Notification::new(
                EventKind::Selected,
                Source::Item(id),
                Payload::Item(id),
                opts.external,
            );
            self.dispatcher.emit_internal(INTERNAL_SELECTED, &bounce);
        }

        let forwarded = opts.forwarded();
        for host in hosts {
            self.host_select(ctx, host, id, forwarded);
        }

        if reselected {
            if !opts.mutes_reselect() {
                self.notify(EventKind::Reselected, Source::Item(id), Payload::Item(id), &opts);
            }
        } else if !opts.is_quiet() {
            self.notify(EventKind::Selected, Source::Item(id), Payload::Item(id), &opts);
        }
    }

    /// Deselect an item and propagate to its hosts. No-op if not selected.
    pub(crate) fn item_deselect(
        &mut self,
        ctx: &mut OperationContext,
        id: ItemId,
        opts: SelectOptions,
    ) {
        let Some(item) = self.items.get_mut(&id) else {
            return;
        };
        if !item.selected || !ctx.enter(GuardKey::Item(id, Step::Deselect)) {
            return;
        }

        item.selected = false;
        let hosts = item.memberships.hosts();
        trace!("{}: deselect -> {:?}", id, hosts);

        if hosts.len() > 1 {
            let bounce = Notification::new(
                EventKind::Deselected,
                Source::Item(id),
                Payload::Item(id),
                opts.external,
            );
            self.dispatcher.emit_internal(INTERNAL_DESELECTED, &bounce);
        }

        let forwarded = opts.forwarded();
        for host in hosts {
            self.host_deselect(ctx, host, id, forwarded);
        }

        if !opts.is_quiet() {
            self.notify(EventKind::Deselected, Source::Item(id), Payload::Item(id), &opts);
        }
    }

    pub(crate) fn item_toggle(
        &mut self,
        ctx: &mut OperationContext,
        id: ItemId,
        opts: SelectOptions,
    ) {
        match self.items.get(&id).map(|item| item.selected) {
            Some(true) => self.item_deselect(ctx, id, opts),
            Some(false) => self.item_select(ctx, id, opts),
            None => {}
        }
    }
}
