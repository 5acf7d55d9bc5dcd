//! Reconciliation after structural changes to a host's backing collection.
//!
//! The backing collection reports [`CollectionChange`]s; each one is turned
//! back into ordinary select/deselect calls so the item/host invariants hold
//! again once the structural operation returns.

use log::{debug, warn};

use crate::collection::CollectionChange;
use crate::context::OperationContext;
use crate::engine::Engine;
use crate::host::HostKind;
use crate::id::{HostId, ItemId};
use crate::options::{ExternalEvent, SelectOptions};

impl Engine {
    pub(crate) fn reconcile(
        &mut self,
        host: HostId,
        change: CollectionChange,
        opts: SelectOptions,
    ) {
        match change {
            CollectionChange::Added(item) => self.on_item_added(host, item, opts),
            CollectionChange::Removed(item) => self.on_item_removed(host, item, opts),
            CollectionChange::Reset { previous } => self.on_reset(host, previous, opts),
        }
    }

    pub(crate) fn register(&mut self, item: ItemId, host: HostId) {
        if let Some(item) = self.items.get_mut(&item) {
            item.memberships.insert(host);
        }
    }

    pub(crate) fn release(&mut self, item: ItemId, host: HostId) {
        if let Some(item) = self.items.get_mut(&item) {
            item.memberships.remove(host);
        }
    }

    fn on_item_added(&mut self, host: HostId, item: ItemId, opts: SelectOptions) {
        debug!("{}: added {}", host, item);
        self.register(item, host);

        if self.is_flagged(item) {
            let opts = opts.silent_reselect().external(ExternalEvent::Add);
            let mut ctx = OperationContext::new();
            self.host_select(&mut ctx, host, item, opts);
        }
    }

    fn on_item_removed(&mut self, host: HostId, item: ItemId, opts: SelectOptions) {
        debug!("{}: removed {}", host, item);
        let held = self
            .hosts
            .get(&host)
            .is_some_and(|h| h.is_selected(item));
        self.release(item, host);

        if !held {
            return;
        }

        let orphaned = self
            .items
            .get(&item)
            .is_none_or(|i| i.memberships.is_empty());
        let mut opts = opts.external(ExternalEvent::Remove);
        if !orphaned {
            // Other hosts still hold the item; only this host lets go.
            opts = opts.skip_model_call();
        }
        let mut ctx = OperationContext::new();
        self.host_deselect(&mut ctx, host, item, opts);
    }

    fn on_reset(&mut self, host_id: HostId, previous: Vec<ItemId>, opts: SelectOptions) {
        let Some(host) = self.hosts.get_mut(&host_id) else {
            return;
        };
        let kind = host.kind();
        let current: Vec<ItemId> = host.items.iter().collect();
        host.clear_selection();
        debug!(
            "{}: reset ({} -> {} items)",
            host.display_name(),
            previous.len(),
            current.len()
        );

        for &item in &previous {
            self.release(item, host_id);
        }
        for &item in &current {
            self.register(item, host_id);
        }

        let opts = opts.external(ExternalEvent::Reset);
        let mut ctx = OperationContext::new();

        // Departed items nobody else holds cannot stay selected.
        for &item in &previous {
            if current.contains(&item) || !self.is_flagged(item) {
                continue;
            }
            let orphaned = self
                .items
                .get(&item)
                .is_some_and(|i| i.memberships.is_empty());
            if orphaned {
                self.item_deselect(&mut ctx, item, opts);
            }
        }

        let flagged: Vec<ItemId> = current
            .iter()
            .copied()
            .filter(|&item| self.is_flagged(item))
            .collect();
        let reaffirm = opts.silent().skip_model_call();

        match kind {
            HostKind::Single => {
                let Some((&last, excess)) = flagged.split_last() else {
                    return;
                };
                if !excess.is_empty() {
                    warn!(
                        "{}: reset brought {} selected items, keeping {}",
                        host_id,
                        flagged.len(),
                        last
                    );
                }
                for &item in excess {
                    self.item_deselect(&mut ctx, item, opts);
                }
                self.single_select(&mut ctx, host_id, last, reaffirm);
            }
            HostKind::Multi => {
                for item in flagged {
                    self.multi_select(&mut ctx, host_id, item, reaffirm);
                }
            }
        }
    }

    fn is_flagged(&self, item: ItemId) -> bool {
        self.items.get(&item).is_some_and(|i| i.selected)
    }
}
