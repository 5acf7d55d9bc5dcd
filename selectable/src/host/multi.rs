//! Multi-pick protocol and aggregate notifications.
//!
//! Every mutation snapshots the selected set first; once the item-level
//! changes have settled, the snapshot is diffed against the current set and
//! at most one of `select:all`, `select:some` or `select:none` is emitted,
//! optionally preceded by `reselect:any`. A mutation nested inside another
//! one on the same host (a shared single-pick host releasing its previous
//! pick mid-select) leaves the report to the outer call, whose diff covers
//! both.

use std::collections::BTreeSet;

use log::trace;

use crate::context::{GuardKey, OperationContext, Step};
use crate::engine::Engine;
use crate::event::{EventKind, Payload, SelectionDiff};
use crate::id::{HostId, ItemId, Source};
use crate::options::SelectOptions;

use super::HostState;

impl Engine {
    pub(crate) fn multi_select(
        &mut self,
        ctx: &mut OperationContext,
        host_id: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) {
        let Some(host) = self.hosts.get_mut(&host_id) else {
            return;
        };
        if !host.items.contains(item) {
            trace!("{}: {} is not a member, ignoring select", host.display_name(), item);
            return;
        }
        let HostState::Multi { selected, count } = &mut host.state else {
            return;
        };
        if !ctx.enter(GuardKey::Edge(host_id, item, Step::Select)) {
            return;
        }

        let outermost = ctx.enter(GuardKey::Aggregate(host_id));

        let before = selected.clone();
        let reselected = before.contains(&item);
        if !reselected {
            selected.insert(item);
            *count = selected.len();
        }

        if !opts.skip_model_call {
            self.item_select(ctx, item, opts.forwarded());
        }

        if outermost {
            ctx.leave(GuardKey::Aggregate(host_id));
            if !opts.is_quiet() {
                let reselected = if reselected { vec![item] } else { Vec::new() };
                self.emit_aggregate(host_id, &before, reselected, &opts);
            }
        }
    }

    pub(crate) fn multi_deselect(
        &mut self,
        ctx: &mut OperationContext,
        host_id: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) {
        let Some(host) = self.hosts.get_mut(&host_id) else {
            return;
        };
        let HostState::Multi { selected, count } = &mut host.state else {
            return;
        };
        if !selected.contains(&item) {
            return;
        }
        if !ctx.enter(GuardKey::Edge(host_id, item, Step::Deselect)) {
            return;
        }
        let outermost = ctx.enter(GuardKey::Aggregate(host_id));

        let before = selected.clone();
        selected.remove(&item);
        *count = selected.len();

        if !opts.skip_model_call {
            self.item_deselect(ctx, item, opts.forwarded());
        }

        if outermost {
            ctx.leave(GuardKey::Aggregate(host_id));
            if !opts.is_quiet() {
                self.emit_aggregate(host_id, &before, Vec::new(), &opts);
            }
        }
    }

    /// Select every member, then emit one aggregate notification.
    ///
    /// Each member settles in its own context: selecting a later member may
    /// force an earlier one out through a shared single-pick host, and that
    /// earlier member must still be releasable afterwards.
    pub(crate) fn multi_select_all(&mut self, host_id: HostId, opts: SelectOptions) {
        let Some(before) = self.multi_snapshot(host_id) else {
            return;
        };
        let members: Vec<ItemId> = match self.hosts.get(&host_id) {
            Some(host) => host.items.iter().collect(),
            None => return,
        };

        let per_item = SelectOptions {
            silent_locally: true,
            ..opts
        };
        let mut reselected = Vec::new();
        for item in members {
            if before.contains(&item) {
                reselected.push(item);
            }
            self.multi_select(&mut OperationContext::new(), host_id, item, per_item);
        }

        if !opts.is_quiet() {
            self.emit_aggregate(host_id, &before, reselected, &opts);
        }
    }

    /// Deselect every selected item, then emit one aggregate notification.
    pub(crate) fn multi_deselect_all(&mut self, host_id: HostId, opts: SelectOptions) {
        let Some(before) = self.multi_snapshot(host_id) else {
            return;
        };
        if before.is_empty() {
            return;
        }

        let per_item = SelectOptions {
            silent_locally: true,
            ..opts
        };
        for &item in &before {
            self.multi_deselect(&mut OperationContext::new(), host_id, item, per_item);
        }

        if !opts.is_quiet() {
            self.emit_aggregate(host_id, &before, Vec::new(), &opts);
        }
    }

    /// Select all unless every member is already selected.
    pub(crate) fn multi_toggle_select_all(&mut self, host_id: HostId, opts: SelectOptions) {
        let Some(host) = self.hosts.get(&host_id) else {
            return;
        };
        if host.selected_count() < host.total_count() {
            self.multi_select_all(host_id, opts);
        } else {
            self.multi_deselect_all(host_id, opts);
        }
    }

    fn multi_snapshot(&self, host_id: HostId) -> Option<BTreeSet<ItemId>> {
        match &self.hosts.get(&host_id)?.state {
            HostState::Multi { selected, .. } => Some(selected.clone()),
            HostState::Single { .. } => None,
        }
    }

    /// Diff the current set against `before` and emit the aggregate notification.
    fn emit_aggregate(
        &mut self,
        host_id: HostId,
        before: &BTreeSet<ItemId>,
        reselected: Vec<ItemId>,
        opts: &SelectOptions,
    ) {
        let Some(host) = self.hosts.get(&host_id) else {
            return;
        };
        let HostState::Multi { selected, count } = &host.state else {
            return;
        };
        debug_assert_eq!(*count, selected.len(), "{}: count out of sync", host_id);

        let count = *count;
        let total = host.total_count();
        let diff = SelectionDiff {
            added: selected.difference(before).copied().collect(),
            removed: before.difference(selected).copied().collect(),
        };

        if !reselected.is_empty() && !opts.silent_reselect {
            self.notify(
                EventKind::ReselectAny,
                Source::Host(host_id),
                Payload::Items(reselected),
                opts,
            );
        }

        if diff.is_empty() && count == before.len() {
            return;
        }

        let kind = if count == 0 {
            EventKind::SelectNone
        } else if count == total {
            EventKind::SelectAll
        } else {
            EventKind::SelectSome
        };
        self.notify(kind, Source::Host(host_id), Payload::Diff(diff), opts);
    }
}
