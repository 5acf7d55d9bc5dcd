//! Single-pick protocol.

use log::trace;

use crate::context::{GuardKey, OperationContext, Step};
use crate::engine::Engine;
use crate::event::{EventKind, Payload};
use crate::id::{HostId, ItemId, Source};
use crate::options::SelectOptions;

use super::HostState;

impl Engine {
    pub(crate) fn single_select(
        &mut self,
        ctx: &mut OperationContext,
        host_id: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) {
        let Some(host) = self.hosts.get(&host_id) else {
            return;
        };
        if !host.items.contains(item) {
            trace!("{}: {} is not a member, ignoring select", host.display_name(), item);
            return;
        }
        if !ctx.enter(GuardKey::Edge(host_id, item, Step::Select)) {
            return;
        }

        let previous = host.selected_item();
        let reselected = previous == Some(item);

        if !reselected {
            if let Some(previous) = previous {
                let release = SelectOptions {
                    skip_model_call: false,
                    ..opts
                };
                self.single_deselect(ctx, host_id, previous, release);
            }
            if let Some(host) = self.hosts.get_mut(&host_id)
                && let HostState::Single { selected } = &mut host.state
            {
                *selected = Some(item);
            }
        }

        if !opts.skip_model_call {
            self.item_select(ctx, item, opts.forwarded());
        }

        if reselected {
            if !opts.mutes_reselect() {
                self.notify(
                    EventKind::ReselectOne,
                    Source::Host(host_id),
                    Payload::Item(item),
                    &opts,
                );
            }
        } else if !opts.is_quiet() {
            self.notify(EventKind::SelectOne, Source::Host(host_id), Payload::Item(item), &opts);
        }
    }

    pub(crate) fn single_deselect(
        &mut self,
        ctx: &mut OperationContext,
        host_id: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) {
        let Some(host) = self.hosts.get_mut(&host_id) else {
            return;
        };
        let HostState::Single { selected } = &mut host.state else {
            return;
        };
        if *selected != Some(item) || !ctx.enter(GuardKey::Edge(host_id, item, Step::Deselect)) {
            return;
        }
        *selected = None;

        if !opts.skip_model_call {
            self.item_deselect(ctx, item, opts.forwarded());
        }

        if !opts.is_quiet() {
            self.notify(EventKind::DeselectOne, Source::Host(host_id), Payload::Item(item), &opts);
        }
    }
}
