//! Selection hosts.
//!
//! A host owns a backing [`ItemCollection`] and tracks which of its members
//! are selected:
//! - `single` - at most one selected item, mutually exclusive
//! - `multi` - an independent set with a running count
//!
//! The protocol for each kind lives in its own module as `impl Engine`
//! blocks; this module holds the shared state and routes calls by kind.

mod multi;
mod single;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::collection::ItemCollection;
use crate::context::OperationContext;
use crate::engine::Engine;
use crate::id::{HostId, ItemId};
use crate::options::SelectOptions;

/// Selection policy of a host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    /// At most one selected item.
    #[default]
    Single,
    /// Any number of selected items.
    Multi,
}

impl std::fmt::Display for HostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            HostKind::Single => "single-pick",
            HostKind::Multi => "multi-pick",
        })
    }
}

/// Per-host configuration.
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    /// Selection policy.
    pub kind: HostKind,
    /// Optional display label, used in logs.
    pub label: Option<String>,
}

impl HostConfig {
    /// Single-pick host configuration.
    pub fn single() -> Self {
        Self {
            kind: HostKind::Single,
            label: None,
        }
    }

    /// Multi-pick host configuration.
    pub fn multi() -> Self {
        Self {
            kind: HostKind::Multi,
            label: None,
        }
    }

    /// Set the display label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) enum HostState {
    Single {
        selected: Option<ItemId>,
    },
    Multi {
        selected: BTreeSet<ItemId>,
        count: usize,
    },
}

impl HostState {
    fn for_kind(kind: HostKind) -> Self {
        match kind {
            HostKind::Single => HostState::Single { selected: None },
            HostKind::Multi => HostState::Multi {
                selected: BTreeSet::new(),
                count: 0,
            },
        }
    }
}

/// A selection container.
#[derive(Debug, Clone)]
pub struct Host {
    id: HostId,
    config: HostConfig,
    pub(crate) items: ItemCollection,
    pub(crate) state: HostState,
}

impl Host {
    pub(crate) fn new(config: HostConfig) -> Self {
        Self {
            id: HostId::new(),
            state: HostState::for_kind(config.kind),
            config,
            items: ItemCollection::new(),
        }
    }

    pub fn id(&self) -> HostId {
        self.id
    }

    pub fn kind(&self) -> HostKind {
        self.config.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }

    /// The backing collection.
    pub fn items(&self) -> &ItemCollection {
        &self.items
    }

    /// Number of members in the backing collection.
    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    /// The selected item of a single-pick host.
    pub fn selected_item(&self) -> Option<ItemId> {
        match &self.state {
            HostState::Single { selected } => *selected,
            HostState::Multi { .. } => None,
        }
    }

    /// Selected ids, ascending.
    pub fn selected_ids(&self) -> Vec<ItemId> {
        match &self.state {
            HostState::Single { selected } => selected.iter().copied().collect(),
            HostState::Multi { selected, .. } => selected.iter().copied().collect(),
        }
    }

    /// Number of selected items.
    pub fn selected_count(&self) -> usize {
        match &self.state {
            HostState::Single { selected } => usize::from(selected.is_some()),
            HostState::Multi { count, .. } => *count,
        }
    }

    /// Whether this host holds `item` selected.
    pub fn is_selected(&self, item: ItemId) -> bool {
        match &self.state {
            HostState::Single { selected } => *selected == Some(item),
            HostState::Multi { selected, .. } => selected.contains(&item),
        }
    }

    /// Label for log lines.
    pub(crate) fn display_name(&self) -> String {
        match &self.config.label {
            Some(label) => format!("{} ({})", self.id, label),
            None => self.id.to_string(),
        }
    }

    /// Drop the held selection without notifying or touching items.
    pub(crate) fn clear_selection(&mut self) {
        match &mut self.state {
            HostState::Single { selected } => *selected = None,
            HostState::Multi { selected, count } => {
                selected.clear();
                *count = 0;
            }
        }
    }
}

impl Engine {
    pub(crate) fn host_select(
        &mut self,
        ctx: &mut OperationContext,
        host: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) {
        match self.hosts.get(&host).map(Host::kind) {
            Some(HostKind::Single) => self.single_select(ctx, host, item, opts),
            Some(HostKind::Multi) => self.multi_select(ctx, host, item, opts),
            None => {}
        }
    }

    pub(crate) fn host_deselect(
        &mut self,
        ctx: &mut OperationContext,
        host: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) {
        match self.hosts.get(&host).map(Host::kind) {
            Some(HostKind::Single) => self.single_deselect(ctx, host, item, opts),
            Some(HostKind::Multi) => self.multi_deselect(ctx, host, item, opts),
            None => {}
        }
    }

    pub(crate) fn host_toggle(
        &mut self,
        ctx: &mut OperationContext,
        host: HostId,
        item: ItemId,
        opts: SelectOptions,
    ) {
        match self.hosts.get(&host).map(|h| h.is_selected(item)) {
            Some(true) => self.host_deselect(ctx, host, item, opts),
            Some(false) => self.host_select(ctx, host, item, opts),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_host_state_matches_kind() {
        let single = Host::new(HostConfig::single());
        let multi = Host::new(HostConfig::multi().label("inbox"));

        assert_eq!(single.kind(), HostKind::Single);
        assert_eq!(single.selected_item(), None);
        assert_eq!(multi.kind(), HostKind::Multi);
        assert_eq!(multi.label(), Some("inbox"));
        assert_eq!(multi.selected_count(), 0);
    }

    #[test]
    fn test_display_name_uses_label() {
        let host = Host::new(HostConfig::multi().label("inbox"));
        assert!(host.display_name().ends_with("(inbox)"));
    }
}
