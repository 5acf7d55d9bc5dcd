//! Notification taxonomy and the handler naming convention.
//!
//! Every public notification has a raw name (`"selected"`, `"select:one"`,
//! ...) used for subscriptions, and maps to a local [`Handler`] slot that is
//! invoked on the emitting component right before the broadcast.
//!
//! # Naming convention
//!
//! A raw name is normalized by stripping a trailing `:one` / `:any`
//! qualifier, or otherwise a trailing `ed`. Each colon-delimited segment of
//! the result is capitalized and appended to `on`:
//!
//! | raw            | handler        |
//! |----------------|----------------|
//! | `select:one`   | `onSelect`     |
//! | `deselected`   | `onDeselect`   |
//! | `reselect:any` | `onReselect`   |
//! | `select:all`   | `onSelectAll`  |
//!
//! Names whose normalized form starts with `_` belong to the internal
//! bounce-through channel and never reach a handler.

use std::str::FromStr;

use serde::Serialize;

use crate::error::SelectError;
use crate::id::{ItemId, Source};
use crate::options::ExternalEvent;

/// Prefix marking internal notification names.
pub const INTERNAL_MARKER: char = '_';

/// Internal name raised by a shared item when it forwards a selection.
pub const INTERNAL_SELECTED: &str = "_selected";

/// Internal name raised by a shared item when it forwards a deselection.
pub const INTERNAL_DESELECTED: &str = "_deselected";

/// Subscription name that receives every public notification of a source.
pub const ALL_EVENTS: &str = "all";

/// Kind of a public notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// Item became selected.
    #[serde(rename = "selected")]
    Selected,
    /// Item became deselected.
    #[serde(rename = "deselected")]
    Deselected,
    /// Item was selected again without a state change.
    #[serde(rename = "reselected")]
    Reselected,
    /// Single-pick host picked a new item.
    #[serde(rename = "select:one")]
    SelectOne,
    /// Single-pick host dropped its item.
    #[serde(rename = "deselect:one")]
    DeselectOne,
    /// Single-pick host was asked to pick the item it already holds.
    #[serde(rename = "reselect:one")]
    ReselectOne,
    /// Multi-pick host now holds every member.
    #[serde(rename = "select:all")]
    SelectAll,
    /// Multi-pick host holds some but not all members.
    #[serde(rename = "select:some")]
    SelectSome,
    /// Multi-pick host holds nothing.
    #[serde(rename = "select:none")]
    SelectNone,
    /// Multi-pick host was asked to select items it already holds.
    #[serde(rename = "reselect:any")]
    ReselectAny,
}

impl EventKind {
    /// Every public kind.
    pub const ALL: [EventKind; 10] = [
        EventKind::Selected,
        EventKind::Deselected,
        EventKind::Reselected,
        EventKind::SelectOne,
        EventKind::DeselectOne,
        EventKind::ReselectOne,
        EventKind::SelectAll,
        EventKind::SelectSome,
        EventKind::SelectNone,
        EventKind::ReselectAny,
    ];

    /// The raw notification name.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Selected => "selected",
            EventKind::Deselected => "deselected",
            EventKind::Reselected => "reselected",
            EventKind::SelectOne => "select:one",
            EventKind::DeselectOne => "deselect:one",
            EventKind::ReselectOne => "reselect:one",
            EventKind::SelectAll => "select:all",
            EventKind::SelectSome => "select:some",
            EventKind::SelectNone => "select:none",
            EventKind::ReselectAny => "reselect:any",
        }
    }

    /// The local handler slot this kind dispatches to.
    pub fn handler(self) -> Handler {
        match self {
            EventKind::Selected | EventKind::SelectOne => Handler::OnSelect,
            EventKind::Deselected | EventKind::DeselectOne => Handler::OnDeselect,
            EventKind::Reselected | EventKind::ReselectOne | EventKind::ReselectAny => {
                Handler::OnReselect
            }
            EventKind::SelectAll => Handler::OnSelectAll,
            EventKind::SelectSome => Handler::OnSelectSome,
            EventKind::SelectNone => Handler::OnSelectNone,
        }
    }

    /// Whether this kind reports a re-affirmed, unchanged state.
    pub fn is_reselection(self) -> bool {
        matches!(
            self,
            EventKind::Reselected | EventKind::ReselectOne | EventKind::ReselectAny
        )
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with(INTERNAL_MARKER) {
            return Err(SelectError::InternalEvent(s.to_string()));
        }
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SelectError::UnknownEvent(s.to_string()))
    }
}

/// Local handler slot on a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    OnSelect,
    OnDeselect,
    OnReselect,
    OnSelectAll,
    OnSelectSome,
    OnSelectNone,
}

impl Handler {
    /// The conventional method name of this slot.
    pub fn method_name(self) -> &'static str {
        match self {
            Handler::OnSelect => "onSelect",
            Handler::OnDeselect => "onDeselect",
            Handler::OnReselect => "onReselect",
            Handler::OnSelectAll => "onSelectAll",
            Handler::OnSelectSome => "onSelectSome",
            Handler::OnSelectNone => "onSelectNone",
        }
    }

    /// Resolve a raw notification name to its handler slot.
    ///
    /// Returns `None` for internal names and for names with no slot.
    pub fn for_event(raw: &str) -> Option<Handler> {
        let name = handler_name(raw)?;
        [
            Handler::OnSelect,
            Handler::OnDeselect,
            Handler::OnReselect,
            Handler::OnSelectAll,
            Handler::OnSelectSome,
            Handler::OnSelectNone,
        ]
        .into_iter()
        .find(|handler| handler.method_name() == name)
    }
}

/// Strip a trailing `:one`/`:any` qualifier, or otherwise a trailing `ed`.
pub fn normalize_event_name(raw: &str) -> &str {
    for qualifier in [":one", ":any"] {
        if let Some(stripped) = raw.strip_suffix(qualifier) {
            return stripped;
        }
    }
    raw.strip_suffix("ed").unwrap_or(raw)
}

/// Build the conventional handler method name for a raw notification name.
pub fn handler_name(raw: &str) -> Option<String> {
    let normalized = normalize_event_name(raw);
    if normalized.is_empty() || normalized.starts_with(INTERNAL_MARKER) {
        return None;
    }

    let mut name = String::from("on");
    for segment in normalized.split(':') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    Some(name)
}

/// Added/removed ids of a multi-pick aggregate notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionDiff {
    /// Ids that entered the selection.
    pub added: Vec<ItemId>,
    /// Ids that left the selection.
    pub removed: Vec<ItemId>,
}

impl SelectionDiff {
    /// Check if nothing entered or left.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Data carried by a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// Item and single-pick host notifications.
    Item(ItemId),
    /// `reselect:any`: the ids that were re-affirmed.
    Items(Vec<ItemId>),
    /// `select:all`, `select:some`, `select:none`.
    Diff(SelectionDiff),
}

/// A notification as delivered to handlers and subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: EventKind,
    pub source: Source,
    pub payload: Payload,
    /// Structural change that caused the notification, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalEvent>,
}

impl Notification {
    pub fn new(
        kind: EventKind,
        source: Source,
        payload: Payload,
        external: Option<ExternalEvent>,
    ) -> Self {
        Self {
            kind,
            source,
            payload,
            external,
        }
    }

    /// The single item of an item or single-pick notification.
    pub fn item(&self) -> Option<ItemId> {
        match self.payload {
            Payload::Item(id) => Some(id),
            _ => None,
        }
    }

    /// The ids of a `reselect:any` notification.
    pub fn items(&self) -> &[ItemId] {
        match &self.payload {
            Payload::Items(ids) => ids,
            _ => &[],
        }
    }

    /// The diff of an aggregate notification.
    pub fn diff(&self) -> Option<&SelectionDiff> {
        match &self.payload {
            Payload::Diff(diff) => Some(diff),
            _ => None,
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.source, self.kind)?;
        match &self.payload {
            Payload::Item(id) => write!(f, " {}", id)?,
            Payload::Items(ids) => write!(f, " {:?}", ids)?,
            Payload::Diff(diff) => {
                write!(f, " +{} -{}", diff.added.len(), diff.removed.len())?
            }
        }
        if let Some(external) = self.external {
            write!(f, " ({})", external)?;
        }
        Ok(())
    }
}
