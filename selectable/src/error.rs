//! Error types.
//!
//! Protocol misuse, such as selecting an item that is not a member of the
//! host, is a silent no-op and never produces an error. Errors are only
//! returned when an id does not resolve, a host has the wrong kind for the
//! operation, or a name cannot be parsed.

use thiserror::Error;

use crate::host::HostKind;
use crate::id::{HostId, ItemId};

/// Errors returned by [`Engine`](crate::Engine) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// The item id does not resolve.
    #[error("item {0} does not exist")]
    UnknownItem(ItemId),

    /// The host id does not resolve (never created, or closed).
    #[error("host {0} does not exist")]
    UnknownHost(HostId),

    /// A multi-pick operation was invoked on a single-pick host, or vice versa.
    #[error("host {host} is not a {expected} host")]
    WrongHostKind {
        /// The host the call was made on.
        host: HostId,
        /// The kind the operation requires.
        expected: HostKind,
    },

    /// The notification name is not part of the event taxonomy.
    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    /// The notification name is on the internal channel.
    #[error("event '{0}' is internal")]
    InternalEvent(String),
}

/// A broken selection invariant, reported by
/// [`Engine::check_invariants`](crate::Engine::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("host {host} holds {item} but the item is not flagged selected")]
    HeldButUnflagged { host: HostId, item: ItemId },

    #[error("host {host} has member {item} flagged selected but does not hold it")]
    FlaggedButNotHeld { host: HostId, item: ItemId },

    #[error("host {host} holds {item} which is not a member")]
    HeldNonMember { host: HostId, item: ItemId },

    #[error("multi-pick host {host} count {count} does not match set size {len}")]
    CountMismatch {
        host: HostId,
        count: usize,
        len: usize,
    },

    #[error("{item} is flagged selected but none of its hosts holds it")]
    UnheldFlag { item: ItemId },
}
