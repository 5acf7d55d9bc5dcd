//! Selection-state synchronization for collections of addressable items.
//!
//! An item carries a selected flag; hosts track which of their members are
//! selected, either one at a time ([`HostKind::Single`]) or as a set
//! ([`HostKind::Multi`]). Selecting or deselecting through an item or a host
//! propagates synchronously to every counterpart, so the item's flag and
//! every host's view agree once the call returns, including when an item is
//! shared by several hosts.
//!
//! Structural changes to a host's backing collection (add, remove, reset) are
//! reconciled through the same protocol.
//!
//! # Notifications
//!
//! Each settled change emits a notification (see [`EventKind`]). The
//! emitting component's local [`Handler`] runs first, then subscribers.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use selectable::prelude::*;
//!
//! let mut engine = Engine::new();
//! let host = engine.single_host();
//! let item = engine.create_item();
//! engine.add(host, item).unwrap();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = seen.clone();
//! engine
//!     .subscribe_kind(host, EventKind::SelectOne, move |n| log.borrow_mut().push(n.item()))
//!     .unwrap();
//!
//! engine.select_item(item).unwrap();
//! assert_eq!(*seen.borrow(), vec![Some(item)]);
//! ```

pub mod collection;
pub mod context;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod event;
pub mod host;
pub mod id;
pub mod item;
pub mod options;
pub mod pubsub;

mod reconcile;

pub use collection::{CollectionChange, ItemCollection};
pub use engine::Engine;
pub use error::{InvariantViolation, SelectError};
pub use event::{EventKind, Handler, Notification, Payload, SelectionDiff};
pub use host::{Host, HostConfig, HostKind};
pub use id::{HostId, ItemId, Source, SubscriptionId};
pub use item::{Item, Membership};
pub use options::{ExternalEvent, SelectOptions};

pub mod prelude {
    pub use crate::engine::Engine;
    pub use crate::error::SelectError;
    pub use crate::event::{EventKind, Handler, Notification, Payload, SelectionDiff};
    pub use crate::host::{HostConfig, HostKind};
    pub use crate::id::{HostId, ItemId, Source};
    pub use crate::options::{ExternalEvent, SelectOptions};
}
