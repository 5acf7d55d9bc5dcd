//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use selectable::prelude::*;

/// Collects every public notification of the sources it is attached to.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Notification>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, engine: &mut Engine, source: impl Into<Source>) {
        let events = self.events.clone();
        engine
            .subscribe_all(source, move |n| events.borrow_mut().push(n.clone()))
            .unwrap();
    }

    pub fn all(&self) -> Vec<Notification> {
        self.events.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<(Source, EventKind)> {
        self.events.borrow().iter().map(|n| (n.source, n.kind)).collect()
    }

    pub fn of(&self, source: impl Into<Source>) -> Vec<Notification> {
        let source = source.into();
        self.events
            .borrow()
            .iter()
            .filter(|n| n.source == source)
            .cloned()
            .collect()
    }

    pub fn kinds_of(&self, source: impl Into<Source>) -> Vec<EventKind> {
        self.of(source).into_iter().map(|n| n.kind).collect()
    }

    pub fn count(&self, source: impl Into<Source>, kind: EventKind) -> usize {
        self.kinds_of(source).into_iter().filter(|k| *k == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Create a host of `kind` with `n` fresh members.
pub fn host_with_items(engine: &mut Engine, kind: HostKind, n: usize) -> (HostId, Vec<ItemId>) {
    let host = match kind {
        HostKind::Single => engine.single_host(),
        HostKind::Multi => engine.multi_host(),
    };
    let items: Vec<ItemId> = (0..n).map(|_| engine.create_item()).collect();
    for &item in &items {
        engine.add(host, item).unwrap();
    }
    (host, items)
}

/// Attach `recorder` to a host and all of its items.
pub fn record(engine: &mut Engine, recorder: &Recorder, host: HostId, items: &[ItemId]) {
    recorder.attach(engine, host);
    for &item in items {
        recorder.attach(engine, item);
    }
}
