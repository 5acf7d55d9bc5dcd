mod common;

use common::{Recorder, host_with_items};
use selectable::prelude::*;

#[test]
fn test_remove_selected_orphan_deselects_it() {
    let mut engine = Engine::new();
    let (host, items) = host_with_items(&mut engine, HostKind::Multi, 2);
    let x = items[0];
    engine.select(host, x).unwrap();
    let recorder = Recorder::new();
    recorder.attach(&mut engine, host);
    recorder.attach(&mut engine, x);

    engine.remove(host, x).unwrap();

    assert!(!engine.is_selected(x).unwrap());
    assert!(engine.hosts_of(x).unwrap().is_empty());
    assert_eq!(engine.selected_count(host).unwrap(), 0);
    assert_eq!(engine.total_count(host).unwrap(), 1);

    let item_events = recorder.of(x);
    assert_eq!(item_events.len(), 1);
    assert_eq!(item_events[0].kind, EventKind::Deselected);
    assert_eq!(item_events[0].external, Some(ExternalEvent::Remove));
    let host_events = recorder.of(host);
    assert_eq!(host_events.len(), 1);
    assert_eq!(host_events[0].kind, EventKind::SelectNone);
    assert_eq!(host_events[0].external, Some(ExternalEvent::Remove));
}

#[test]
fn test_remove_shared_item_keeps_flag() {
    let mut engine = Engine::new();
    let a = engine.multi_host();
    let b = engine.multi_host();
    let x = engine.create_item();
    engine.add(a, x).unwrap();
    engine.add(b, x).unwrap();
    engine.select_item(x).unwrap();
    let recorder = Recorder::new();
    recorder.attach(&mut engine, x);
    recorder.attach(&mut engine, b);

    engine.remove(a, x).unwrap();

    assert!(engine.is_selected(x).unwrap());
    assert_eq!(engine.hosts_of(x).unwrap(), vec![b]);
    assert!(engine.selected_ids(a).unwrap().is_empty());
    assert_eq!(engine.selected_ids(b).unwrap(), vec![x]);
    assert!(recorder.is_empty());
    engine.check_invariants().unwrap();
}

#[test]
fn test_remove_unselected_item_is_quiet() {
    let mut engine = Engine::new();
    let (host, items) = host_with_items(&mut engine, HostKind::Single, 2);
    engine.select(host, items[1]).unwrap();
    let recorder = Recorder::new();
    recorder.attach(&mut engine, host);

    engine.remove(host, items[0]).unwrap();

    assert!(recorder.is_empty());
    assert_eq!(engine.items_of(host).unwrap(), vec![items[1]]);
    assert_eq!(engine.selected_item(host).unwrap(), Some(items[1]));
}

#[test]
fn test_add_selected_item_to_multi() {
    let mut engine = Engine::new();
    let a = engine.multi_host();
    let b = engine.multi_host();
    let x = engine.create_item();
    let other = engine.create_item();
    engine.add(a, x).unwrap();
    engine.add(b, other).unwrap();
    engine.select(a, x).unwrap();
    let recorder = Recorder::new();
    for source in [Source::Host(a), Source::Host(b), Source::Item(x)] {
        recorder.attach(&mut engine, source);
    }

    engine.add(b, x).unwrap();

    assert_eq!(engine.selected_ids(b).unwrap(), vec![x]);
    let events = recorder.of(b);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::SelectSome);
    assert_eq!(events[0].external, Some(ExternalEvent::Add));
    assert!(recorder.of(a).is_empty());
    assert!(recorder.of(x).is_empty());
    engine.check_invariants().unwrap();
}

#[test]
fn test_add_selected_item_to_single() {
    let mut engine = Engine::new();
    let host = engine.single_host();
    let x = engine.create_item();
    engine.select_item(x).unwrap();
    let recorder = Recorder::new();
    recorder.attach(&mut engine, host);
    recorder.attach(&mut engine, x);

    engine.add(host, x).unwrap();

    assert_eq!(engine.selected_item(host).unwrap(), Some(x));
    let events = recorder.all();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::SelectOne);
    assert_eq!(events[0].source, Source::Host(host));
    assert_eq!(events[0].external, Some(ExternalEvent::Add));
}

#[test]
fn test_add_selected_item_displaces_single_pick() {
    let mut engine = Engine::new();
    let (host, items) = host_with_items(&mut engine, HostKind::Single, 1);
    engine.select(host, items[0]).unwrap();
    let x = engine.create_item();
    engine.select_item(x).unwrap();

    engine.add(host, x).unwrap();

    assert_eq!(engine.selected_item(host).unwrap(), Some(x));
    assert!(!engine.is_selected(items[0]).unwrap());
    engine.check_invariants().unwrap();
}

#[test]
fn test_add_unselected_item_is_quiet() {
    let mut engine = Engine::new();
    let (host, items) = host_with_items(&mut engine, HostKind::Multi, 1);
    engine.select(host, items[0]).unwrap();
    let x = engine.create_item();
    let recorder = Recorder::new();
    recorder.attach(&mut engine, host);

    engine.insert_at(host, 0, x).unwrap();

    assert!(recorder.is_empty());
    assert_eq!(engine.items_of(host).unwrap(), vec![x, items[0]]);
    assert_eq!(engine.hosts_of(x).unwrap(), vec![host]);
    assert_eq!(engine.selected_ids(host).unwrap(), vec![items[0]]);
}

#[test]
fn test_add_existing_member_is_noop() {
    let mut engine = Engine::new();
    let (host, items) = host_with_items(&mut engine, HostKind::Multi, 2);

    engine.add(host, items[0]).unwrap();

    assert_eq!(engine.items_of(host).unwrap(), items);
}

#[test]
fn test_reset_multi_reaffirms_silently() {
    let mut engine = Engine::new();
    let (host, old) = host_with_items(&mut engine, HostKind::Multi, 1);
    let x = engine.create_item();
    let y = engine.create_item();
    let z = engine.create_item();
    engine.select_item(x).unwrap();
    engine.select_item(y).unwrap();
    let recorder = Recorder::new();
    for source in [Source::Host(host), Source::Item(x), Source::Item(y)] {
        recorder.attach(&mut engine, source);
    }

    engine.reset(host, [x, y, z]).unwrap();

    assert_eq!(engine.selected_count(host).unwrap(), 2);
    assert_eq!(engine.selected_ids(host).unwrap(), vec![x, y]);
    assert!(engine.hosts_of(old[0]).unwrap().is_empty());
    assert!(recorder.is_empty());
    engine.check_invariants().unwrap();
}

#[test]
fn test_reset_single_keeps_last_selected() {
    let mut engine = Engine::new();
    let host = engine.single_host();
    let p = engine.create_item();
    let q = engine.create_item();
    let r = engine.create_item();
    engine.select_item(p).unwrap();
    engine.select_item(r).unwrap();
    let recorder = Recorder::new();
    for source in [Source::Host(host), Source::Item(p), Source::Item(r)] {
        recorder.attach(&mut engine, source);
    }

    engine.reset(host, [p, q, r]).unwrap();

    assert_eq!(engine.selected_item(host).unwrap(), Some(r));
    assert!(!engine.is_selected(p).unwrap());
    assert!(engine.is_selected(r).unwrap());
    let events = recorder.all();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source, Source::Item(p));
    assert_eq!(events[0].kind, EventKind::Deselected);
    assert_eq!(events[0].external, Some(ExternalEvent::Reset));
    engine.check_invariants().unwrap();
}

#[test]
fn test_reset_drops_departing_orphan() {
    let mut engine = Engine::new();
    let (host, items) = host_with_items(&mut engine, HostKind::Multi, 2);
    let (x, y) = (items[0], items[1]);
    engine.select(host, x).unwrap();
    let recorder = Recorder::new();
    recorder.attach(&mut engine, host);
    recorder.attach(&mut engine, x);

    engine.reset(host, [y]).unwrap();

    assert!(!engine.is_selected(x).unwrap());
    assert_eq!(engine.selected_count(host).unwrap(), 0);
    assert_eq!(engine.items_of(host).unwrap(), vec![y]);
    assert_eq!(recorder.kinds_of(x), vec![EventKind::Deselected]);
    assert_eq!(recorder.of(x)[0].external, Some(ExternalEvent::Reset));
    assert!(recorder.of(host).is_empty());
}

#[test]
fn test_reset_keeps_departing_shared_item() {
    let mut engine = Engine::new();
    let a = engine.multi_host();
    let b = engine.multi_host();
    let x = engine.create_item();
    let y = engine.create_item();
    engine.add(a, x).unwrap();
    engine.add(a, y).unwrap();
    engine.add(b, x).unwrap();
    engine.select_item(x).unwrap();

    engine.reset(a, [y]).unwrap();

    assert!(engine.is_selected(x).unwrap());
    assert_eq!(engine.hosts_of(x).unwrap(), vec![b]);
    assert_eq!(engine.selected_ids(b).unwrap(), vec![x]);
    assert_eq!(engine.selected_count(a).unwrap(), 0);
    engine.check_invariants().unwrap();
}

#[test]
fn test_reset_drops_duplicates() {
    let mut engine = Engine::new();
    let host = engine.multi_host();
    let a = engine.create_item();
    let b = engine.create_item();

    engine.reset(host, [a, b, a]).unwrap();

    assert_eq!(engine.items_of(host).unwrap(), vec![a, b]);
    assert_eq!(engine.hosts_of(a).unwrap(), vec![host]);
}

#[test]
fn test_reset_with_unknown_item_fails() {
    let mut engine = Engine::new();
    let (host, items) = host_with_items(&mut engine, HostKind::Multi, 1);
    let gone = engine.create_item();
    engine.remove_item(gone).unwrap();

    assert_eq!(
        engine.reset(host, [items[0], gone]),
        Err(SelectError::UnknownItem(gone))
    );
    assert_eq!(engine.items_of(host).unwrap(), items);
}

#[test]
fn test_remove_item_detaches_from_every_host() {
    let mut engine = Engine::new();
    let multi = engine.multi_host();
    let single = engine.single_host();
    let x = engine.create_item();
    engine.add(multi, x).unwrap();
    engine.add(single, x).unwrap();
    engine.select_item(x).unwrap();

    engine.remove_item(x).unwrap();

    assert!(engine.item(x).is_none());
    assert_eq!(engine.total_count(multi).unwrap(), 0);
    assert_eq!(engine.selected_count(multi).unwrap(), 0);
    assert_eq!(engine.selected_item(single).unwrap(), None);
    engine.check_invariants().unwrap();
}
