use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn fire_reaches_every_listener_in_order() {
    let emitter = Emitter::<u32>::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let first = {
        let seen = Rc::clone(&seen);
        emitter.subscribe(move |v| seen.borrow_mut().push(("first", *v)))
    };
    let second = {
        let seen = Rc::clone(&seen);
        emitter.subscribe(move |v| seen.borrow_mut().push(("second", *v)))
    };

    emitter.fire(&7);

    assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    drop((first, second));
}

#[test]
fn dropping_subscription_removes_listener() {
    let emitter = Emitter::<()>::new();
    let hits = Rc::new(Cell::new(0));
    let sub = {
        let hits = Rc::clone(&hits);
        emitter.subscribe(move |_| hits.set(hits.get() + 1))
    };
    emitter.fire(&());
    assert_eq!(emitter.listener_count(), 1);

    drop(sub);
    emitter.fire(&());

    assert_eq!(hits.get(), 1);
    assert_eq!(emitter.listener_count(), 0);
}

#[test]
fn dispose_is_idempotent() {
    let emitter = Emitter::<()>::new();
    let mut sub = emitter.subscribe(|_| {});
    sub.dispose();
    sub.dispose();
    assert!(sub.is_disposed());
    assert_eq!(emitter.listener_count(), 0);
}

#[test]
fn listener_can_dispose_its_own_subscription_while_firing() {
    let emitter = Emitter::<()>::new();
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let hits = Rc::new(Cell::new(0));

    let sub = {
        let slot = Rc::clone(&slot);
        let hits = Rc::clone(&hits);
        emitter.subscribe(move |_| {
            hits.set(hits.get() + 1);
            if let Some(mut own) = slot.borrow_mut().take() {
                own.dispose();
            }
        })
    };
    *slot.borrow_mut() = Some(sub);

    emitter.fire(&());
    emitter.fire(&());

    assert_eq!(hits.get(), 1);
    assert_eq!(emitter.listener_count(), 0);
}

#[test]
fn subscription_outliving_emitter_disposes_quietly() {
    let emitter = Emitter::<()>::new();
    let mut sub = emitter.subscribe(|_| {});
    drop(emitter);
    sub.dispose();
    assert!(sub.is_disposed());
}

#[test]
fn store_releases_everything_once() {
    let emitter = Emitter::<()>::new();
    let mut store = DisposableStore::new();
    store.add(emitter.subscribe(|_| {}));
    store.add(emitter.subscribe(|_| {}));
    assert_eq!(store.len(), 2);
    assert_eq!(emitter.listener_count(), 2);

    store.dispose();
    store.dispose();

    assert!(store.is_disposed());
    assert!(store.is_empty());
    assert_eq!(emitter.listener_count(), 0);
}

#[test]
fn adding_to_disposed_store_releases_immediately() {
    let emitter = Emitter::<()>::new();
    let mut store = DisposableStore::new();
    store.dispose();

    store.add(emitter.subscribe(|_| {}));

    assert_eq!(emitter.listener_count(), 0);
    assert!(store.is_empty());
}
