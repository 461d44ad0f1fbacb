use super::*;
use std::cell::RefCell;

#[test]
fn notifies_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut obs = Observers::<u32>::new();

    let a = {
        let log = Rc::clone(&log);
        obs.subscribe(move |v| log.borrow_mut().push(("a", *v)))
    };
    let b = {
        let log = Rc::clone(&log);
        obs.subscribe(move |v| log.borrow_mut().push(("b", *v)))
    };

    obs.notify(&7);
    assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    drop((a, b));
}

#[test]
fn dropped_subscription_stops_delivery_and_is_pruned() {
    let hits = Rc::new(RefCell::new(0u32));
    let mut obs = Observers::<()>::new();

    let sub = {
        let hits = Rc::clone(&hits);
        obs.subscribe(move |_| *hits.borrow_mut() += 1)
    };
    obs.notify(&());
    drop(sub);
    obs.notify(&());

    assert_eq!(*hits.borrow(), 1);
    assert!(obs.is_empty());
}
