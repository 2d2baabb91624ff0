//! Integration tests for the frame model and the reset channel.

use std::cell::RefCell;
use std::rc::Rc;

use abacus_tui::models::{Abacus, AbacusError, EarthPosition, SetValue};
use abacus_tui::services::ResetBus;

fn pos(i: usize) -> EarthPosition {
    EarthPosition::try_from(i).unwrap()
}

/// Frame wrapped for the reset channel, plus the values its listener saw.
fn recording_frame(rods: usize) -> (Rc<RefCell<Abacus>>, Rc<RefCell<Vec<u64>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let abacus = Abacus::new(rods)
        .unwrap()
        .with_on_change(move |value| sink.borrow_mut().push(value));
    (Rc::new(RefCell::new(abacus)), seen)
}

#[test]
fn test_clicks_on_units_rod() {
    let (frame, seen) = recording_frame(5);
    let mut abacus = frame.borrow_mut();

    abacus.toggle_earth(4, pos(0)).unwrap();
    abacus.toggle_earth(4, pos(1)).unwrap();
    assert_eq!(abacus.toggle_earth(4, pos(2)).unwrap(), 3);
    assert_eq!(abacus.toggle_heaven(4).unwrap(), 8);
    assert_eq!(abacus.toggle_earth(4, pos(0)).unwrap(), 5);

    // Initial registration delivers 0 before any click
    assert_eq!(*seen.borrow(), vec![0, 1, 2, 3, 8, 5]);
}

#[test]
fn test_every_value_round_trips_on_four_rods() {
    let (frame, _) = recording_frame(4);
    let mut abacus = frame.borrow_mut();
    for value in 0..=9999 {
        assert_eq!(abacus.set_value(value), SetValue::Exact);
        assert_eq!(abacus.value(), value);
    }
}

#[test]
fn test_widest_frame_holds_largest_value() {
    let (frame, _) = recording_frame(18);
    let mut abacus = frame.borrow_mut();
    let max = 999_999_999_999_999_999;
    assert_eq!(abacus.max_value(), max);
    assert_eq!(abacus.set_value(max), SetValue::Exact);
    assert_eq!(abacus.digits(), vec![9; 18]);
}

#[test]
fn test_u64_max_is_truncated_on_widest_frame() {
    let (frame, _) = recording_frame(18);
    let outcome = frame.borrow_mut().set_value(u64::MAX);
    // 18446744073709551615 keeps its leading eighteen digits
    assert_eq!(
        outcome,
        SetValue::Truncated {
            requested: u64::MAX,
            shown: 184_467_440_737_095_516,
        }
    );
}

#[test]
fn test_broadcast_resets_every_frame() {
    let bus = ResetBus::new();
    let (left, left_seen) = recording_frame(5);
    let (right, right_seen) = recording_frame(3);
    let _left_sub = bus.attach(&left);
    let _right_sub = bus.attach(&right);

    let _ = left.borrow_mut().set_value(307);
    let _ = right.borrow_mut().set_value(42);

    assert_eq!(bus.broadcast(), 2);
    assert_eq!(left.borrow().value(), 0);
    assert_eq!(right.borrow().value(), 0);
    assert_eq!(left_seen.borrow().last(), Some(&0));
    assert_eq!(right_seen.borrow().last(), Some(&0));
    assert_eq!(*right_seen.borrow(), vec![0, 42, 0]);
}

#[test]
fn test_unsubscribed_frame_keeps_its_value() {
    let bus = ResetBus::new();
    let (kept, _) = recording_frame(3);
    let (left, left_seen) = recording_frame(3);
    let _kept_sub = bus.attach(&kept);
    let left_sub = bus.attach(&left);

    let _ = left.borrow_mut().set_value(123);
    left_sub.unsubscribe();
    bus.broadcast();

    assert_eq!(left.borrow().value(), 123);
    assert_eq!(*left_seen.borrow(), vec![0, 123]);
    assert_eq!(bus.subscriber_count(), 1);
}

#[test]
fn test_invalid_construction_and_indices() {
    assert_eq!(
        Abacus::new(0).unwrap_err(),
        AbacusError::InvalidRodCount(0)
    );
    assert!(Abacus::new(19).is_err());

    let (frame, seen) = recording_frame(2);
    assert!(matches!(
        frame.borrow_mut().toggle_heaven(2),
        Err(AbacusError::InvalidRod { index: 2, rod_count: 2 })
    ));
    // A rejected click does not notify
    assert_eq!(*seen.borrow(), vec![0]);

    assert!(matches!(
        EarthPosition::try_from(4),
        Err(AbacusError::InvalidPosition(4))
    ));
}
