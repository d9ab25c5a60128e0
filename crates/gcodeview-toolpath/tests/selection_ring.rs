//! Selection ring eviction, removal, and multiset behaviour

use gcodeview_toolpath::SelectionRing;

const CAP: usize = 100;

#[test]
fn test_overflow_evicts_oldest() {
    let mut ring = SelectionRing::with_capacity(CAP);
    for i in 0..CAP {
        ring.add(i);
        assert!(ring.find(i));
    }
    ring.add(CAP);

    assert_eq!(ring.count(), CAP);
    assert!(!ring.find(0));
    assert!(ring.find(1));
    assert!(ring.find(CAP));
}

#[test]
fn test_three_laps_keep_last_capacity() {
    let mut ring = SelectionRing::with_capacity(CAP);
    for i in 0..3 * CAP {
        ring.add(i);
    }
    for i in 0..2 * CAP {
        assert!(!ring.find(i));
    }
    for i in 2 * CAP..3 * CAP {
        assert!(ring.find(i));
    }
    assert_eq!(ring.count(), CAP);
}

#[test]
fn test_remove_present_and_absent() {
    let mut ring = SelectionRing::with_capacity(CAP);
    for i in 0..3 * CAP {
        ring.add(i);
    }

    let x = 2 * CAP;
    ring.remove(x);
    assert_eq!(ring.count(), CAP - 1);
    assert!(!ring.find(x));

    let before = ring.clone();
    ring.remove(0);
    assert_eq!(ring, before);
    assert_eq!(ring.count(), CAP - 1);
}

#[test]
fn test_duplicates_behave_like_multiset() {
    let mut ring = SelectionRing::new();
    let v = 123_456;
    ring.add(v);
    ring.add(v);
    assert_eq!(ring.count(), 2);
    assert!(ring.find(v));

    ring.remove(v);
    assert_eq!(ring.count(), 1);
    assert!(ring.find(v));

    ring.remove(v);
    assert_eq!(ring.count(), 0);
    assert!(!ring.find(v));
}

#[test]
fn test_order_survives_removal_then_refill() {
    let mut ring = SelectionRing::with_capacity(4);
    for i in [1, 2, 3, 4] {
        ring.add(i);
    }
    ring.remove(2);
    ring.add(5);
    ring.add(6);

    // Oldest surviving entry was 1, so it is the one evicted by 6
    assert!(!ring.find(1));
    let mut values: Vec<usize> = ring.iter().map(|(_, v)| v).collect();
    values.sort_unstable();
    assert_eq!(values, vec![3, 4, 5, 6]);
}

#[test]
fn test_index_of_reports_slot() {
    let mut ring = SelectionRing::with_capacity(3);
    ring.add(9);
    ring.add(8);
    assert_eq!(ring.index_of(8), Some(1));
    assert_eq!(ring.index_of(7), None);
}

#[test]
fn test_clear() {
    let mut ring = SelectionRing::with_capacity(3);
    ring.add(1);
    ring.add(2);
    ring.clear();
    assert!(ring.is_empty());
    ring.add(3);
    assert_eq!(ring.slots()[0], Some(3));
}
