//! Generational pool handle tests.
//!
//! These tests verify generation bumps on reuse, stale-handle rejection and
//! the fatal capacity bound.

use quay_core::alloc::{Handle, Pool};

#[test]
fn test_insert_and_get() {
    let mut pool = Pool::with_capacity("groups", 8);

    let a = pool.insert(42);
    let b = pool.insert(100);
    assert_eq!(pool.get(a), Some(&42));
    assert_eq!(pool.get(b), Some(&100));
    assert_eq!(pool.len(), 2);
}

#[test]
fn test_get_mut() {
    let mut pool = Pool::with_capacity("groups", 8);

    let idx = pool.insert(42);
    if let Some(value) = pool.get_mut(idx) {
        *value = 100;
    }
    assert_eq!(pool.get(idx), Some(&100));
}

#[test]
fn test_out_of_range_handle_is_none() {
    let pool = Pool::<i32>::with_capacity("groups", 8);
    assert_eq!(pool.get(Handle::new(0, 999)), None);
    assert!(!pool.contains(Handle::new(0, 999)));
}

#[test]
fn test_stale_handle_after_reuse() {
    let mut pool = Pool::with_capacity("groups", 8);

    let old = pool.insert(1);
    pool.remove(old);
    let new = pool.insert(2);

    assert_eq!(old.index(), new.index());
    assert_eq!(pool.get(old), None);
    assert_eq!(pool.get(new), Some(&2));
}

#[test]
fn test_capacity_counts_live_slots_only() {
    let mut pool = Pool::with_capacity("groups", 2);
    let a = pool.insert(1);
    pool.insert(2);
    pool.remove(a);
    // The freed slot is reused, so this does not exceed the capacity.
    pool.insert(3);
    assert_eq!(pool.len(), 2);
    assert_eq!(pool.capacity(), 2);
}

#[test]
#[should_panic(expected = "groups exhausted (capacity 1)")]
fn test_exhaustion_panics_with_label() {
    let mut pool = Pool::with_capacity("groups", 1);
    pool.insert(1);
    pool.insert(2);
}

#[test]
fn test_handles_iterate_in_slot_order() {
    let mut pool = Pool::with_capacity("groups", 8);
    let handles: Vec<_> = (0..4).map(|i| pool.insert(i)).collect();
    pool.remove(handles[1]);
    let live: Vec<_> = pool.handles().collect();
    assert_eq!(live, vec![handles[0], handles[2], handles[3]]);
}
