//! Property tests for the reference model and object store

use proptest::prelude::*;
use weewasm_runtime::{
    box_f64, box_i32, ref_eq, unbox_f64, unbox_i32, BridgeError, Heap, Reference,
};

/// Floats that compare equal to themselves
fn ordinary_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO | prop::num::f64::INFINITE
}

/// Any non-null key in one of the three partitions
fn key(heap: &mut Heap, choice: u8, seed: i32) -> Reference {
    match choice % 3 {
        0 => box_i32(seed),
        1 => box_f64(seed as f64 + 0.5),
        _ => heap.new_object(),
    }
}

proptest! {
    #[test]
    fn i32_round_trips(v in any::<i32>()) {
        prop_assert_eq!(unbox_i32(box_i32(v)), Ok(v));
    }

    #[test]
    fn f64_round_trips(v in ordinary_f64()) {
        prop_assert_eq!(unbox_f64(box_f64(v)), Ok(v));
    }

    #[test]
    fn unbox_rejects_wrong_tag(i in any::<i32>(), f in any::<f64>()) {
        prop_assert_eq!(unbox_i32(box_f64(f)), Err(BridgeError::NOT_AN_I32));
        prop_assert_eq!(unbox_f64(box_i32(i)), Err(BridgeError::NOT_AN_F64));
    }

    #[test]
    fn int_never_equals_float(i in any::<i32>()) {
        prop_assert!(!ref_eq(box_i32(i), box_f64(i as f64)));
        prop_assert!(!ref_eq(box_f64(i as f64), box_i32(i)));
    }

    #[test]
    fn floats_compare_by_value(f in ordinary_f64()) {
        prop_assert!(ref_eq(box_f64(f), box_f64(f)));
    }

    #[test]
    fn empty_object_misses_every_key(choice in any::<u8>(), seed in any::<i32>()) {
        let mut heap = Heap::new();
        let obj = heap.new_object();
        let k = key(&mut heap, choice, seed);
        prop_assert_eq!(heap.get(obj, k), Ok(Reference::Null));
    }

    #[test]
    fn last_write_wins(choice in any::<u8>(), seed in any::<i32>(), values in prop::collection::vec(any::<i32>(), 1..8)) {
        let mut heap = Heap::new();
        let obj = heap.new_object();
        let k = key(&mut heap, choice, seed);
        for v in &values {
            heap.set(obj, k, box_i32(*v)).unwrap();
        }
        prop_assert_eq!(heap.get(obj, k), Ok(box_i32(*values.last().unwrap())));
    }

    #[test]
    fn int_and_float_keys_are_independent(n in -1000i32..1000, x in any::<i32>(), y in any::<i32>()) {
        let mut heap = Heap::new();
        let obj = heap.new_object();
        heap.set(obj, box_i32(n), box_i32(x)).unwrap();
        heap.set(obj, box_f64(n as f64), box_i32(y)).unwrap();
        prop_assert_eq!(heap.get(obj, box_i32(n)), Ok(box_i32(x)));
        prop_assert_eq!(heap.get(obj, box_f64(n as f64)), Ok(box_i32(y)));
    }

    #[test]
    fn null_key_is_rejected(v in any::<i32>()) {
        let mut heap = Heap::new();
        let obj = heap.new_object();
        prop_assert_eq!(heap.get(obj, Reference::Null), Err(BridgeError::InvalidKey));
        prop_assert_eq!(heap.set(obj, Reference::Null, box_i32(v)), Err(BridgeError::InvalidKey));
    }

    #[test]
    fn null_target_is_rejected(choice in any::<u8>(), seed in any::<i32>()) {
        let mut heap = Heap::new();
        let k = key(&mut heap, choice, seed);
        prop_assert_eq!(heap.get(Reference::Null, k), Err(BridgeError::NULL_REFERENCE));
    }
}

#[test]
fn distinct_objects_are_never_equal() {
    let mut heap = Heap::new();
    let a = heap.new_object();
    let b = heap.new_object();
    heap.set(a, box_i32(1), box_i32(1)).unwrap();
    heap.set(b, box_i32(1), box_i32(1)).unwrap();

    assert!(ref_eq(a, a));
    assert!(!ref_eq(a, b));
}
