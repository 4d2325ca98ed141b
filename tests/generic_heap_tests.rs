//! Generic comprehensive tests for all Heap implementations
//!
//! These tests work with any Heap implementation and stress the trait interface
//! with various edge cases and complex scenarios.

use packed_heaps::array::ArrayHeap;
use packed_heaps::compare::Natural;
use packed_heaps::factory::HeapOptions;
use packed_heaps::merge::Draining;
use packed_heaps::stable::StableHeap;
use packed_heaps::{Handle, Heap, HeapError};

// Test helpers that work with any Heap implementation

fn drain_priorities<V, P: Clone, H: Heap<V, P>>(heap: &mut H) -> Vec<P> {
    std::iter::from_fn(|| heap.remove_min().ok())
        .map(|h| h.priority().clone())
        .collect()
}

/// Test that empty heap behaves correctly
fn test_empty_heap<H: Heap<String, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.min(), Err(HeapError::EmptyStructure));
    assert_eq!(heap.remove_min(), Err(HeapError::EmptyStructure));
    assert_eq!(heap.handles().count(), 0);
}

/// Test basic add and remove_min operations
fn test_basic_operations<H: Heap<&'static str, i32>>(new: impl Fn() -> H) {
    let mut heap = new();

    heap.add("five", 5);
    heap.add("one", 1);
    heap.add("ten", 10);
    heap.add("three", 3);

    assert!(!heap.is_empty());
    assert_eq!(heap.len(), 4);

    // Min should return the smallest priority
    assert_eq!(heap.min().unwrap().into_parts(), (&"one", &1));

    assert_eq!(heap.remove_min().unwrap().into_parts(), ("one", 1));
    assert_eq!(heap.remove_min().unwrap().into_parts(), ("three", 3));
    assert_eq!(heap.remove_min().unwrap().into_parts(), ("five", 5));
    assert_eq!(heap.remove_min().unwrap().into_parts(), ("ten", 10));
    assert!(heap.remove_min().is_err());
    assert!(heap.is_empty());
}

/// Test that equal priorities all come out
fn test_duplicate_priorities<H: Heap<&'static str, i32>>(new: impl Fn() -> H) {
    let mut heap = new();

    heap.add("a", 5);
    heap.add("b", 5);
    heap.add("c", 5);
    heap.add("d", 1);

    assert_eq!(heap.remove_min().unwrap().into_parts(), ("d", 1));

    let mut rest: Vec<_> = std::iter::from_fn(|| heap.remove_min().ok())
        .map(|h| h.into_parts())
        .collect();
    rest.sort();
    assert_eq!(rest, vec![("a", 5), ("b", 5), ("c", 5)]);
}

/// Test that min doesn't modify the heap
fn test_min_idempotent<H: Heap<&'static str, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    heap.add("x", 7);
    heap.add("y", 2);

    for _ in 0..5 {
        assert_eq!(heap.min().unwrap().into_parts(), (&"y", &2));
    }
    assert_eq!(heap.len(), 2);
}

fn test_single_element<H: Heap<&'static str, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    heap.add("only", 42);

    assert_eq!(heap.len(), 1);
    assert_eq!(heap.min().unwrap().into_parts(), (&"only", &42));
    assert_eq!(heap.handles().count(), 1);
    assert_eq!(heap.remove_min().unwrap().into_parts(), ("only", 42));
    assert!(heap.is_empty());
}

/// Clear empties the heap and leaves it usable
fn test_clear_then_reuse<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    for i in 0..100 {
        heap.add(i, 100 - i);
    }
    heap.clear();
    assert!(heap.is_empty());
    assert!(heap.min().is_err());

    // Clearing twice is harmless
    heap.clear();
    assert!(heap.is_empty());

    heap.add(1, 3);
    heap.add(2, 1);
    assert_eq!(drain_priorities(&mut heap), vec![1, 3]);
}

/// Arbitrary removal is refused and leaves the heap untouched
fn test_remove_unsupported<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    heap.add(1, 1);
    heap.add(2, 2);

    let target = Handle::new(2, 2);
    assert_eq!(
        heap.remove(&target),
        Err(HeapError::UnsupportedOperation("remove"))
    );
    assert_eq!(heap.len(), 2);

    let mut empty = new();
    assert!(matches!(
        empty.remove(&target),
        Err(HeapError::UnsupportedOperation(_))
    ));
}

fn test_ascending_insertion<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    for i in 0..100 {
        heap.add(i, i);
    }
    assert_eq!(drain_priorities(&mut heap), (0..100).collect::<Vec<_>>());
}

fn test_descending_insertion<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    for i in (0..100).rev() {
        heap.add(i, i);
    }
    assert_eq!(drain_priorities(&mut heap), (0..100).collect::<Vec<_>>());
}

fn test_random_order_insertion<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut heap = new();

    // Deterministic permutation of 0..101 (37 is coprime with 101)
    for i in 0..101 {
        let p = (i * 37) % 101;
        heap.add(p, p);
    }
    assert_eq!(drain_priorities(&mut heap), (0..101).collect::<Vec<_>>());
}

/// Test alternating add and remove_min
fn test_alternating_operations<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut heap = new();

    for i in 0..200 {
        heap.add(i, 1000 - i);
        heap.add(i, 2000 + i);
        // Each round introduces a smaller priority than the one before
        assert_eq!(*heap.remove_min().unwrap().priority(), 1000 - i);
    }
    assert_eq!(heap.len(), 200);
    assert_eq!(drain_priorities(&mut heap), (2000..2200).collect::<Vec<_>>());
}

fn test_all_same_priority<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    for i in 0..100 {
        heap.add(i, 7);
    }

    let mut values: Vec<_> = std::iter::from_fn(|| heap.remove_min().ok())
        .map(|h| {
            assert_eq!(*h.priority(), 7);
            *h.value()
        })
        .collect();
    values.sort();
    assert_eq!(values, (0..100).collect::<Vec<_>>());
}

fn test_negative_priorities<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    for p in [3, -5, 0, -100, 42, -1] {
        heap.add(p, p);
    }
    assert_eq!(drain_priorities(&mut heap), vec![-100, -5, -1, 0, 3, 42]);
}

fn test_large_priorities<H: Heap<i32, i64>>(new: impl Fn() -> H) {
    let mut heap = new();
    heap.add(1, i64::MAX);
    heap.add(2, i64::MIN);
    heap.add(3, 0);
    heap.add(4, i64::MAX - 1);

    assert_eq!(
        drain_priorities(&mut heap),
        vec![i64::MIN, 0, i64::MAX - 1, i64::MAX]
    );
}

/// Iteration visits every handle exactly once
fn test_handles_cover_contents<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    for i in 0..50 {
        heap.add(i, (i * 13) % 17);
    }
    heap.remove_min().unwrap();

    let mut seen: Vec<_> = heap.handles().map(|h| (**h.value(), **h.priority())).collect();
    assert_eq!(seen.len(), heap.len());
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 49);
}

/// Any heap can be drained into a packed heap through the remove_min path
fn test_drain_into_array<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut source = new();
    for i in 0..40 {
        source.add(i, 40 - i);
    }

    let mut target = ArrayHeap::new();
    target.add(-1, 0);
    target.merge(&mut Draining::new(&mut source));

    assert!(source.is_empty());
    assert_eq!(target.len(), 41);
    assert!(target.is_heap_ordered());
    assert_eq!(drain_priorities(&mut target), (0..=40).collect::<Vec<_>>());
}

/// Mixed long-running sequence; the heap's answer tracks a sorted reference
fn test_very_large_sequence<H: Heap<i32, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    let mut reference = Vec::new();
    let mut seed: u32 = 12345;

    for step in 0..5000 {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        let p = (seed >> 16) as i32 % 1000;
        if step % 3 == 2 {
            let expected = reference.iter().min().copied();
            let got = heap.remove_min().ok().map(|h| *h.priority());
            assert_eq!(got, expected);
            if let Some(e) = expected {
                let pos = reference.iter().position(|&x| x == e).unwrap();
                reference.swap_remove(pos);
            }
        } else {
            heap.add(step, p);
            reference.push(p);
        }
        assert_eq!(heap.len(), reference.len());
    }

    reference.sort();
    assert_eq!(drain_priorities(&mut heap), reference);
}

fn test_string_items<H: Heap<String, i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    heap.add("low".to_string(), 10);
    heap.add("high".to_string(), 1);

    assert_eq!(heap.min().unwrap().value().as_str(), "high");
    let (value, priority) = heap.remove_min().unwrap().into_parts();
    assert_eq!((value.as_str(), priority), ("high", 1));
}

fn test_tuple_items<H: Heap<(i32, i32), i32>>(new: impl Fn() -> H) {
    let mut heap = new();
    heap.add((3, 3), 3);
    heap.add((1, 1), 1);
    heap.add((2, 2), 2);

    assert_eq!(heap.remove_min().unwrap().into_parts(), ((1, 1), 1));
    assert_eq!(heap.remove_min().unwrap().into_parts(), ((2, 2), 2));
    assert_eq!(heap.remove_min().unwrap().into_parts(), ((3, 3), 3));
}

/// The trait stays object safe
fn test_through_trait_object<H: Heap<i32, i32> + 'static>(new: impl Fn() -> H) {
    let mut boxed: Box<dyn Heap<i32, i32>> = Box::new(new());
    boxed.add(2, 2);
    boxed.add(1, 1);
    assert_eq!(boxed.len(), 2);
    assert_eq!(*boxed.min().unwrap().priority(), &1);
    assert_eq!(boxed.remove_min().unwrap().into_parts(), (1, 1));
}

// Generates one test per helper, in a module per heap configuration
macro_rules! heap_test {
    ($name:ident, $new:expr) => {
        #[test]
        fn $name() {
            super::$name($new);
        }
    };
}

macro_rules! define_heap_tests {
    ($module:ident, $new:expr) => {
        mod $module {
            #[allow(unused_imports)]
            use super::*;

            heap_test!(test_empty_heap, $new);
            heap_test!(test_basic_operations, $new);
            heap_test!(test_duplicate_priorities, $new);
            heap_test!(test_min_idempotent, $new);
            heap_test!(test_single_element, $new);
            heap_test!(test_clear_then_reuse, $new);
            heap_test!(test_remove_unsupported, $new);
            heap_test!(test_ascending_insertion, $new);
            heap_test!(test_descending_insertion, $new);
            heap_test!(test_random_order_insertion, $new);
            heap_test!(test_alternating_operations, $new);
            heap_test!(test_all_same_priority, $new);
            heap_test!(test_negative_priorities, $new);
            heap_test!(test_large_priorities, $new);
            heap_test!(test_handles_cover_contents, $new);
            heap_test!(test_drain_into_array, $new);
            heap_test!(test_very_large_sequence, $new);
            heap_test!(test_string_items, $new);
            heap_test!(test_tuple_items, $new);
            heap_test!(test_through_trait_object, $new);
        }
    };
}

define_heap_tests!(binary, ArrayHeap::new);
define_heap_tests!(ternary, || ArrayHeap::with_arity(3, Natural).unwrap());
define_heap_tests!(octonary, || ArrayHeap::with_arity(8, Natural).unwrap());
define_heap_tests!(stable_binary, StableHeap::new);
define_heap_tests!(stable_quaternary, || {
    StableHeap::with_options(4, Natural, -50).unwrap()
});
define_heap_tests!(any_array, || HeapOptions::new().build().unwrap());
define_heap_tests!(any_stable, || {
    HeapOptions::new().arity(3).stable(true).build().unwrap()
});
