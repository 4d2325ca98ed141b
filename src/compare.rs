//! Injected priority orderings
//!
//! Every ordering decision a heap makes goes through a [`Comparator`] chosen at
//! construction time. Heaps never fall back to `Ord` on their own, so callers
//! can supply reversed orders, multi-key orders, or orders over types that do
//! not implement `Ord` at all.
//!
//! Any `Fn(&P, &P) -> Ordering` closure is a comparator:
//!
//! ```rust
//! use packed_heaps::array::ArrayHeap;
//! use packed_heaps::Heap;
//!
//! // Longest string first
//! let mut heap = ArrayHeap::with_comparator(|a: &String, b: &String| b.len().cmp(&a.len()));
//! heap.add(1, "hi".to_string());
//! heap.add(2, "hello".to_string());
//! assert_eq!(*heap.min().unwrap().value(), &2);
//! ```
//!
//! The comparator must be a total order. A comparator that violates this gives
//! unspecified (but memory-safe) extraction order.

use std::cmp::Ordering;

/// A total order over priorities of type `P`
pub trait Comparator<P: ?Sized> {
    /// Compares two priorities; `Less` means `a` is extracted before `b`
    fn compare(&self, a: &P, b: &P) -> Ordering;

    /// Returns `true` if `a` sorts strictly after `b`
    #[inline]
    fn greater(&self, a: &P, b: &P) -> bool {
        self.compare(a, b) == Ordering::Greater
    }
}

impl<P: ?Sized, F> Comparator<P> for F
where
    F: Fn(&P, &P) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        self(a, b)
    }
}

/// The priority type's own `Ord` implementation (smallest first)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<P: Ord + ?Sized> Comparator<P> for Natural {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        a.cmp(b)
    }
}

/// Flips another comparator, turning a min-heap into a max-heap
///
/// ```rust
/// use packed_heaps::array::ArrayHeap;
/// use packed_heaps::compare::{Natural, Reversed};
/// use packed_heaps::Heap;
///
/// let mut heap = ArrayHeap::with_comparator(Reversed(Natural));
/// heap.add("low", 1);
/// heap.add("high", 9);
/// assert_eq!(*heap.min().unwrap().value(), &"high");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<P: ?Sized, C: Comparator<P>> Comparator<P> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        self.0.compare(b, a)
    }
}
