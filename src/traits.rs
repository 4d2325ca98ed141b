//! Common trait for heap data structures
//!
//! [`Heap`] is the handle-based interface every heap in this crate exposes:
//! - `add` inserts a value with a priority
//! - `remove_min` removes and returns the minimum
//! - `min` returns the minimum without removing it
//!
//! Unlike `std::collections::BinaryHeap`, which stores values directly and
//! orders them with `Ord`, these heaps store (value, priority) pairs and order
//! them with an injected [`Comparator`](crate::compare::Comparator).
//!
//! The trait is object safe, so `&mut dyn Heap<V, P>` can stand in for any
//! concrete heap. The merge protocol relies on this to drain sources whose
//! layout it does not know.

use crate::error::HeapError;
use crate::handle::Handle;

/// Base trait for heap/priority queue data structures
///
/// # Example
///
/// ```rust
/// use packed_heaps::Heap;
/// use packed_heaps::array::ArrayHeap;
///
/// let mut heap = ArrayHeap::new();
/// heap.add("three", 3);
/// heap.add("one", 1);
/// heap.add("two", 2);
///
/// assert_eq!(heap.min().unwrap().into_parts(), (&"one", &1));
/// assert_eq!(heap.remove_min().unwrap().into_parts(), ("one", 1));
/// ```
pub trait Heap<V, P> {
    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a value with the given priority
    ///
    /// # Time Complexity
    /// O(log n) amortized, including storage growth.
    fn add(&mut self, value: V, priority: P);

    /// Returns the minimum handle without removing it
    ///
    /// # Errors
    /// [`HeapError::EmptyStructure`] when the heap has no elements.
    ///
    /// # Time Complexity
    /// O(1)
    fn min(&self) -> Result<Handle<&V, &P>, HeapError>;

    /// Removes and returns the minimum handle
    ///
    /// # Errors
    /// [`HeapError::EmptyStructure`] when the heap has no elements.
    ///
    /// # Time Complexity
    /// O(log n) amortized, including storage shrinking.
    fn remove_min(&mut self) -> Result<Handle<V, P>, HeapError>;

    /// Removes an arbitrary handle
    ///
    /// The packed heaps keep no handle-to-index map, so this would cost an
    /// O(n) scan plus a sift. They reject it instead of hiding that cost.
    ///
    /// # Errors
    /// [`HeapError::UnsupportedOperation`] for every heap in this crate.
    fn remove(&mut self, handle: &Handle<V, P>) -> Result<(), HeapError>;

    /// Removes every element
    fn clear(&mut self);

    /// Iterates handles in storage order (not sorted order)
    fn handles(&self) -> Box<dyn Iterator<Item = Handle<&V, &P>> + '_>;
}
