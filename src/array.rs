//! Array-backed heap engine
//!
//! [`ArrayHeap`] is a packed d-ary min-heap (binary by default). Handles live in
//! one contiguous array; the tree structure is implicit in the index
//! arithmetic:
//!
//! ```text
//! parent(i)     = (i - 1) / arity
//! children(i)   = arity * i + 1 ..= arity * i + arity
//! ```
//!
//! **Invariant**: for every non-root index `i`,
//! `priority(array[i]) >= priority(array[parent(i)])` under the injected
//! comparator.
//!
//! # Time Complexity
//!
//! | Operation    | Complexity            |
//! |--------------|-----------------------|
//! | `add`        | O(log n) amortized    |
//! | `remove_min` | O(log n) amortized    |
//! | `min`        | O(1)                  |
//! | `merge`      | O(m log(n + m))       |
//! | `contains`   | O(n)                  |
//! | `clear`      | O(1) plus deallocation|
//!
//! # Storage policy
//!
//! The logical capacity is always a power of [`GROWTH_FACTOR`] and never below
//! [`MIN_CAPACITY`]. It doubles when an `add` finds the array full. After a
//! `remove_min`, it shrinks to exactly `len` when `len * SHRINK_FACTOR ==
//! capacity` and `len >= MIN_CAPACITY`. Growing and shrinking at different
//! utilization points keeps alternating add/remove near a boundary from
//! reallocating every step.
//!
//! The shrink test is an exact equality, so it fires at one utilization point
//! per resize cycle. A sequence that never lands on that point can keep the
//! capacity up to `SHRINK_FACTOR` times larger than needed.
//!
//! # Example
//!
//! ```rust
//! use packed_heaps::Heap;
//! use packed_heaps::array::ArrayHeap;
//!
//! let mut heap = ArrayHeap::new();
//! for p in [5, 3, 8, 1, 4] {
//!     heap.add(p * 10, p);
//! }
//!
//! let drained: Vec<_> = heap.into_sorted_vec().into_iter().map(|h| *h.priority()).collect();
//! assert_eq!(drained, vec![1, 3, 4, 5, 8]);
//! ```

use std::fmt;
use std::ops::Range;
use std::ptr;

use tracing::trace;

use crate::compare::{Comparator, Natural};
use crate::error::HeapError;
use crate::forest::Forest;
use crate::handle::Handle;
use crate::traits::Heap;

/// Smallest logical capacity a heap ever has
pub const MIN_CAPACITY: usize = 8;

/// Factor the capacity is multiplied by when the array is full
pub const GROWTH_FACTOR: usize = 2;

/// Capacity is reduced once `len * SHRINK_FACTOR == capacity`
pub const SHRINK_FACTOR: usize = GROWTH_FACTOR * GROWTH_FACTOR;

/// Children per node of a binary heap
pub const BINARY_ARITY: usize = 2;

/// Forest iterator returned by [`ArrayHeap::to_forest`]
pub type HeapForest<'a, V, P> = Forest<'a, Handle<V, P>, V, P, fn(&Handle<V, P>) -> Handle<V, P>>;

/// A packed d-ary min-heap ordered by an injected comparator
///
/// # Example
///
/// ```rust
/// use packed_heaps::Heap;
/// use packed_heaps::array::ArrayHeap;
/// use packed_heaps::HeapError;
///
/// let mut heap = ArrayHeap::new();
/// assert_eq!(heap.min().unwrap_err(), HeapError::EmptyStructure);
///
/// heap.add("b", 2);
/// heap.add("a", 1);
/// assert_eq!(heap.min().unwrap().into_parts(), (&"a", &1));
/// assert_eq!(heap.len(), 2);
/// ```
#[derive(Clone)]
pub struct ArrayHeap<V, P, C = Natural> {
    /// Packed handles; `data.len()` is the element count
    data: Vec<Handle<V, P>>,
    /// Logical capacity, tracked separately from the allocator's
    capacity: usize,
    arity: usize,
    comparator: C,
}

impl<V, P: Ord> ArrayHeap<V, P, Natural> {
    /// Creates an empty binary heap ordered by `P`'s `Ord`
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<V, P: Ord> Default for ArrayHeap<V, P, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P, C: Comparator<P>> ArrayHeap<V, P, C> {
    /// Creates an empty binary heap ordered by `comparator`
    pub fn with_comparator(comparator: C) -> Self {
        Self::from_parts(BINARY_ARITY, comparator)
    }

    /// Creates an empty heap whose nodes have up to `arity` children
    ///
    /// # Errors
    /// [`HeapError::InvalidArity`] if `arity < 2`.
    pub fn with_arity(arity: usize, comparator: C) -> Result<Self, HeapError> {
        if arity < BINARY_ARITY {
            return Err(HeapError::InvalidArity(arity));
        }
        Ok(Self::from_parts(arity, comparator))
    }

    fn from_parts(arity: usize, comparator: C) -> Self {
        Self {
            data: Vec::with_capacity(MIN_CAPACITY),
            capacity: MIN_CAPACITY,
            arity,
            comparator,
        }
    }

    /// Logical capacity of the backing array
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maximum number of children per node
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// The packed array, root first
    #[inline]
    pub fn as_slice(&self) -> &[Handle<V, P>] {
        &self.data
    }

    /// Iterates handles in array order (not sorted order)
    ///
    /// Each call starts a fresh traversal. The borrow keeps the heap from
    /// being mutated while the iterator is alive.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Handle<V, P>> {
        self.data.iter()
    }

    /// Returns true if `handle` is one of the handles stored in this heap
    ///
    /// This is an identity test on the handle's address, not a value
    /// comparison, and it scans the whole array: O(n).
    pub fn contains(&self, handle: &Handle<V, P>) -> bool {
        self.data.iter().any(|stored| ptr::eq(stored, handle))
    }

    /// Checks the heap-order invariant over the whole array
    pub fn is_heap_ordered(&self) -> bool {
        (1..self.data.len()).all(|i| {
            let parent = (i - 1) / self.arity;
            !self
                .comparator
                .greater(self.data[parent].priority(), self.data[i].priority())
        })
    }

    /// Drains the heap into a vector in extraction order
    pub fn into_sorted_vec(mut self) -> Vec<Handle<V, P>> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Ok(handle) = self.remove_min() {
            sorted.push(handle);
        }
        sorted
    }

    /// Snapshots the array as a tree
    ///
    /// Yields one tree for a non-empty heap and nothing for an empty one. The
    /// trees own clones of the handles, so they stay valid after the heap
    /// changes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use packed_heaps::Heap;
    /// use packed_heaps::array::ArrayHeap;
    ///
    /// let mut heap = ArrayHeap::new();
    /// for p in [1, 3, 2] {
    ///     heap.add((), p);
    /// }
    /// let tree = heap.to_forest().next().unwrap();
    /// let root = tree.root();
    /// assert_eq!(*tree.node(root).priority(), 1);
    /// assert_eq!(tree.children(root).len(), 2);
    /// ```
    pub fn to_forest(&self) -> HeapForest<'_, V, P>
    where
        V: Clone,
        P: Clone,
    {
        self.to_forest_with(Handle::clone as fn(&Handle<V, P>) -> Handle<V, P>)
    }

    /// Snapshots the array as a tree, translating each handle with `transform`
    ///
    /// The resulting tree has exactly the shape of the heap.
    pub fn to_forest_with<V2, P2, F>(&self, transform: F) -> Forest<'_, Handle<V, P>, V2, P2, F>
    where
        F: FnMut(&Handle<V, P>) -> Handle<V2, P2>,
    {
        Forest::new(&self.data, self.arity, transform)
    }

    /// Appends a handle and restores heap order
    pub(crate) fn push_handle(&mut self, handle: Handle<V, P>) {
        self.grow_if_full();
        self.data.push(handle);
        self.sift_up(self.data.len() - 1);
    }

    /// Moves every handle out and resets the heap to minimum capacity
    pub(crate) fn take_packed(&mut self) -> Vec<Handle<V, P>> {
        let packed = std::mem::take(&mut self.data);
        self.reset();
        packed
    }

    fn reset(&mut self) {
        self.data = Vec::with_capacity(MIN_CAPACITY);
        self.capacity = MIN_CAPACITY;
        trace!(capacity = self.capacity, "reset heap storage");
    }

    fn grow_if_full(&mut self) {
        if self.data.len() < self.capacity {
            return;
        }
        self.capacity *= GROWTH_FACTOR;
        self.data.reserve_exact(self.capacity - self.data.len());
        trace!(capacity = self.capacity, len = self.data.len(), "grew heap storage");
    }

    fn shrink_if_sparse(&mut self) {
        let len = self.data.len();
        if len >= MIN_CAPACITY && len * SHRINK_FACTOR == self.capacity {
            self.capacity = len;
            self.data.shrink_to(len);
            trace!(capacity = self.capacity, "shrank heap storage");
        }
    }

    /// Move element at index up while its parent is strictly greater
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / self.arity;
            if self
                .comparator
                .greater(self.data[parent].priority(), self.data[index].priority())
            {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down until it is no greater than its smallest child
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let children = child_range(index, self.arity, len);
            if children.is_empty() {
                break;
            }

            let mut smallest = children.start;
            for child in children.start + 1..children.end {
                if self
                    .comparator
                    .greater(self.data[smallest].priority(), self.data[child].priority())
                {
                    smallest = child;
                }
            }

            if !self
                .comparator
                .greater(self.data[index].priority(), self.data[smallest].priority())
            {
                break;
            }
            self.data.swap(index, smallest);
            index = smallest;
        }
    }
}

/// Indices of the children of `index` that lie below `len`
///
/// Empty when the first child would fall outside `usize`, which only a huge
/// arity can cause.
pub(crate) fn child_range(index: usize, arity: usize, len: usize) -> Range<usize> {
    match arity.checked_mul(index).and_then(|i| i.checked_add(1)) {
        Some(first) if first < len => first..first.saturating_add(arity).min(len),
        _ => len..len,
    }
}

impl<V, P, C: Comparator<P>> Heap<V, P> for ArrayHeap<V, P, C> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn add(&mut self, value: V, priority: P) {
        self.push_handle(Handle::new(value, priority));
    }

    fn min(&self) -> Result<Handle<&V, &P>, HeapError> {
        self.data
            .first()
            .map(Handle::as_ref)
            .ok_or(HeapError::EmptyStructure)
    }

    fn remove_min(&mut self) -> Result<Handle<V, P>, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyStructure);
        }

        // The last element takes the root slot
        let root = self.data.swap_remove(0);
        if self.data.is_empty() {
            return Ok(root);
        }

        self.sift_down(0);
        self.shrink_if_sparse();
        Ok(root)
    }

    fn remove(&mut self, _handle: &Handle<V, P>) -> Result<(), HeapError> {
        Err(HeapError::UnsupportedOperation("remove"))
    }

    fn clear(&mut self) {
        self.reset();
    }

    fn handles(&self) -> Box<dyn Iterator<Item = Handle<&V, &P>> + '_> {
        Box::new(self.data.iter().map(Handle::as_ref))
    }
}

impl<'a, V, P, C> IntoIterator for &'a ArrayHeap<V, P, C> {
    type Item = &'a Handle<V, P>;
    type IntoIter = std::slice::Iter<'a, Handle<V, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<V, P, C: Comparator<P>> Extend<(V, P)> for ArrayHeap<V, P, C> {
    fn extend<I: IntoIterator<Item = (V, P)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.add(value, priority);
        }
    }
}

impl<V, P: Ord> FromIterator<(V, P)> for ArrayHeap<V, P, Natural> {
    fn from_iter<I: IntoIterator<Item = (V, P)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<V: fmt::Debug, P: fmt::Debug, C> fmt::Debug for ArrayHeap<V, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayHeap")
            .field("len", &self.data.len())
            .field("capacity", &self.capacity)
            .field("arity", &self.arity)
            .field("data", &self.data)
            .finish()
    }
}
