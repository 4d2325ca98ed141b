//! FIFO-stable heap
//!
//! [`StableHeap`] decorates an [`ArrayHeap`] so that handles with equal
//! priority come out in the order they went in.
//!
//! # Algorithm Overview
//!
//! Each insertion is stamped with a version taken from a per-instance counter
//! that only ever increases. The inner heap orders by `(priority, version)`:
//! the caller's comparator decides first, and the version breaks ties, so the
//! earlier insertion wins. Versions are stripped again on the way out; callers
//! only ever see their own priority type.
//!
//! The counter belongs to the heap instance. Two stable heaps never share
//! versions, and `clear` does not rewind the counter.
//!
//! # Example
//!
//! ```rust
//! use packed_heaps::Heap;
//! use packed_heaps::stable::StableHeap;
//!
//! let mut heap = StableHeap::new();
//! heap.add("a", 5);
//! heap.add("x", 1);
//! heap.add("b", 5);
//! heap.add("c", 5);
//!
//! let order: Vec<_> = std::iter::from_fn(|| heap.remove_min().ok())
//!     .map(|h| *h.value())
//!     .collect();
//! assert_eq!(order, vec!["x", "a", "b", "c"]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::array::ArrayHeap;
use crate::compare::{Comparator, Natural};
use crate::error::HeapError;
use crate::forest::Forest;
use crate::handle::Handle;
use crate::merge::{self, MergeSource, MergeView};
use crate::traits::Heap;

/// A priority tagged with its insertion version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Versioned<P> {
    value: P,
    version: i64,
}

impl<P> Versioned<P> {
    #[inline]
    pub fn new(value: P, version: i64) -> Self {
        Self { value, version }
    }

    #[inline]
    pub fn value(&self) -> &P {
        &self.value
    }

    #[inline]
    pub fn version(&self) -> i64 {
        self.version
    }

    #[inline]
    pub fn into_value(self) -> P {
        self.value
    }
}

/// Orders [`Versioned`] priorities by the wrapped comparator, then by version
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionOrder<C>(pub C);

impl<P, C: Comparator<P>> Comparator<Versioned<P>> for VersionOrder<C> {
    #[inline]
    fn compare(&self, a: &Versioned<P>, b: &Versioned<P>) -> Ordering {
        self.0
            .compare(&a.value, &b.value)
            .then_with(|| a.version.cmp(&b.version))
    }
}

/// Forest iterator returned by [`StableHeap::to_forest`]
pub type StableForest<'a, V, P> =
    Forest<'a, Handle<V, Versioned<P>>, V, P, fn(&Handle<V, Versioned<P>>) -> Handle<V, P>>;

fn strip_version<V: Clone, P: Clone>(handle: &Handle<V, Versioned<P>>) -> Handle<V, P> {
    Handle::new(handle.value().clone(), handle.priority().value().clone())
}

/// A min-heap that extracts equal priorities in insertion order
#[derive(Clone)]
pub struct StableHeap<V, P, C = Natural> {
    inner: ArrayHeap<V, Versioned<P>, VersionOrder<C>>,
    /// Version stamped on the next insertion
    next_version: i64,
}

impl<V, P: Ord> StableHeap<V, P, Natural> {
    /// Creates an empty stable binary heap ordered by `P`'s `Ord`
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<V, P: Ord> Default for StableHeap<V, P, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P, C: Comparator<P>> StableHeap<V, P, C> {
    /// Creates an empty stable binary heap ordered by `comparator`
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            inner: ArrayHeap::with_comparator(VersionOrder(comparator)),
            next_version: 0,
        }
    }

    /// Creates an empty stable heap with the given arity and first version
    ///
    /// # Errors
    /// [`HeapError::InvalidArity`] if `arity < 2`.
    pub fn with_options(
        arity: usize,
        comparator: C,
        initial_version: i64,
    ) -> Result<Self, HeapError> {
        Ok(Self {
            inner: ArrayHeap::with_arity(arity, VersionOrder(comparator))?,
            next_version: initial_version,
        })
    }

    /// Logical capacity of the inner array
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.inner.arity()
    }

    #[inline]
    pub fn comparator(&self) -> &C {
        &self.inner.comparator().0
    }

    /// Iterates handles in array order (not sorted order), without versions
    pub fn iter(&self) -> Iter<'_, V, P> {
        Iter {
            inner: self.inner.iter(),
        }
    }

    /// Checks the heap-order invariant, versions included
    pub fn is_heap_ordered(&self) -> bool {
        self.inner.is_heap_ordered()
    }

    /// Drains the heap into a vector in extraction order
    pub fn into_sorted_vec(mut self) -> Vec<Handle<V, P>> {
        let mut sorted = Vec::with_capacity(self.inner.len());
        while let Ok(handle) = self.remove_min() {
            sorted.push(handle);
        }
        sorted
    }

    /// Snapshots the heap as a tree with versions stripped from every node
    pub fn to_forest(&self) -> StableForest<'_, V, P>
    where
        V: Clone,
        P: Clone,
    {
        self.inner
            .to_forest_with(strip_version as fn(&Handle<V, Versioned<P>>) -> Handle<V, P>)
    }

    /// Absorbs every handle of `source`, leaving it empty
    ///
    /// Absorbed handles are stamped with fresh versions in the order they
    /// arrive, so they rank behind everything already in this heap at equal
    /// priority. Draining another `StableHeap` delivers its handles in
    /// `(priority, version)` order, which keeps its FIFO order intact.
    pub fn merge<S>(&mut self, source: &mut S)
    where
        S: MergeSource<V, P> + ?Sized,
    {
        merge::absorb(source, |handle| {
            let (value, priority) = handle.into_parts();
            self.add(value, priority);
        });
    }

    fn take_version(&mut self) -> i64 {
        let version = self.next_version;
        self.next_version = version
            .checked_add(1)
            .expect("version counter overflow: more than 2⁶³ insertions into one heap");
        version
    }
}

impl<V, P, C: Comparator<P>> Heap<V, P> for StableHeap<V, P, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn add(&mut self, value: V, priority: P) {
        let version = self.take_version();
        self.inner.add(value, Versioned::new(priority, version));
    }

    fn min(&self) -> Result<Handle<&V, &P>, HeapError> {
        let (value, priority) = self.inner.min()?.into_parts();
        Ok(Handle::new(value, priority.value()))
    }

    fn remove_min(&mut self) -> Result<Handle<V, P>, HeapError> {
        self.inner
            .remove_min()
            .map(|handle| handle.map_priority(Versioned::into_value))
    }

    fn remove(&mut self, _handle: &Handle<V, P>) -> Result<(), HeapError> {
        Err(HeapError::UnsupportedOperation("remove"))
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn handles(&self) -> Box<dyn Iterator<Item = Handle<&V, &P>> + '_> {
        Box::new(self.iter())
    }
}

/// Versions are private to the heap, so another heap can only drain it in order
impl<V, P, C: Comparator<P>> MergeSource<V, P> for StableHeap<V, P, C> {
    fn source_len(&self) -> usize {
        self.inner.len()
    }

    fn merge_view(&mut self) -> MergeView<'_, V, P> {
        MergeView::Opaque(self)
    }
}

impl<V, P, C: Comparator<P>> Extend<(V, P)> for StableHeap<V, P, C> {
    fn extend<I: IntoIterator<Item = (V, P)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.add(value, priority);
        }
    }
}

impl<V: fmt::Debug, P: fmt::Debug, C> fmt::Debug for StableHeap<V, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StableHeap")
            .field("next_version", &self.next_version)
            .field("inner", &self.inner)
            .finish()
    }
}

/// Array-order iterator over a [`StableHeap`]
pub struct Iter<'a, V, P> {
    inner: std::slice::Iter<'a, Handle<V, Versioned<P>>>,
}

impl<'a, V, P> Iterator for Iter<'a, V, P> {
    type Item = Handle<&'a V, &'a P>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|handle| Handle::new(handle.value(), handle.priority().value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, P> ExactSizeIterator for Iter<'_, V, P> {}

impl<'a, V, P, C: Comparator<P>> IntoIterator for &'a StableHeap<V, P, C> {
    type Item = Handle<&'a V, &'a P>;
    type IntoIter = Iter<'a, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
