//! Heap construction from options
//!
//! [`HeapOptions`] collects the arity, comparator and stability of a heap and
//! builds an [`AnyHeap`], a tagged variant over the concrete heaps of this
//! crate. Every operation on `AnyHeap` is a single `match` on the variant.
//!
//! ```rust
//! use packed_heaps::Heap;
//! use packed_heaps::factory::HeapOptions;
//!
//! let mut heap = HeapOptions::new().arity(4).stable(true).build().unwrap();
//! heap.add("a", 2);
//! heap.add("b", 1);
//! heap.add("c", 2);
//!
//! let values: Vec<_> = std::iter::from_fn(|| heap.remove_min().ok())
//!     .map(|h| *h.value())
//!     .collect();
//! assert_eq!(values, vec!["b", "a", "c"]);
//! ```

use tracing::debug;

use crate::array::{ArrayHeap, BINARY_ARITY};
use crate::compare::{Comparator, Natural};
use crate::error::HeapError;
use crate::forest::Tree;
use crate::handle::Handle;
use crate::merge::{MergeSource, MergeView};
use crate::stable::StableHeap;
use crate::traits::Heap;

/// Settings for [`HeapOptions::build`]
#[derive(Debug, Clone)]
pub struct HeapOptions<C = Natural> {
    arity: usize,
    comparator: C,
    stable: bool,
    initial_version: i64,
}

impl HeapOptions<Natural> {
    /// Binary, natural order, not stable, versions starting at 0
    pub fn new() -> Self {
        Self {
            arity: BINARY_ARITY,
            comparator: Natural,
            stable: false,
            initial_version: 0,
        }
    }
}

impl Default for HeapOptions<Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> HeapOptions<C> {
    /// Maximum children per node; must be at least 2
    pub fn arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    pub fn comparator<C2>(self, comparator: C2) -> HeapOptions<C2> {
        HeapOptions {
            arity: self.arity,
            comparator,
            stable: self.stable,
            initial_version: self.initial_version,
        }
    }

    /// Extract equal priorities in insertion order
    pub fn stable(mut self, stable: bool) -> Self {
        self.stable = stable;
        self
    }

    /// First version stamped by a stable heap; ignored otherwise
    pub fn initial_version(mut self, version: i64) -> Self {
        self.initial_version = version;
        self
    }

    /// Builds an empty heap
    ///
    /// # Errors
    /// [`HeapError::InvalidArity`] if the arity is below 2.
    pub fn build<V, P>(self) -> Result<AnyHeap<V, P, C>, HeapError>
    where
        C: Comparator<P>,
    {
        debug!(arity = self.arity, stable = self.stable, "building heap");
        if self.stable {
            StableHeap::with_options(self.arity, self.comparator, self.initial_version)
                .map(AnyHeap::Stable)
        } else {
            ArrayHeap::with_arity(self.arity, self.comparator).map(AnyHeap::Array)
        }
    }
}

/// One of the heaps of this crate, chosen at runtime
#[derive(Debug, Clone)]
pub enum AnyHeap<V, P, C = Natural> {
    Array(ArrayHeap<V, P, C>),
    Stable(StableHeap<V, P, C>),
}

impl<V, P, C: Comparator<P>> AnyHeap<V, P, C> {
    #[inline]
    pub fn is_stable(&self) -> bool {
        matches!(self, AnyHeap::Stable(_))
    }

    pub fn arity(&self) -> usize {
        match self {
            AnyHeap::Array(heap) => heap.arity(),
            AnyHeap::Stable(heap) => heap.arity(),
        }
    }

    pub fn capacity(&self) -> usize {
        match self {
            AnyHeap::Array(heap) => heap.capacity(),
            AnyHeap::Stable(heap) => heap.capacity(),
        }
    }

    pub fn is_heap_ordered(&self) -> bool {
        match self {
            AnyHeap::Array(heap) => heap.is_heap_ordered(),
            AnyHeap::Stable(heap) => heap.is_heap_ordered(),
        }
    }

    /// Absorbs every handle of `source`, leaving it empty
    pub fn merge<S>(&mut self, source: &mut S)
    where
        S: MergeSource<V, P> + ?Sized,
    {
        match self {
            AnyHeap::Array(heap) => heap.merge(source),
            AnyHeap::Stable(heap) => heap.merge(source),
        }
    }

    /// Snapshots the heap as a tree; `None` when empty
    pub fn to_tree(&self) -> Option<Tree<V, P>>
    where
        V: Clone,
        P: Clone,
    {
        match self {
            AnyHeap::Array(heap) => heap.to_forest().next(),
            AnyHeap::Stable(heap) => heap.to_forest().next(),
        }
    }
}

impl<V, P, C: Comparator<P>> Heap<V, P> for AnyHeap<V, P, C> {
    fn len(&self) -> usize {
        match self {
            AnyHeap::Array(heap) => heap.len(),
            AnyHeap::Stable(heap) => heap.len(),
        }
    }

    fn add(&mut self, value: V, priority: P) {
        match self {
            AnyHeap::Array(heap) => heap.add(value, priority),
            AnyHeap::Stable(heap) => heap.add(value, priority),
        }
    }

    fn min(&self) -> Result<Handle<&V, &P>, HeapError> {
        match self {
            AnyHeap::Array(heap) => heap.min(),
            AnyHeap::Stable(heap) => heap.min(),
        }
    }

    fn remove_min(&mut self) -> Result<Handle<V, P>, HeapError> {
        match self {
            AnyHeap::Array(heap) => heap.remove_min(),
            AnyHeap::Stable(heap) => heap.remove_min(),
        }
    }

    fn remove(&mut self, handle: &Handle<V, P>) -> Result<(), HeapError> {
        match self {
            AnyHeap::Array(heap) => heap.remove(handle),
            AnyHeap::Stable(heap) => heap.remove(handle),
        }
    }

    fn clear(&mut self) {
        match self {
            AnyHeap::Array(heap) => heap.clear(),
            AnyHeap::Stable(heap) => heap.clear(),
        }
    }

    fn handles(&self) -> Box<dyn Iterator<Item = Handle<&V, &P>> + '_> {
        match self {
            AnyHeap::Array(heap) => heap.handles(),
            AnyHeap::Stable(heap) => heap.handles(),
        }
    }
}

impl<V, P, C: Comparator<P>> Extend<(V, P)> for AnyHeap<V, P, C> {
    fn extend<I: IntoIterator<Item = (V, P)>>(&mut self, iter: I) {
        match self {
            AnyHeap::Array(heap) => heap.extend(iter),
            AnyHeap::Stable(heap) => heap.extend(iter),
        }
    }
}

impl<V, P, C: Comparator<P>> MergeSource<V, P> for AnyHeap<V, P, C> {
    fn source_len(&self) -> usize {
        self.len()
    }

    fn merge_view(&mut self) -> MergeView<'_, V, P> {
        match self {
            AnyHeap::Array(heap) => heap.merge_view(),
            AnyHeap::Stable(heap) => heap.merge_view(),
        }
    }
}
