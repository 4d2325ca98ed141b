//! Merge protocol
//!
//! `merge` moves every handle of a source heap into a receiver and leaves the
//! source empty. How the handles are moved depends on what the source can
//! offer, asked once per call through [`MergeSource::merge_view`]:
//!
//! | Source                               | View       | Cost                  |
//! |--------------------------------------|------------|-----------------------|
//! | empty                                | (none)     | O(1), no-op           |
//! | `ArrayHeap<V, P, _>`                 | `Packed`   | O(m log(n + m))       |
//! | `ArrayHeap<V2, P2, _>` via `widen()` | `Widened`  | O(m log(n + m))       |
//! | any other heap, e.g. `StableHeap`    | `Opaque`   | O(m log m + m log(n + m)) |
//!
//! Packed sources hand over their array in one move and are reset eagerly.
//! Opaque sources are drained through `remove_min`. Either way each handle is
//! re-inserted through the receiver's normal sift-up path; splicing two arrays
//! and re-heapifying is never attempted.
//!
//! Merging a heap into itself needs two live mutable borrows of the same
//! heap, so the borrow checker rejects it before it can run:
//!
//! ```rust,compile_fail
//! use packed_heaps::Heap;
//! use packed_heaps::array::ArrayHeap;
//!
//! let mut heap = ArrayHeap::new();
//! heap.add("a", 1);
//! heap.merge(&mut heap);
//! ```

use tracing::debug;

use crate::array::ArrayHeap;
use crate::compare::Comparator;
use crate::handle::Handle;
use crate::traits::Heap;

/// What a merge source can hand over
pub enum MergeView<'a, V, P> {
    /// Handles of a source with the receiver's layout and types
    ///
    /// The source has already been reset.
    Packed(Vec<Handle<V, P>>),
    /// Handles of a same-layout source, re-wrapped into the receiver's types
    ///
    /// The source has already been reset.
    Widened(Vec<Handle<V, P>>),
    /// A source that can only be drained through its `Heap` interface
    Opaque(&'a mut dyn Heap<V, P>),
}

/// A heap whose handles can be absorbed by [`ArrayHeap::merge`] or
/// [`StableHeap::merge`](crate::stable::StableHeap::merge)
pub trait MergeSource<V, P> {
    /// Number of handles the source holds
    fn source_len(&self) -> usize;

    /// Hands over the source's contents in the cheapest form it supports
    fn merge_view(&mut self) -> MergeView<'_, V, P>;
}

impl<V, P, C: Comparator<P>> MergeSource<V, P> for ArrayHeap<V, P, C> {
    fn source_len(&self) -> usize {
        self.len()
    }

    fn merge_view(&mut self) -> MergeView<'_, V, P> {
        MergeView::Packed(self.take_packed())
    }
}

/// An `ArrayHeap` offered to a receiver with wider value/priority types
///
/// Built by [`ArrayHeap::widen`].
pub struct Widen<'a, V, P, C> {
    heap: &'a mut ArrayHeap<V, P, C>,
}

impl<V, P, C, V2, P2> MergeSource<V2, P2> for Widen<'_, V, P, C>
where
    C: Comparator<P>,
    V2: From<V>,
    P2: From<P>,
{
    fn source_len(&self) -> usize {
        self.heap.len()
    }

    fn merge_view(&mut self) -> MergeView<'_, V2, P2> {
        MergeView::Widened(
            self.heap
                .take_packed()
                .into_iter()
                .map(Handle::convert)
                .collect(),
        )
    }
}

/// Any heap, drained through `remove_min` regardless of its layout
///
/// ```rust
/// use packed_heaps::Heap;
/// use packed_heaps::array::ArrayHeap;
/// use packed_heaps::merge::Draining;
///
/// let mut a = ArrayHeap::new();
/// let mut b = ArrayHeap::new();
/// a.add("a", 2);
/// b.add("b", 1);
///
/// a.merge(&mut Draining::new(&mut b));
/// assert!(b.is_empty());
/// assert_eq!(*a.min().unwrap().value(), &"b");
/// ```
pub struct Draining<'a, H> {
    heap: &'a mut H,
}

impl<'a, H> Draining<'a, H> {
    pub fn new(heap: &'a mut H) -> Self {
        Self { heap }
    }
}

impl<V, P, H: Heap<V, P>> MergeSource<V, P> for Draining<'_, H> {
    fn source_len(&self) -> usize {
        self.heap.len()
    }

    fn merge_view(&mut self) -> MergeView<'_, V, P> {
        MergeView::Opaque(&mut *self.heap)
    }
}

impl<V, P, C: Comparator<P>> ArrayHeap<V, P, C> {
    /// Absorbs every handle of `source`, leaving it empty
    ///
    /// # Example
    ///
    /// ```rust
    /// use packed_heaps::Heap;
    /// use packed_heaps::array::ArrayHeap;
    ///
    /// let mut a = ArrayHeap::new();
    /// a.add("five", 5);
    /// a.add("one", 1);
    ///
    /// let mut b = ArrayHeap::new();
    /// b.add("three", 3);
    ///
    /// a.merge(&mut b);
    /// assert!(b.is_empty());
    /// assert_eq!(a.len(), 3);
    /// ```
    pub fn merge<S>(&mut self, source: &mut S)
    where
        S: MergeSource<V, P> + ?Sized,
    {
        absorb(source, |handle| self.push_handle(handle));
    }

    /// Offers this heap as a merge source for wider value/priority types
    ///
    /// ```rust
    /// use packed_heaps::Heap;
    /// use packed_heaps::array::ArrayHeap;
    ///
    /// let mut narrow: ArrayHeap<u8, i32> = ArrayHeap::new();
    /// narrow.add(1, -3);
    ///
    /// let mut wide: ArrayHeap<u64, i64> = ArrayHeap::new();
    /// wide.add(2, 10);
    /// wide.merge(&mut narrow.widen());
    ///
    /// assert!(narrow.is_empty());
    /// assert_eq!(wide.min().unwrap().into_parts(), (&1u64, &-3i64));
    /// ```
    pub fn widen(&mut self) -> Widen<'_, V, P, C> {
        Widen { heap: self }
    }
}

/// Moves every handle of `source` into `add`
pub(crate) fn absorb<V, P, S>(source: &mut S, mut add: impl FnMut(Handle<V, P>))
where
    S: MergeSource<V, P> + ?Sized,
{
    let len = source.source_len();
    if len == 0 {
        return;
    }

    match source.merge_view() {
        MergeView::Packed(handles) => {
            debug!(tier = "packed", len, "merging heap");
            handles.into_iter().for_each(add);
        }
        MergeView::Widened(handles) => {
            debug!(tier = "widened", len, "merging heap");
            handles.into_iter().for_each(add);
        }
        MergeView::Opaque(heap) => {
            debug!(tier = "opaque", len, "merging heap");
            while let Ok(handle) = heap.remove_min() {
                add(handle);
            }
        }
    }
}
