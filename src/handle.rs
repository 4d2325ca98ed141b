//! Immutable (value, priority) pairs stored by the heaps

/// An element stored in a heap: a value and the priority it is ordered by
///
/// Handles are immutable once built. Two handles with equal values (or equal
/// priorities) are still distinct entries; heaps never deduplicate them.
///
/// `Handle<&V, &P>` is the borrowed form returned by [`min`](crate::Heap::min)
/// and by iteration, so callers never see a heap's internal priority wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle<V, P> {
    value: V,
    priority: P,
}

impl<V, P> Handle<V, P> {
    /// Creates a handle
    #[inline]
    pub fn new(value: V, priority: P) -> Self {
        Self { value, priority }
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn priority(&self) -> &P {
        &self.priority
    }

    /// Splits the handle into `(value, priority)`
    #[inline]
    pub fn into_parts(self) -> (V, P) {
        (self.value, self.priority)
    }

    /// Borrows both halves of the handle
    #[inline]
    pub fn as_ref(&self) -> Handle<&V, &P> {
        Handle {
            value: &self.value,
            priority: &self.priority,
        }
    }

    /// Re-wraps the handle into a wider value/priority representation
    #[inline]
    pub fn convert<V2, P2>(self) -> Handle<V2, P2>
    where
        V2: From<V>,
        P2: From<P>,
    {
        Handle {
            value: V2::from(self.value),
            priority: P2::from(self.priority),
        }
    }

    /// Replaces the priority, keeping the value
    #[inline]
    pub(crate) fn map_priority<P2>(self, f: impl FnOnce(P) -> P2) -> Handle<V, P2> {
        Handle {
            value: self.value,
            priority: f(self.priority),
        }
    }
}

impl<V: Clone, P: Clone> Handle<&V, &P> {
    /// Clones a borrowed handle into an owned one
    #[inline]
    pub fn cloned(&self) -> Handle<V, P> {
        Handle {
            value: self.value.clone(),
            priority: self.priority.clone(),
        }
    }
}

impl<V, P> From<(V, P)> for Handle<V, P> {
    fn from((value, priority): (V, P)) -> Self {
        Self::new(value, priority)
    }
}
