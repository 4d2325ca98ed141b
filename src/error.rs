//! Error type shared by every heap in this crate

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `min` or `remove_min` was called on a heap with no elements
    #[error("the heap is empty")]
    EmptyStructure,
    /// The operation is deliberately not provided by this heap
    ///
    /// Carries the name of the rejected operation.
    #[error("`{0}` is not supported by this heap")]
    UnsupportedOperation(&'static str),
    /// A heap was configured with fewer than two children per node
    #[error("heap arity must be at least 2, got {0}")]
    InvalidArity(usize),
}
