//! Packed Heap Data Structures for Rust
//!
//! This crate provides array-backed priority queues that order (value, priority)
//! pairs with an injected comparator instead of `Ord`.
//!
//! # Features
//!
//! - **ArrayHeap**: packed d-ary min-heap (binary by default); O(log n) insert and
//!   remove-min, O(1) min, lazy storage resizing
//! - **StableHeap**: an `ArrayHeap` that extracts equal priorities in insertion order
//! - **Forest view**: tree snapshots of a heap's implicit structure for inspection
//! - **Merge**: destructive absorption of another heap, with a bulk path for packed
//!   sources and a drain path for everything else
//! - **HeapOptions**: runtime choice of arity, comparator and stability
//!
//! # Example
//!
//! ```rust
//! use packed_heaps::stable::StableHeap;
//! use packed_heaps::Heap;
//!
//! let mut heap = StableHeap::new();
//! heap.add("first", 5);
//! heap.add("urgent", 1);
//! heap.add("second", 5);
//!
//! assert_eq!(*heap.min().unwrap().value(), &"urgent");
//! heap.remove_min().unwrap();
//! assert_eq!(heap.remove_min().unwrap().into_parts(), ("first", 5));
//! assert_eq!(heap.remove_min().unwrap().into_parts(), ("second", 5));
//! ```

pub mod array;
pub mod compare;
pub mod error;
pub mod factory;
pub mod forest;
pub mod handle;
pub mod merge;
pub mod stable;
pub mod traits;

// Re-export the main types for convenience
pub use error::HeapError;
pub use handle::Handle;
pub use traits::Heap;
