//! Convenience wrappers that own their storage.
//!
//! The types in this module combine a list with its backing storage,
//! providing a simpler API for cases where you don't need to share storage
//! across multiple lists.
//!
//! # When to use owned variants
//!
//! Use [`OwnedList`] when:
//! - You have a single list (not multiple queues sharing storage)
//! - You want a simpler API without passing `&mut storage` to every method
//! - You want every node freed automatically on drop
//!
//! # When to use the raw variant
//!
//! Use [`List`](crate::List) with external storage when:
//! - Multiple lists share one storage pool (e.g., order queues per price level)
//! - You need to splice ranges between lists in O(1)
//! - You want finer control over memory layout and allocation
//!
//! # Example
//!
//! ```
//! use nexus_ring::OwnedList;
//!
//! // Simple FIFO queue
//! let mut queue: OwnedList<u64> = OwnedList::with_capacity(100);
//! queue.push_back(1);
//! queue.push_back(2);
//! assert_eq!(queue.pop_front(), Ok(1));
//! ```

mod list;

pub use list::{IntoIter, OwnedList};
