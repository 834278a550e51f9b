//! Circular doubly-linked lists over slab storage.
//!
//! A ring is a sequence closed by a header (sentinel) node: the header's
//! `next` is the first element, its `prev` the last, and an empty ring is a
//! header linked to itself. Nothing is ever null, so insertion, removal,
//! splicing, swapping, and reversal are a handful of unconditional link
//! writes.
//!
//! # Design Philosophy
//!
//! Nodes do not live behind pointers. They live in a slab-like [`Storage`]
//! and link to each other by key:
//!
//! ```text
//! Storage (Arena)  - owns nodes, hands out stable keys
//! link::*          - rewires next/prev keys, never allocates
//! List / OwnedList - allocate and free nodes, count elements
//! ```
//!
//! Benefits:
//! - **Stable positions**: a [`Position`] stays valid until its own element
//!   is removed, across inserts, splices, and reversal
//! - **O(1) splice**: lists sharing one storage move ranges between each
//!   other by relinking
//! - **Movable lists**: no self-referential pointers, a list value can be
//!   moved like any other
//! - **Compact links**: `u32` keys keep links at 8 bytes per node
//!
//! # Quick Start
//!
//! ```
//! use nexus_ring::OwnedList;
//!
//! let mut list: OwnedList<u64> = OwnedList::new();
//! list.push_back(1);
//! list.push_back(2);
//! list.push_front(0);
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
//! assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![2, 1, 0]);
//!
//! list.reverse();
//! assert_eq!(list.front(), Ok(&2));
//! ```
//!
//! # Sharing Storage
//!
//! ```
//! use nexus_ring::{List, ListArena};
//!
//! let mut storage: ListArena<&str> = ListArena::new();
//! let mut todo = List::new(&mut storage);
//! let mut done = List::new(&mut storage);
//!
//! let write = todo.push_back(&mut storage, "write");
//! todo.push_back(&mut storage, "review");
//!
//! // O(1): relink, no reallocation
//! done.splice_one(&mut storage, done.end(), &mut todo, write).unwrap();
//!
//! assert_eq!(todo.len(), 1);
//! assert_eq!(done.get(&storage, write), Some(&"write"));
//! ```
//!
//! # Critical Invariant: Same Storage Instance
//!
//! All operations on a [`List`] must use the storage it was created with.
//! This is the caller's responsibility (same discipline as the `slab`
//! crate). [`OwnedList`] bundles the two and cannot get it wrong.
//!
//! # Layers
//!
//! | Layer | Items | Role |
//! |-------|-------|------|
//! | keys | [`Key`] | Compact node handles with a reserved `NONE` |
//! | storage | [`Storage`], [`Arena`] | Node allocation by key |
//! | links | [`link`], [`Link`], [`Linked`] | Payload-oblivious ring surgery |
//! | nodes | [`Node`] | Links plus an optional payload |
//! | containers | [`List`], [`OwnedList`] | Sequences with positions and cursors |
//! | adapters | [`Stack`] | LIFO view over a [`BackSequence`] |
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab`

#![warn(missing_docs)]

pub mod cursor;
pub mod error;
pub mod key;
pub mod link;
pub mod list;
pub mod node;
pub mod owned;
pub mod stack;
pub mod storage;

pub use cursor::{Cursor, CursorMut, Position};
pub use error::ListError;
pub use key::Key;
pub use link::{Link, Linked};
pub use list::{Drain, Iter, IterMut, List, ListArena, Positions};
pub use node::Node;
pub use owned::{IntoIter, OwnedList};
pub use stack::{BackSequence, Stack};
pub use storage::{Arena, Storage};

#[cfg(feature = "slab")]
pub use list::SlabListStorage;
