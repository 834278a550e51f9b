//! Circular doubly-linked list over external storage.
//!
//! Every list owns one header node in the storage it is created with. The
//! header closes the ring: `end()` is the header's position, `begin()` is
//! whatever follows it, and an empty list is a header linked to itself.
//! Element nodes live in the same storage, so several lists can share one
//! storage and move ranges between each other in O(1).
//!
//! # Storage Invariant
//!
//! A list instance must always be used with the storage it was created
//! with. Passing a different storage panics or corrupts both structures.
//! This is the caller's responsibility to enforce (same discipline as the
//! `slab` crate).
//!
//! # Example
//!
//! ```
//! use nexus_ring::{List, ListArena};
//!
//! let mut storage: ListArena<u64> = ListArena::new();
//! let mut list = List::new(&mut storage);
//!
//! // Insert values - returns a position for O(1) access/removal later
//! let a = list.push_back(&mut storage, 1);
//! let b = list.push_back(&mut storage, 2);
//! list.push_back(&mut storage, 3);
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.get(&storage, b), Some(&2));
//!
//! // Erase from the middle - O(1)
//! assert_eq!(list.erase(&mut storage, b), Ok(2));
//! assert_eq!(list.len(), 2);
//!
//! // Positions elsewhere stay valid
//! assert_eq!(list.get(&storage, a), Some(&1));
//!
//! assert_eq!(list.pop_front(&mut storage), Ok(1));
//! assert_eq!(list.pop_front(&mut storage), Ok(3));
//! assert!(list.pop_front(&mut storage).is_err());
//!
//! list.release(&mut storage);
//! assert!(storage.is_empty());
//! ```
//!
//! # Moving Between Lists
//!
//! Lists sharing a storage exchange nodes without reallocating. Positions
//! keep naming the same elements after the move.
//!
//! ```
//! use nexus_ring::{List, ListArena};
//!
//! #[derive(Debug)]
//! struct Order {
//!     id: u64,
//!     qty: u64,
//! }
//!
//! // One storage for all orders
//! let mut orders: ListArena<Order> = ListArena::with_capacity(1024);
//!
//! // Separate queues per price level
//! let mut level_100 = List::new(&mut orders);
//! let mut level_101 = List::new(&mut orders);
//!
//! let order = level_100.push_back(&mut orders, Order { id: 1, qty: 50 });
//! level_100.push_back(&mut orders, Order { id: 2, qty: 10 });
//!
//! // Price amendment: move the order to a different level
//! level_101.splice_one(&mut orders, level_101.end(), &mut level_100, order).unwrap();
//!
//! assert_eq!(level_100.len(), 1);
//! assert_eq!(level_101.get(&orders, order).map(|o| o.id), Some(1));
//! ```

use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::{Arena, Cursor, CursorMut, Key, Linked, ListError, Node, Position, Storage, link};

/// Arena storage for the nodes of one or more lists.
pub type ListArena<T, K = u32> = Arena<Node<T, K>, K>;

/// `slab::Slab` storage for the nodes of one or more lists.
#[cfg(feature = "slab")]
pub type SlabListStorage<T> = slab::Slab<Node<T, usize>>;

/// A circular doubly-linked list over external storage.
///
/// The list value holds only its header key and element count. Nodes live
/// in user-provided storage, wrapped in [`Node`]. The list does not free its
/// header on drop; call [`release`](Self::release) to return every node to
/// the storage, or use [`OwnedList`](crate::OwnedList).
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `S`: Storage type (e.g., [`ListArena<T>`])
/// - `K`: Key type (default `u32`)
#[derive(Debug)]
pub struct List<T, S, K: Key = u32>
where
    S: Storage<Node<T, K>, Key = K>,
{
    pub(crate) header: K,
    len: usize,
    _marker: PhantomData<(T, S)>,
}

// =============================================================================
// Construction and queries
// =============================================================================

impl<T, S, K: Key> List<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Creates an empty list, allocating its header in `storage`.
    pub fn new(storage: &mut S) -> Self {
        let header = storage.insert(Node::header());
        link::init(storage, header);
        Self {
            header,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn node<'a>(&self, storage: &'a S, key: K) -> &'a Node<T, K> {
        // Safety: the header and every key reached through ring links are live
        unsafe { storage.get_unchecked(key) }
    }

    #[inline]
    fn node_mut<'a>(&self, storage: &'a mut S, key: K) -> &'a mut Node<T, K> {
        // Safety: see `node`
        unsafe { storage.get_unchecked_mut(key) }
    }

    /// Returns the position of the first element, or `end()` if empty.
    #[inline]
    pub fn begin(&self, storage: &S) -> Position<K> {
        Position::new(self.node(storage, self.header).next())
    }

    /// Returns the end position: one past the last element.
    ///
    /// Inserting before `end()` appends. It never names an element.
    #[inline]
    pub fn end(&self) -> Position<K> {
        Position::new(self.header)
    }

    /// Returns the position following `position` (wrapping through `end()`).
    ///
    /// # Panics
    ///
    /// Panics if `position` is not valid in storage.
    #[inline]
    pub fn next(&self, storage: &S, position: Position<K>) -> Position<K> {
        Position::new(storage.get(position.key()).expect("invalid key").next())
    }

    /// Returns the position preceding `position` (wrapping through `end()`).
    ///
    /// # Panics
    ///
    /// Panics if `position` is not valid in storage.
    #[inline]
    pub fn prev(&self, storage: &S, position: Position<K>) -> Position<K> {
        Position::new(storage.get(position.key()).expect("invalid key").prev())
    }

    /// Returns the element at `position`.
    ///
    /// `None` for `end()` or a vacant slot.
    #[inline]
    pub fn get<'a>(&self, storage: &'a S, position: Position<K>) -> Option<&'a T> {
        storage.get(position.key()).and_then(Node::value)
    }

    /// Returns the element at `position` mutably.
    #[inline]
    pub fn get_mut<'a>(&mut self, storage: &'a mut S, position: Position<K>) -> Option<&'a mut T> {
        storage.get_mut(position.key()).and_then(Node::value_mut)
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front<'a>(&self, storage: &'a S) -> Result<&'a T, ListError> {
        let first = self.node(storage, self.header).next();
        // empty: `first` is the header, which has no value
        self.node(storage, first)
            .value()
            .ok_or(ListError::EmptyContainer)
    }

    /// Returns the first element mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front_mut<'a>(&mut self, storage: &'a mut S) -> Result<&'a mut T, ListError> {
        let first = self.node(storage, self.header).next();
        self.node_mut(storage, first)
            .value_mut()
            .ok_or(ListError::EmptyContainer)
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back<'a>(&self, storage: &'a S) -> Result<&'a T, ListError> {
        let last = self.node(storage, self.header).prev();
        self.node(storage, last)
            .value()
            .ok_or(ListError::EmptyContainer)
    }

    /// Returns the last element mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back_mut<'a>(&mut self, storage: &'a mut S) -> Result<&'a mut T, ListError> {
        let last = self.node(storage, self.header).prev();
        self.node_mut(storage, last)
            .value_mut()
            .ok_or(ListError::EmptyContainer)
    }

    /// Checks that `key` names a hooked element node.
    ///
    /// Membership in this particular list is not verified; a position from
    /// another list sharing the storage passes.
    #[inline]
    fn check_element(&self, storage: &S, key: K) -> Result<(), ListError> {
        match storage.get(key) {
            Some(node) if !node.is_header() && node.is_linked() => Ok(()),
            _ => Err(ListError::InvalidPosition),
        }
    }

    /// Checks that `key` is this list's end position or a hooked element.
    #[inline]
    fn check_position(&self, storage: &S, key: K) -> Result<(), ListError> {
        if key == self.header {
            Ok(())
        } else {
            self.check_element(storage, key)
        }
    }
}

// =============================================================================
// Insertion and removal
// =============================================================================

impl<T, S, K: Key> List<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Allocates a node for `value` and hooks it before `before`.
    #[inline]
    pub(crate) fn link_new(&mut self, storage: &mut S, before: K, value: T) -> K {
        let key = storage.insert(Node::new(value));
        link::hook(storage, key, before);
        self.len += 1;
        key
    }

    /// Unhooks the element at `key`, frees its node, and returns the value.
    #[inline]
    pub(crate) fn unlink_free(&mut self, storage: &mut S, key: K) -> T {
        link::unhook(storage, key);
        self.len = self.len.saturating_sub(1);
        match storage.remove(key).and_then(Node::into_value) {
            Some(value) => value,
            None => unreachable!("element node without a value"),
        }
    }

    /// Inserts `value` before `position` and returns the new element's
    /// position.
    ///
    /// `position` may be `end()`, which appends.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidPosition`] if `position` names a removed
    /// node or another list's header. `value` is dropped in that case.
    #[inline]
    pub fn insert(
        &mut self,
        storage: &mut S,
        position: Position<K>,
        value: T,
    ) -> Result<Position<K>, ListError> {
        self.check_position(storage, position.key())?;
        Ok(Position::new(self.link_new(storage, position.key(), value)))
    }

    /// Removes the element at `position` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidPosition`] if `position` is `end()` or
    /// names a vacant slot.
    #[inline]
    pub fn erase(&mut self, storage: &mut S, position: Position<K>) -> Result<T, ListError> {
        self.check_element(storage, position.key())?;
        Ok(self.unlink_free(storage, position.key()))
    }

    /// Appends `value` and returns its position.
    #[inline]
    pub fn push_back(&mut self, storage: &mut S, value: T) -> Position<K> {
        Position::new(self.link_new(storage, self.header, value))
    }

    /// Prepends `value` and returns its position.
    #[inline]
    pub fn push_front(&mut self, storage: &mut S, value: T) -> Position<K> {
        let first = self.node(storage, self.header).next();
        Position::new(self.link_new(storage, first, value))
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn pop_front(&mut self, storage: &mut S) -> Result<T, ListError> {
        let first = self.node(storage, self.header).next();
        if self.node(storage, first).is_header() {
            return Err(ListError::EmptyContainer);
        }
        Ok(self.unlink_free(storage, first))
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn pop_back(&mut self, storage: &mut S) -> Result<T, ListError> {
        let last = self.node(storage, self.header).prev();
        if self.node(storage, last).is_header() {
            return Err(ListError::EmptyContainer);
        }
        Ok(self.unlink_free(storage, last))
    }

    /// Removes every element, keeping the header.
    ///
    /// If an element's destructor panics, the elements not yet freed stay
    /// allocated in storage but are no longer reachable from the list.
    pub fn clear(&mut self, storage: &mut S) {
        let mut key = self.node(storage, self.header).next();
        link::init(storage, self.header);
        self.len = 0;

        while key != self.header {
            let next = self.node(storage, key).next();
            storage.remove(key);
            key = next;
        }
    }

    /// Frees every element and the header, consuming the list.
    pub fn release(mut self, storage: &mut S) {
        self.clear(storage);
        storage.remove(self.header);
    }
}

// =============================================================================
// Relinking
// =============================================================================

impl<T, S, K: Key> List<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Reverses the order of the elements in place. O(n).
    ///
    /// Positions keep naming the same elements.
    #[inline]
    pub fn reverse(&mut self, storage: &mut S) {
        link::reverse(storage, self.header);
    }

    /// Exchanges the contents of two lists sharing `storage`. O(1).
    #[inline]
    pub fn swap(&mut self, storage: &mut S, other: &mut Self) {
        link::swap(storage, self.header, other.header);
        core::mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves `[first, last)` out of `other` and inserts it before
    /// `position` in this list.
    ///
    /// Linking is O(1); keeping both lengths exact costs one walk of the
    /// moved range. Positions in the range move with their elements.
    ///
    /// # Panics
    ///
    /// Panics if a key is not valid in storage, if the range runs through a
    /// list header or ends at one other than `other.end()`, if `position`
    /// lies inside the range or is its end, or if the range holds more
    /// elements than `other`. Nothing is relinked when it panics.
    pub fn splice(
        &mut self,
        storage: &mut S,
        position: Position<K>,
        other: &mut Self,
        first: Position<K>,
        last: Position<K>,
    ) {
        let (first, last, position) = (first.key(), last.key(), position.key());
        if first == last {
            return;
        }

        let end = storage.get(last).expect("invalid key");
        assert!(
            !end.is_header() || last == other.header,
            "splice range ends at another list's header"
        );
        assert!(position != last, "splice destination is the end of the range");

        let mut count = 0;
        let mut current = first;
        while current != last {
            let node = storage.get(current).expect("invalid key");
            assert!(!node.is_header(), "splice range runs through a list header");
            assert!(
                current != position,
                "splice destination lies inside the moved range"
            );
            count += 1;
            current = node.next();
        }
        let remaining = other
            .len
            .checked_sub(count)
            .expect("splice range is longer than the source list");

        link::transfer(storage, position, first, last);
        other.len = remaining;
        self.len += count;
    }

    /// Moves every element of `other` before `position`. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `position` is not valid in storage.
    #[inline]
    pub fn splice_all(&mut self, storage: &mut S, position: Position<K>, other: &mut Self) {
        if other.is_empty() {
            return;
        }
        let first = other.node(storage, other.header).next();
        link::transfer(storage, position.key(), first, other.header);
        self.len += other.len;
        other.len = 0;
    }

    /// Moves the single element at `node` out of `other` and inserts it
    /// before `position`. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidPosition`] if `node` is an end position
    /// or a vacant slot, if `position` is not a usable insert position, or
    /// if `position` is `node` itself or the node right after it.
    #[inline]
    pub fn splice_one(
        &mut self,
        storage: &mut S,
        position: Position<K>,
        other: &mut Self,
        node: Position<K>,
    ) -> Result<(), ListError> {
        other.check_element(storage, node.key())?;
        self.check_position(storage, position.key())?;
        let next = self.node(storage, node.key()).next();
        if position.key() == node.key() || position.key() == next {
            return Err(ListError::InvalidPosition);
        }
        link::transfer(storage, position.key(), node.key(), next);
        other.len -= 1;
        self.len += 1;
        Ok(())
    }

    /// Moves every element of `other` to the back of this list. O(1).
    #[inline]
    pub fn append(&mut self, storage: &mut S, other: &mut Self) {
        self.splice_all(storage, self.end(), other);
    }

    /// Relocates `[first, last)` of this list before `position`. O(1).
    ///
    /// Does nothing if the range is empty or already sits before `position`.
    ///
    /// # Panics
    ///
    /// Panics if a key is not valid in storage or names an unhooked node, or
    /// if `position == first`. In debug builds, also panics if `position`
    /// lies anywhere inside the range. Release builds do not walk the range
    /// to check that: the elements of the range from `position` on are cut
    /// out of the list and stay in storage unreachable, though iteration and
    /// removal remain sound.
    #[inline]
    pub fn move_range(
        &mut self,
        storage: &mut S,
        position: Position<K>,
        first: Position<K>,
        last: Position<K>,
    ) {
        link::transfer(storage, position.key(), first.key(), last.key());
    }
}

// =============================================================================
// Iteration and cursors
// =============================================================================

impl<T, S, K: Key> List<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Returns an iterator over references to the elements, front to back.
    #[inline]
    pub fn iter<'a>(&self, storage: &'a S) -> Iter<'a, T, S, K> {
        let header = self.node(storage, self.header);
        Iter {
            storage,
            front: header.next(),
            back: header.prev(),
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over mutable references to the elements.
    #[inline]
    pub fn iter_mut<'a>(&self, storage: &'a mut S) -> IterMut<'a, T, S, K> {
        let header = self.node(storage, self.header);
        let (front, back) = (header.next(), header.prev());
        IterMut {
            storage,
            front,
            back,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over the positions of the elements.
    #[inline]
    pub fn positions<'a>(&self, storage: &'a S) -> Positions<'a, T, S, K> {
        Positions {
            inner: self.iter(storage),
        }
    }

    /// Removes and yields every element, front to back.
    ///
    /// Elements not consumed are removed when the iterator is dropped.
    #[inline]
    pub fn drain<'a>(&'a mut self, storage: &'a mut S) -> Drain<'a, T, S, K> {
        Drain {
            list: self,
            storage,
        }
    }

    /// Returns a read-only cursor at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidPosition`] if `position` names a vacant
    /// slot.
    #[inline]
    pub fn cursor<'a>(
        &self,
        storage: &'a S,
        position: Position<K>,
    ) -> Result<Cursor<'a, T, S, K>, ListError> {
        self.check_position(storage, position.key())?;
        Ok(Cursor::new(storage, self.header, position.key()))
    }

    /// Returns a read-only cursor at the first element (or `end()`).
    #[inline]
    pub fn cursor_front<'a>(&self, storage: &'a S) -> Cursor<'a, T, S, K> {
        let first = self.node(storage, self.header).next();
        Cursor::new(storage, self.header, first)
    }

    /// Returns a read-only cursor at the last element (or `end()`).
    #[inline]
    pub fn cursor_back<'a>(&self, storage: &'a S) -> Cursor<'a, T, S, K> {
        let last = self.node(storage, self.header).prev();
        Cursor::new(storage, self.header, last)
    }

    /// Returns a mutable cursor at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidPosition`] if `position` names a vacant
    /// slot.
    #[inline]
    pub fn cursor_mut<'a>(
        &'a mut self,
        storage: &'a mut S,
        position: Position<K>,
    ) -> Result<CursorMut<'a, T, S, K>, ListError> {
        self.check_position(storage, position.key())?;
        Ok(CursorMut::new(self, storage, position.key()))
    }

    /// Returns a mutable cursor at the first element (or `end()`).
    #[inline]
    pub fn cursor_front_mut<'a>(&'a mut self, storage: &'a mut S) -> CursorMut<'a, T, S, K> {
        let first = self.node(storage, self.header).next();
        CursorMut::new(self, storage, first)
    }

    /// Returns a mutable cursor at the last element (or `end()`).
    #[inline]
    pub fn cursor_back_mut<'a>(&'a mut self, storage: &'a mut S) -> CursorMut<'a, T, S, K> {
        let last = self.node(storage, self.header).prev();
        CursorMut::new(self, storage, last)
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T, S, K: Key = u32> {
    storage: &'a S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<T, S, K: Key> Iter<'_, T, S, K> {
    // The walk ends where front and back meet, whatever `remaining` says, so
    // no node is yielded twice even if the length is off.
    #[inline]
    fn advance_front(&mut self, next: K) {
        if self.front == self.back {
            self.remaining = 0;
        } else {
            self.front = next;
            self.remaining = self.remaining.saturating_sub(1);
        }
    }

    #[inline]
    fn advance_back(&mut self, prev: K) {
        if self.front == self.back {
            self.remaining = 0;
        } else {
            self.back = prev;
            self.remaining = self.remaining.saturating_sub(1);
        }
    }

    // Reached a header: the ring is shorter than the list's count.
    #[inline]
    fn finish<R>(&mut self) -> Option<R> {
        self.remaining = 0;
        None
    }
}

impl<'a, T: 'a, S, K: Key> Iterator for Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let storage = self.storage;
        // Safety: `remaining > 0` means front is a node of the ring
        let node = unsafe { storage.get_unchecked(self.front) };
        self.advance_front(node.next());
        node.value().or_else(|| self.finish())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Key> DoubleEndedIterator for Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let storage = self.storage;
        // Safety: `remaining > 0` means back is a node of the ring
        let node = unsafe { storage.get_unchecked(self.back) };
        self.advance_back(node.prev());
        node.value().or_else(|| self.finish())
    }
}

impl<'a, T: 'a, S, K: Key> ExactSizeIterator for Iter<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<'a, T: 'a, S, K: Key> FusedIterator for Iter<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<T, S, K: Key> Clone for Iter<'_, T, S, K> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

/// Iterator over mutable references to list elements.
pub struct IterMut<'a, T, S, K: Key = u32> {
    storage: &'a mut S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<T, S, K: Key> IterMut<'_, T, S, K> {
    #[inline]
    fn advance_front(&mut self, next: K) {
        if self.front == self.back {
            self.remaining = 0;
        } else {
            self.front = next;
            self.remaining = self.remaining.saturating_sub(1);
        }
    }

    #[inline]
    fn advance_back(&mut self, prev: K) {
        if self.front == self.back {
            self.remaining = 0;
        } else {
            self.back = prev;
            self.remaining = self.remaining.saturating_sub(1);
        }
    }

    #[inline]
    fn finish<R>(&mut self) -> Option<R> {
        self.remaining = 0;
        None
    }
}

impl<'a, T: 'a, S, K: Key> Iterator for IterMut<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: `remaining > 0` means front is a node of the ring
        let node = unsafe { self.storage.get_unchecked_mut(self.front) };
        let next = node.next();
        let value = node.value_mut().map(|value| value as *mut T);
        self.advance_front(next);

        match value {
            // Extend lifetime - safe because front and back stop where they
            // meet, so each node is visited once
            Some(value) => Some(unsafe { &mut *value }),
            None => self.finish(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Key> DoubleEndedIterator for IterMut<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: `remaining > 0` means back is a node of the ring
        let node = unsafe { self.storage.get_unchecked_mut(self.back) };
        let prev = node.prev();
        let value = node.value_mut().map(|value| value as *mut T);
        self.advance_back(prev);

        match value {
            // Extend lifetime - see `next`
            Some(value) => Some(unsafe { &mut *value }),
            None => self.finish(),
        }
    }
}

impl<'a, T: 'a, S, K: Key> ExactSizeIterator for IterMut<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<'a, T: 'a, S, K: Key> FusedIterator for IterMut<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

/// Iterator over the positions of list elements.
pub struct Positions<'a, T, S, K: Key = u32> {
    inner: Iter<'a, T, S, K>,
}

impl<'a, T: 'a, S, K: Key> Iterator for Positions<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = Position<K>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.inner.front;
        self.inner.next().map(|_| Position::new(key))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T: 'a, S, K: Key> DoubleEndedIterator for Positions<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.inner.back;
        self.inner.next_back().map(|_| Position::new(key))
    }
}

impl<'a, T: 'a, S, K: Key> ExactSizeIterator for Positions<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

/// Iterator that removes and returns elements from a list.
pub struct Drain<'a, T, S, K: Key = u32>
where
    S: Storage<Node<T, K>, Key = K>,
{
    list: &'a mut List<T, S, K>,
    storage: &'a mut S,
}

impl<T, S, K: Key> Iterator for Drain<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front(self.storage).ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, S, K: Key> DoubleEndedIterator for Drain<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back(self.storage).ok()
    }
}

impl<T, S, K: Key> ExactSizeIterator for Drain<'_, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<T, S, K: Key> Drop for Drain<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn drop(&mut self) {
        // Exhaust remaining elements to ensure cleanup
        for _ in self.by_ref() {}
    }
}



#[cfg(test)]
mod bench_arena_storage {
    use super::*;
    use hdrhistogram::Histogram;

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;

    fn setup() -> (ListArena<u64>, List<u64, ListArena<u64>>) {
        let mut storage = ListArena::with_capacity(ITERATIONS + WARMUP + 1);
        let list = List::new(&mut storage);
        (storage, list)
    }

    #[test]
    #[ignore]
    fn bench_list_push_back() {
        let (mut storage, mut list) = setup();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            list.push_back(&mut storage, i as u64);
            let _ = list.pop_back(&mut storage);
        }

        for i in 0..ITERATIONS {
            let start = rdtscp();
            list.push_back(&mut storage, i as u64);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            let _ = list.pop_back(&mut storage);
        }

        print_histogram("push_back", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_pop_front() {
        let (mut storage, mut list) = setup();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            list.push_back(&mut storage, i as u64);
            let _ = list.pop_front(&mut storage);
        }

        for i in 0..ITERATIONS {
            list.push_back(&mut storage, i as u64);
            let start = rdtscp();
            let _ = list.pop_front(&mut storage);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("pop_front", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_erase_middle() {
        let (mut storage, mut list) = setup();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..100 {
            list.push_back(&mut storage, i);
        }

        for i in 0..WARMUP {
            let pos = list.push_back(&mut storage, i as u64);
            let front = list.begin(&storage);
            list.move_range(&mut storage, front, pos, list.end());
            let _ = list.erase(&mut storage, pos);
        }

        for i in 0..ITERATIONS {
            let pos = list.push_back(&mut storage, i as u64);
            // park it mid-list
            let mid = list.positions(&storage).nth(50).unwrap();
            list.move_range(&mut storage, mid, pos, list.end());
            let start = rdtscp();
            let _ = list.erase(&mut storage, pos);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("erase (middle)", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_splice_all() {
        let (mut storage, mut a) = setup();
        let mut b = List::new(&mut storage);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..1_000 {
            a.push_back(&mut storage, i);
        }

        for _ in 0..WARMUP {
            b.append(&mut storage, &mut a);
            a.append(&mut storage, &mut b);
        }

        for _ in 0..ITERATIONS {
            let start = rdtscp();
            b.append(&mut storage, &mut a);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            a.append(&mut storage, &mut b);
        }

        print_histogram("splice_all (1000)", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_swap() {
        let (mut storage, mut a) = setup();
        let mut b = List::new(&mut storage);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..64 {
            a.push_back(&mut storage, i);
            b.push_back(&mut storage, i);
        }

        for _ in 0..WARMUP {
            a.swap(&mut storage, &mut b);
        }

        for _ in 0..ITERATIONS {
            let start = rdtscp();
            a.swap(&mut storage, &mut b);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("swap", &hist);
    }
}
