//! Positions and cursors.
//!
//! A [`Position`] is a plain copyable handle naming one node of a ring. It
//! borrows nothing, so it can be stored alongside the list and used later to
//! erase or insert in O(1). It stays valid until the node it names is
//! removed, and survives every other insertion, removal, splice, and
//! reverse. Once removed, the slot may be handed out again, so a stale
//! position is not guaranteed to be rejected.
//!
//! Cursors are borrowing views that walk the ring. Moving past the last
//! element lands on the end position (the header), where `current()` is
//! `None`; moving once more wraps to the first element.

use core::marker::PhantomData;

use crate::{Key, Linked, List, Node, Storage};

// =============================================================================
// Position
// =============================================================================

/// Handle to a node of a list: an element, or the end position.
///
/// Equality and hashing are by node identity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position<K: Key = u32> {
    key: K,
}

impl<K: Key> Position<K> {
    #[inline]
    pub(crate) const fn new(key: K) -> Self {
        Self { key }
    }

    /// Returns the storage key of the node.
    #[inline]
    pub const fn key(self) -> K {
        self.key
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A read-only cursor over a list.
///
/// Cheap to copy. Two cursors compare equal when they sit on the same node.
///
/// # Example
///
/// ```
/// use nexus_ring::OwnedList;
///
/// let list: OwnedList<u32> = OwnedList::from([1, 2, 3]);
/// let mut cursor = list.cursor_front();
///
/// assert_eq!(cursor.current(), Some(&1));
/// assert_eq!(cursor.peek_prev(), None); // header
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor.current(), Some(&3));
/// cursor.move_next();
/// assert!(cursor.is_end());
/// ```
pub struct Cursor<'a, T, S, K: Key = u32>
where
    S: Storage<Node<T, K>, Key = K>,
{
    storage: &'a S,
    header: K,
    current: K,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, S, K: Key> Cursor<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    pub(crate) fn new(storage: &'a S, header: K, current: K) -> Self {
        Self {
            storage,
            header,
            current,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn node(&self, key: K) -> &'a Node<T, K> {
        // Safety: cursors only ever hold keys of nodes in a live ring
        unsafe { self.storage.get_unchecked(key) }
    }

    /// Returns the element under the cursor, or `None` at the end position.
    #[inline]
    pub fn current(&self) -> Option<&'a T> {
        self.node(self.current).value()
    }

    /// Returns the element after the cursor without moving.
    #[inline]
    pub fn peek_next(&self) -> Option<&'a T> {
        let next = self.node(self.current).next();
        self.node(next).value()
    }

    /// Returns the element before the cursor without moving.
    #[inline]
    pub fn peek_prev(&self) -> Option<&'a T> {
        let prev = self.node(self.current).prev();
        self.node(prev).value()
    }

    /// Advances to the next node, wrapping through the end position.
    #[inline]
    pub fn move_next(&mut self) {
        self.current = self.node(self.current).next();
    }

    /// Steps back to the previous node, wrapping through the end position.
    #[inline]
    pub fn move_prev(&mut self) {
        self.current = self.node(self.current).prev();
    }

    /// Returns the position under the cursor.
    #[inline]
    pub fn position(&self) -> Position<K> {
        Position::new(self.current)
    }

    /// Returns `true` if the cursor sits on the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current == self.header
    }
}

impl<T, S, K: Key> Clone for Cursor<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S, K: Key> Copy for Cursor<'_, T, S, K> where S: Storage<Node<T, K>, Key = K> {}

impl<T, S, K: Key> PartialEq for Cursor<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<T, S, K: Key> Eq for Cursor<'_, T, S, K> where S: Storage<Node<T, K>, Key = K> {}

impl<T, S, K: Key> core::fmt::Debug for Cursor<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.current)
            .field("header", &self.header)
            .finish()
    }
}

// =============================================================================
// CursorMut
// =============================================================================

/// A cursor with mutable access, insertion, and removal.
///
/// Useful when walking a queue, modifying elements in place and dropping
/// the ones that are done.
///
/// # Example
///
/// ```
/// use nexus_ring::OwnedList;
///
/// #[derive(Debug, PartialEq)]
/// struct Order { qty: u64 }
///
/// let mut queue: OwnedList<Order> = OwnedList::new();
/// queue.push_back(Order { qty: 100 });
/// queue.push_back(Order { qty: 50 });
///
/// let mut incoming = 120u64;
/// let mut cursor = queue.cursor_front_mut();
///
/// while let Some(resting) = cursor.current_mut() {
///     let fill = incoming.min(resting.qty);
///     resting.qty -= fill;
///     incoming -= fill;
///
///     if resting.qty == 0 {
///         cursor.remove_current(); // removes and advances
///     } else {
///         cursor.move_next();
///     }
///
///     if incoming == 0 {
///         break;
///     }
/// }
///
/// assert_eq!(queue.front(), Ok(&Order { qty: 30 }));
/// ```
pub struct CursorMut<'a, T, S, K: Key = u32>
where
    S: Storage<Node<T, K>, Key = K>,
{
    list: &'a mut List<T, S, K>,
    storage: &'a mut S,
    current: K,
}

impl<'a, T, S, K: Key> CursorMut<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    pub(crate) fn new(list: &'a mut List<T, S, K>, storage: &'a mut S, current: K) -> Self {
        Self {
            list,
            storage,
            current,
        }
    }

    #[inline]
    fn node(&self, key: K) -> &Node<T, K> {
        // Safety: cursors only ever hold keys of nodes in a live ring
        unsafe { self.storage.get_unchecked(key) }
    }

    /// Returns the element under the cursor, or `None` at the end position.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        self.node(self.current).value()
    }

    /// Returns the element under the cursor mutably.
    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut T> {
        // Safety: see `node`
        unsafe { self.storage.get_unchecked_mut(self.current) }.value_mut()
    }

    /// Returns the element after the cursor without moving.
    #[inline]
    pub fn peek_next(&self) -> Option<&T> {
        let next = self.node(self.current).next();
        self.node(next).value()
    }

    /// Returns the element before the cursor without moving.
    #[inline]
    pub fn peek_prev(&self) -> Option<&T> {
        let prev = self.node(self.current).prev();
        self.node(prev).value()
    }

    /// Advances to the next node, wrapping through the end position.
    #[inline]
    pub fn move_next(&mut self) {
        self.current = self.node(self.current).next();
    }

    /// Steps back to the previous node, wrapping through the end position.
    #[inline]
    pub fn move_prev(&mut self) {
        self.current = self.node(self.current).prev();
    }

    /// Returns the position under the cursor.
    #[inline]
    pub fn position(&self) -> Position<K> {
        Position::new(self.current)
    }

    /// Returns `true` if the cursor sits on the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current == self.list.header
    }

    /// Inserts `value` before the cursor. The cursor does not move.
    ///
    /// At the end position this appends to the list.
    #[inline]
    pub fn insert_before(&mut self, value: T) -> Position<K> {
        Position::new(self.list.link_new(self.storage, self.current, value))
    }

    /// Inserts `value` after the cursor. The cursor does not move.
    ///
    /// At the end position this prepends to the list.
    #[inline]
    pub fn insert_after(&mut self, value: T) -> Position<K> {
        let next = self.node(self.current).next();
        Position::new(self.list.link_new(self.storage, next, value))
    }

    /// Removes the element under the cursor and advances to the next node.
    ///
    /// Returns `None` (and does nothing) at the end position.
    #[inline]
    pub fn remove_current(&mut self) -> Option<T> {
        if self.is_end() {
            return None;
        }

        let key = self.current;
        self.current = self.node(key).next();
        Some(self.list.unlink_free(self.storage, key))
    }

    /// Returns a read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, T, S, K> {
        Cursor::new(&*self.storage, self.list.header, self.current)
    }
}

impl<'a, T, S, K: Key> From<CursorMut<'a, T, S, K>> for Cursor<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn from(cursor: CursorMut<'a, T, S, K>) -> Self {
        let CursorMut {
            list,
            storage,
            current,
        } = cursor;
        Cursor::new(storage, list.header, current)
    }
}

impl<T, S, K: Key> core::fmt::Debug for CursorMut<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CursorMut")
            .field("current", &self.current)
            .field("len", &self.list.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{List, ListArena, Position};

    fn list_of(storage: &mut ListArena<u32>, values: &[u32]) -> List<u32, ListArena<u32>> {
        let mut list = List::new(storage);
        for &v in values {
            list.push_back(storage, v);
        }
        list
    }

    #[test]
    fn cursor_walks_and_wraps() {
        let mut storage = ListArena::new();
        let list = list_of(&mut storage, &[1, 2]);

        let mut cursor = list.cursor_front(&storage);
        assert_eq!(cursor.current(), Some(&1));
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&2));
        cursor.move_next();
        assert!(cursor.is_end());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.position(), list.end());
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&1));
        cursor.move_prev();
        cursor.move_prev();
        assert_eq!(cursor.current(), Some(&2));
    }

    #[test]
    fn cursor_peeks() {
        let mut storage = ListArena::new();
        let list = list_of(&mut storage, &[1, 2, 3]);

        let mut cursor = list.cursor_front(&storage);
        cursor.move_next();
        assert_eq!(cursor.peek_prev(), Some(&1));
        assert_eq!(cursor.peek_next(), Some(&3));

        let back = list.cursor_back(&storage);
        assert_eq!(back.current(), Some(&3));
        assert_eq!(back.peek_next(), None);
    }

    #[test]
    fn cursor_on_empty_list() {
        let mut storage = ListArena::<u32>::new();
        let list = List::new(&mut storage);

        let cursor = list.cursor_front(&storage);
        assert!(cursor.is_end());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.peek_next(), None);
        assert_eq!(cursor.peek_prev(), None);
    }

    #[test]
    fn cursor_copies_compare_by_position() {
        let mut storage = ListArena::new();
        let list = list_of(&mut storage, &[1, 2]);

        let a = list.cursor_front(&storage);
        let mut b = a;
        assert_eq!(a, b);
        b.move_next();
        assert_ne!(a, b);
        b.move_prev();
        assert_eq!(a, b);
    }

    #[test]
    fn cursor_at_position() {
        let mut storage = ListArena::new();
        let mut list = list_of(&mut storage, &[1, 3]);
        let two = list.insert(&mut storage, list.end(), 2).unwrap();

        let cursor = list.cursor(&storage, two).unwrap();
        assert_eq!(cursor.current(), Some(&2));
        assert_eq!(cursor.peek_prev(), Some(&3));

        list.erase(&mut storage, two).unwrap();
        assert!(list.cursor(&storage, two).is_err());
    }

    #[test]
    fn cursor_mut_edits_in_place() {
        let mut storage = ListArena::new();
        let mut list = list_of(&mut storage, &[1, 2, 3]);

        let mut cursor = list.cursor_front_mut(&mut storage);
        while let Some(v) = cursor.current_mut() {
            *v *= 10;
            cursor.move_next();
        }

        assert_eq!(list.iter(&storage).copied().collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn cursor_mut_insert_around() {
        let mut storage = ListArena::new();
        let mut list = list_of(&mut storage, &[2]);

        let mut cursor = list.cursor_front_mut(&mut storage);
        cursor.insert_before(1);
        cursor.insert_after(3);
        assert_eq!(cursor.current(), Some(&2));
        assert_eq!(cursor.peek_prev(), Some(&1));
        assert_eq!(cursor.peek_next(), Some(&3));

        // end position: before appends, after prepends
        cursor.move_next();
        cursor.move_next();
        assert!(cursor.is_end());
        cursor.insert_before(4);
        cursor.insert_after(0);

        assert_eq!(list.len(), 5);
        assert_eq!(list.iter(&storage).copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn cursor_mut_remove_advances() {
        let mut storage = ListArena::new();
        let mut list = list_of(&mut storage, &[1, 2, 3, 4]);

        let mut cursor = list.cursor_front_mut(&mut storage);
        while !cursor.is_end() {
            if cursor.current().is_some_and(|v| v % 2 == 0) {
                cursor.remove_current();
            } else {
                cursor.move_next();
            }
        }
        assert_eq!(cursor.remove_current(), None);

        assert_eq!(list.len(), 2);
        assert_eq!(list.iter(&storage).copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn cursor_mut_converts_to_cursor() {
        let mut storage = ListArena::new();
        let mut list = list_of(&mut storage, &[1, 2]);
        let end: Position = list.end();

        let mut cursor = list.cursor_back_mut(&mut storage);
        assert_eq!(cursor.as_cursor().current(), Some(&2));
        cursor.move_next();

        let cursor: crate::Cursor<'_, _, _> = cursor.into();
        assert_eq!(cursor.position(), end);
        assert_eq!(cursor.peek_prev(), Some(&2));
    }
}
