//! OwnedList - a ring list that owns its storage.

use core::fmt;
use core::iter::FusedIterator;
use core::mem;

use crate::{
    Cursor, CursorMut, Drain, Iter, IterMut, Key, List, ListArena, ListError, Node, Position,
    Positions, Storage,
};

/// A circular doubly-linked list that owns its storage.
///
/// This is a convenience wrapper around [`List`] + [`ListArena`] for cases
/// where you don't need to share storage across multiple lists. Dropping
/// it frees every element node and the header.
///
/// The list can be moved freely: nodes are addressed by key, never by
/// address. There is no `Clone`; build a copy explicitly with
/// `list.iter().cloned().collect()`.
///
/// # Example
///
/// ```
/// use nexus_ring::{ListError, OwnedList};
///
/// let mut list: OwnedList<u64> = OwnedList::new();
///
/// list.push_back(1);
/// let b = list.push_back(2);
/// list.push_front(0);
/// assert_eq!(list, OwnedList::from([0, 1, 2]));
///
/// // Remove from middle
/// assert_eq!(list.erase(b), Ok(2));
/// assert_eq!(list.len(), 2);
///
/// assert_eq!(list.pop_back(), Ok(1));
/// assert_eq!(list.pop_back(), Ok(0));
/// assert_eq!(list.pop_back(), Err(ListError::EmptyContainer));
/// ```
pub struct OwnedList<T, K: Key = u32, S = ListArena<T, K>>
where
    S: Storage<Node<T, K>, Key = K>,
{
    storage: S,
    list: List<T, S, K>,
}

impl<T, K: Key, S> OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K> + Default,
{
    /// Creates an empty list with default storage.
    pub fn new() -> Self {
        Self::with_storage(S::default())
    }
}

impl<T, K: Key> OwnedList<T, K, ListArena<T, K>> {
    /// Creates an empty list with room for `capacity` elements before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(ListArena::with_capacity(capacity.saturating_add(1)))
    }

    /// Returns how many elements fit without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        // one slot is the header
        self.storage.capacity().saturating_sub(1)
    }
}

impl<T, K: Key, S> OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Creates an empty list inside `storage`.
    ///
    /// The storage should be dedicated to this list; the list takes it over
    /// and frees only the nodes it allocated.
    pub fn with_storage(mut storage: S) -> Self {
        let list = List::new(&mut storage);
        Self { storage, list }
    }

    /// Returns the backing storage.
    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin() == self.end()
    }

    /// Returns the position of the first element, or `end()` if empty.
    #[inline]
    pub fn begin(&self) -> Position<K> {
        self.list.begin(&self.storage)
    }

    /// Returns the end position: one past the last element.
    #[inline]
    pub fn end(&self) -> Position<K> {
        self.list.end()
    }

    /// Returns the position following `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` names a vacant slot.
    #[inline]
    pub fn next(&self, position: Position<K>) -> Position<K> {
        self.list.next(&self.storage, position)
    }

    /// Returns the position preceding `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` names a vacant slot.
    #[inline]
    pub fn prev(&self, position: Position<K>) -> Position<K> {
        self.list.prev(&self.storage, position)
    }

    /// Returns the element at `position`.
    #[inline]
    pub fn get(&self, position: Position<K>) -> Option<&T> {
        self.list.get(&self.storage, position)
    }

    /// Returns the element at `position` mutably.
    #[inline]
    pub fn get_mut(&mut self, position: Position<K>) -> Option<&mut T> {
        self.list.get_mut(&mut self.storage, position)
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, ListError> {
        self.list.front(&self.storage)
    }

    /// Returns the first element mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        self.list.front_mut(&mut self.storage)
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back(&self) -> Result<&T, ListError> {
        self.list.back(&self.storage)
    }

    /// Returns the last element mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T, ListError> {
        self.list.back_mut(&mut self.storage)
    }

    /// Appends `value` and returns its position.
    #[inline]
    pub fn push_back(&mut self, value: T) -> Position<K> {
        self.list.push_back(&mut self.storage, value)
    }

    /// Prepends `value` and returns its position.
    #[inline]
    pub fn push_front(&mut self, value: T) -> Position<K> {
        self.list.push_front(&mut self.storage, value)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        self.list.pop_front(&mut self.storage)
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T, ListError> {
        self.list.pop_back(&mut self.storage)
    }

    /// Inserts `value` before `position` and returns the new position.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidPosition`] if `position` names a vacant
    /// slot.
    #[inline]
    pub fn insert(&mut self, position: Position<K>, value: T) -> Result<Position<K>, ListError> {
        self.list.insert(&mut self.storage, position, value)
    }

    /// Removes the element at `position` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidPosition`] if `position` is `end()` or
    /// names a vacant slot.
    #[inline]
    pub fn erase(&mut self, position: Position<K>) -> Result<T, ListError> {
        self.list.erase(&mut self.storage, position)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.list.clear(&mut self.storage);
    }

    /// Reverses the order of the elements in place.
    #[inline]
    pub fn reverse(&mut self) {
        self.list.reverse(&mut self.storage);
    }

    /// Exchanges the contents of two lists. O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Relocates `[first, last)` before `position`. O(1).
    ///
    /// # Panics
    ///
    /// Panics if a position names a vacant slot or an unhooked node, or if
    /// `position == first`. In debug builds, also panics if `position` lies
    /// anywhere inside the range; see [`List::move_range`](crate::List::move_range).
    #[inline]
    pub fn move_range(&mut self, position: Position<K>, first: Position<K>, last: Position<K>) {
        self.list.move_range(&mut self.storage, position, first, last);
    }

    /// Returns `true` if the list contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Keeps only the elements for which `f` returns `true`, in order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.cursor_front_mut();
        while !cursor.is_end() {
            if cursor.current().is_some_and(&mut f) {
                cursor.move_next();
            } else {
                cursor.remove_current();
            }
        }
    }

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S, K> {
        self.list.iter(&self.storage)
    }

    /// Returns an iterator over mutable references to elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, S, K> {
        self.list.iter_mut(&mut self.storage)
    }

    /// Returns an iterator over element positions, front to back.
    #[inline]
    pub fn positions(&self) -> Positions<'_, T, S, K> {
        self.list.positions(&self.storage)
    }

    /// Removes and yields every element, front to back.
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, T, S, K> {
        self.list.drain(&mut self.storage)
    }

    /// Returns a read-only cursor at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidPosition`] if `position` names a vacant
    /// slot.
    #[inline]
    pub fn cursor(&self, position: Position<K>) -> Result<Cursor<'_, T, S, K>, ListError> {
        self.list.cursor(&self.storage, position)
    }

    /// Returns a read-only cursor at the first element (or `end()`).
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, T, S, K> {
        self.list.cursor_front(&self.storage)
    }

    /// Returns a read-only cursor at the last element (or `end()`).
    #[inline]
    pub fn cursor_back(&self) -> Cursor<'_, T, S, K> {
        self.list.cursor_back(&self.storage)
    }

    /// Returns a mutable cursor at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidPosition`] if `position` names a vacant
    /// slot.
    #[inline]
    pub fn cursor_mut(&mut self, position: Position<K>) -> Result<CursorMut<'_, T, S, K>, ListError> {
        self.list.cursor_mut(&mut self.storage, position)
    }

    /// Returns a mutable cursor at the first element (or `end()`).
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, S, K> {
        self.list.cursor_front_mut(&mut self.storage)
    }

    /// Returns a mutable cursor at the last element (or `end()`).
    #[inline]
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, S, K> {
        self.list.cursor_back_mut(&mut self.storage)
    }

    /// Frees every element node, then the header.
    fn release_nodes(&mut self) {
        while self.list.pop_front(&mut self.storage).is_ok() {}
        self.storage.remove(self.list.header);
    }
}

impl<T, K: Key, S> Drop for OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn drop(&mut self) {
        struct DropGuard<'a, T, K: Key, S: Storage<Node<T, K>, Key = K>>(
            &'a mut OwnedList<T, K, S>,
        );

        impl<T, K: Key, S: Storage<Node<T, K>, Key = K>> Drop for DropGuard<'_, T, K, S> {
            fn drop(&mut self) {
                // Only runs when an element destructor panicked. Keep freeing
                // the rest; a second panic aborts.
                self.0.release_nodes();
            }
        }

        let guard = DropGuard(self);
        guard.0.release_nodes();
        mem::forget(guard);
    }
}

impl<T, K: Key, S> Default for OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, K: Key, S> fmt::Debug for OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, K: Key, S> PartialEq for OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, K: Key, S> Eq for OwnedList<T, K, S> where S: Storage<Node<T, K>, Key = K> {}

impl<T, K: Key, S> Extend<T> for OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, K: Key, S> Extend<&'a T> for OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, K: Key, S> FromIterator<T> for OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, K: Key, S, const N: usize> From<[T; N]> for OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K> + Default,
{
    fn from(values: [T; N]) -> Self {
        Self::from_iter(values)
    }
}

impl<'a, T, K: Key, S> IntoIterator for &'a OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, K: Key, S> IntoIterator for &'a mut OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, K: Key, S> IntoIterator for OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = T;
    type IntoIter = IntoIter<T, K, S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

/// Owning iterator over the elements of an [`OwnedList`].
pub struct IntoIter<T, K: Key = u32, S = ListArena<T, K>>
where
    S: Storage<Node<T, K>, Key = K>,
{
    list: OwnedList<T, K, S>,
}

impl<T, K: Key, S> Iterator for IntoIter<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, K: Key, S> DoubleEndedIterator for IntoIter<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T, K: Key, S> ExactSizeIterator for IntoIter<T, K, S> where S: Storage<Node<T, K>, Key = K> {}

impl<T, K: Key, S> FusedIterator for IntoIter<T, K, S> where S: Storage<Node<T, K>, Key = K> {}

impl<T: fmt::Debug, K: Key, S> fmt::Debug for IntoIter<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;

    #[derive(Debug)]
    struct Tracked {
        id: u32,
        drops: Rc<Cell<usize>>,
        panics: bool,
    }

    impl Tracked {
        fn new(id: u32, drops: &Rc<Cell<usize>>) -> Self {
            Self {
                id,
                drops: Rc::clone(drops),
                panics: false,
            }
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
            if self.panics {
                panic!("element {} refused to drop", self.id);
            }
        }
    }

    #[test]
    fn new_is_empty() {
        let list: OwnedList<u64> = OwnedList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), Err(ListError::EmptyContainer));
        assert_eq!(list.back(), Err(ListError::EmptyContainer));
    }

    #[test]
    fn push_back_pop_front() {
        let mut list: OwnedList<u64> = OwnedList::with_capacity(16);

        list.push_back(1);
        list.push_back(2);
        list.push_back(3);

        assert_eq!(list.len(), 3);

        assert_eq!(list.pop_front(), Ok(1));
        assert_eq!(list.pop_front(), Ok(2));
        assert_eq!(list.pop_front(), Ok(3));
        assert_eq!(list.pop_front(), Err(ListError::EmptyContainer));
    }

    #[test]
    fn push_front_pop_back() {
        let mut list: OwnedList<u64> = OwnedList::new();

        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(list.pop_back(), Ok(1));
        assert_eq!(list.pop_back(), Ok(2));
        assert_eq!(list.pop_back(), Ok(3));
        assert_eq!(list.pop_back(), Err(ListError::EmptyContainer));
    }

    #[test]
    fn erase_by_position() {
        let mut list: OwnedList<u64> = OwnedList::new();

        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert_eq!(list.erase(b), Ok(2));
        assert_eq!(list.len(), 2);

        // a and c still accessible
        assert_eq!(list.get(a), Some(&1));
        assert_eq!(list.get(c), Some(&3));

        // b is gone
        assert_eq!(list.get(b), None);
        assert_eq!(list.erase(b), Err(ListError::InvalidPosition));
        assert_eq!(list.erase(list.end()), Err(ListError::InvalidPosition));
    }

    #[test]
    fn insert_at_positions() {
        let mut list: OwnedList<u64> = OwnedList::new();

        let one = list.push_back(1);
        list.push_back(3);

        let three = list.next(one);
        list.insert(three, 2).unwrap();
        list.insert(list.begin(), 0).unwrap();

        assert_eq!(list, OwnedList::from([0, 1, 2, 3]));
        assert_eq!(list.prev(list.end()), list.positions().next_back().unwrap());
    }

    #[test]
    fn front_mut_and_back_mut() {
        let mut list: OwnedList<u64> = OwnedList::from([1, 2]);

        *list.front_mut().unwrap() = 10;
        *list.back_mut().unwrap() = 20;

        assert_eq!(list.front(), Ok(&10));
        assert_eq!(list.back(), Ok(&20));
    }

    #[test]
    fn clear_then_reuse() {
        let mut list: OwnedList<u64> = OwnedList::from([1, 2, 3]);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.storage().len(), 1);

        list.push_back(4);
        assert_eq!(list, OwnedList::from([4]));
    }

    #[test]
    fn reverse_restores_after_two() {
        let mut list: OwnedList<u64> = OwnedList::from([1, 2, 3]);

        list.reverse();
        assert_eq!(list, OwnedList::from([3, 2, 1]));
        assert_eq!((list.front(), list.back()), (Ok(&3), Ok(&1)));

        list.reverse();
        assert_eq!(list, OwnedList::from([1, 2, 3]));
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a: OwnedList<u64> = OwnedList::from([1, 2, 3]);
        let mut b: OwnedList<u64> = OwnedList::new();
        let pos = a.begin();

        a.swap(&mut b);
        assert!(a.is_empty());
        assert_eq!(b.len(), 3);
        // positions travel with the storage
        assert_eq!(b.get(pos), Some(&1));

        a.swap(&mut b);
        assert_eq!(a, OwnedList::from([1, 2, 3]));
        assert!(b.is_empty());
    }

    #[test]
    #[should_panic(expected = "transfer destination lies inside the moved range")]
    fn move_range_before_own_first_panics() {
        let mut list: OwnedList<u64> = OwnedList::from([1, 2, 3]);
        let first = list.begin();
        let second = list.next(first);

        list.move_range(first, first, second);
    }

    #[test]
    fn rejected_move_range_keeps_order() {
        let mut list: OwnedList<u64> = OwnedList::from([1, 2, 3]);
        let first = list.begin();
        let second = list.next(first);

        let result = catch_unwind(AssertUnwindSafe(|| {
            list.move_range(first, first, second);
        }));

        assert!(result.is_err());
        assert_eq!(list, OwnedList::from([1, 2, 3]));
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn with_capacity_saturates_before_allocating() {
        let _list: OwnedList<u64> = OwnedList::with_capacity(usize::MAX);
    }

    #[test]
    fn move_range_rotates() {
        let mut list: OwnedList<u64> = OwnedList::from([1, 2, 3, 4]);
        let three = list.next(list.next(list.begin()));

        list.move_range(list.begin(), three, list.end());

        assert_eq!(list, OwnedList::from([3, 4, 1, 2]));
    }

    #[test]
    fn contains_and_retain() {
        let mut list: OwnedList<u64> = (1..=10).collect();

        assert!(list.contains(&7));
        list.retain(|v| v % 3 == 0);

        assert!(!list.contains(&7));
        assert_eq!(list, OwnedList::from([3, 6, 9]));
        assert_eq!(list.storage().len(), 4);
    }

    #[test]
    fn iterators() {
        let mut list: OwnedList<u64> = OwnedList::from([1, 2, 3]);

        for v in &mut list {
            *v *= 10;
        }
        let sum: u64 = (&list).into_iter().sum();
        assert_eq!(sum, 60);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![30, 20, 10]);

        let drained: Vec<_> = list.drain().collect();
        assert_eq!(drained, vec![10, 20, 30]);
        assert!(list.is_empty());
    }

    #[test]
    fn into_iter_both_ends() {
        let list: OwnedList<u64> = OwnedList::from([1, 2, 3, 4]);
        let mut iter = list.into_iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn extend_and_debug() {
        let mut list: OwnedList<u64> = OwnedList::new();
        list.extend([1, 2]);
        list.extend(&[3, 4]);

        assert_eq!(format!("{list:?}"), "[1, 2, 3, 4]");
    }

    #[test]
    fn capacity_excludes_header() {
        let list: OwnedList<u64> = OwnedList::with_capacity(8);
        assert!(list.capacity() >= 8);
    }

    #[test]
    fn cursors() {
        let mut list: OwnedList<u64> = OwnedList::from([1, 2, 3]);
        let two = list.next(list.begin());

        assert_eq!(list.cursor(two).unwrap().peek_next(), Some(&3));
        assert_eq!(list.cursor_back().current(), Some(&3));

        let mut cursor = list.cursor_mut(two).unwrap();
        cursor.remove_current();
        assert_eq!(cursor.current(), Some(&3));
        cursor.insert_before(5);

        assert_eq!(list, OwnedList::from([1, 5, 3]));
    }

    #[test]
    fn drop_releases_every_node() {
        let drops = Rc::new(Cell::new(0));
        let mut list: OwnedList<Tracked> = OwnedList::new();
        for id in 0..5 {
            list.push_back(Tracked::new(id, &drops));
        }

        drop(list);

        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn drop_continues_after_panicking_destructor() {
        let drops = Rc::new(Cell::new(0));
        let mut list: OwnedList<Tracked> = OwnedList::new();
        for id in 0..4 {
            list.push_back(Tracked::new(id, &drops));
        }
        list.get_mut(list.next(list.begin())).unwrap().panics = true;

        let result = catch_unwind(AssertUnwindSafe(move || drop(list)));

        assert!(result.is_err());
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn erased_values_are_returned_not_dropped() {
        let drops = Rc::new(Cell::new(0));
        let mut list: OwnedList<Tracked> = OwnedList::new();
        let pos = list.push_back(Tracked::new(7, &drops));

        let value = list.erase(pos).unwrap();
        assert_eq!(drops.get(), 0);
        assert_eq!(value.id, 7);

        drop(value);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn narrow_key_list() {
        let mut list: OwnedList<u32, u8> = OwnedList::new();
        list.extend(0..100);

        assert_eq!(list.len(), 100);
        assert_eq!(list.iter().sum::<u32>(), 4950);
    }
}
