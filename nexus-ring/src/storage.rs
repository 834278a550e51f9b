//! Storage trait for slab-like containers with stable keys.
//!
//! Storage provides insert/remove/get operations where keys remain valid
//! until explicitly removed. Rings keep their nodes in storage and link them
//! by key, so "allocate a node" is [`Storage::insert`] and "free a node" is
//! [`Storage::remove`].

use core::mem;

use crate::Key;

/// Slab-like storage with stable keys.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable keys**: a key remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **Slot reuse**: removed slots can be reused by future inserts
///
/// # Implementations
///
/// - [`Arena<T, K>`] - growable, compact keys (in this crate)
/// - `slab::Slab<T>` - growable, `usize` keys (feature `slab`)
pub trait Storage<T> {
    /// Key type handed out by this storage.
    type Key: Key;

    /// Inserts a value, returning its stable key.
    fn insert(&mut self, value: T) -> Self::Key;

    /// Removes and returns the value at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns a reference to the value at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if present.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T;

    /// Returns a mutable reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T;
}

// =============================================================================
// Arena - growable, free-list slot reuse
// =============================================================================

#[derive(Debug)]
enum Slot<T, K> {
    Occupied(T),
    Vacant { next_free: K },
}

/// Growable storage with compact keys.
///
/// Slots live in a single `Vec`. Removed slots are threaded onto an
/// intrusive free list and reused LIFO, so a freshly freed key is the next
/// one handed out.
///
/// # Panics
///
/// Inserting panics once the slot count would reach `K::NONE`, the value
/// reserved for unhooked links.
///
/// # Example
///
/// ```
/// use nexus_ring::{Arena, Storage};
///
/// let mut arena: Arena<&str> = Arena::with_capacity(8);
/// let a = arena.insert("a");
/// assert_eq!(arena.get(a), Some(&"a"));
///
/// assert_eq!(arena.remove(a), Some("a"));
/// let b = arena.insert("b");
/// assert_eq!(a, b); // slot reused
/// ```
#[derive(Debug)]
pub struct Arena<T, K: Key = u32> {
    slots: Vec<Slot<T, K>>,
    free_head: K,
    len: usize,
}

impl<T, K: Key> Default for Arena<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Key> Arena<T, K> {
    /// Creates an empty arena. Does not allocate until the first insert.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: K::NONE,
            len: 0,
        }
    }

    /// Creates an arena with room for at least `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: K::NONE,
            len: 0,
        }
    }

    /// Returns the number of slots available without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reserves room for at least `additional` more values.
    pub fn reserve(&mut self, additional: usize) {
        let vacant = self.slots.len() - self.len;
        if additional > vacant {
            self.slots.reserve(additional - vacant);
        }
    }

    /// Drops every stored value and forgets all slots.
    ///
    /// # Warning
    ///
    /// Rings that still reference keys in this arena are left dangling.
    /// [`OwnedList`](crate::OwnedList) never calls this on a live ring.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = K::NONE;
        self.len = 0;
    }
}

impl<T, K: Key> Storage<T> for Arena<T, K> {
    type Key = K;

    #[inline]
    fn insert(&mut self, value: T) -> K {
        if self.free_head.is_some() {
            let key = self.free_head;
            let slot = &mut self.slots[key.as_usize()];
            match mem::replace(slot, Slot::Occupied(value)) {
                Slot::Vacant { next_free } => self.free_head = next_free,
                Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
            }
            self.len += 1;
            return key;
        }

        let index = self.slots.len();
        assert!(index < K::NONE.as_usize(), "arena exceeds key type maximum");
        self.slots.push(Slot::Occupied(value));
        self.len += 1;
        K::from_usize(index)
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<T> {
        let slot = self.slots.get_mut(key.as_usize())?;
        if let Slot::Vacant { .. } = slot {
            return None;
        }

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match mem::replace(slot, vacant) {
            Slot::Occupied(value) => {
                self.free_head = key;
                self.len -= 1;
                Some(value)
            }
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        match self.slots.get(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slots.get_mut(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: K) -> &T {
        debug_assert!(self.get(key).is_some(), "unchecked access to vacant slot");
        match unsafe { self.slots.get_unchecked(key.as_usize()) } {
            Slot::Occupied(value) => value,
            // Safety: caller guarantees the slot is occupied
            Slot::Vacant { .. } => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: K) -> &mut T {
        debug_assert!(self.get(key).is_some(), "unchecked access to vacant slot");
        match unsafe { self.slots.get_unchecked_mut(key.as_usize()) } {
            Slot::Occupied(value) => value,
            // Safety: caller guarantees the slot is occupied
            Slot::Vacant { .. } => unsafe { core::hint::unreachable_unchecked() },
        }
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    #[inline]
    fn insert(&mut self, value: T) -> usize {
        slab::Slab::insert(self, value)
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<&T> {
        slab::Slab::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: usize) -> &T {
        unsafe { slab::Slab::get_unchecked(self, key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: usize) -> &mut T {
        unsafe { slab::Slab::get_unchecked_mut(self, key) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let arena: Arena<u64> = Arena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.capacity(), 0);
    }

    #[test]
    fn insert_get_remove() {
        let mut arena: Arena<u64> = Arena::with_capacity(16);

        let key = arena.insert(42);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(key), Some(&42));

        assert_eq!(arena.remove(key), Some(42));
        assert_eq!(arena.get(key), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn get_mut() {
        let mut arena: Arena<u64> = Arena::new();

        let key = arena.insert(10);
        *arena.get_mut(key).unwrap() = 20;

        assert_eq!(arena.get(key), Some(&20));
    }

    #[test]
    fn keys_are_sequential_until_reuse() {
        let mut arena: Arena<u64> = Arena::new();

        let keys: Vec<u32> = (0..4).map(|i| arena.insert(i)).collect();
        assert_eq!(keys, vec![0, 1, 2, 3]);
    }

    #[test]
    fn slot_reuse_is_lifo() {
        let mut arena: Arena<u64> = Arena::new();

        let k0 = arena.insert(0);
        let k1 = arena.insert(1);
        let _k2 = arena.insert(2);

        arena.remove(k0);
        arena.remove(k1);

        assert_eq!(arena.insert(10), k1);
        assert_eq!(arena.insert(11), k0);
        assert_eq!(arena.insert(12), 3);
    }

    #[test]
    fn remove_vacant_and_out_of_bounds() {
        let mut arena: Arena<u64> = Arena::new();

        let key = arena.insert(42);
        arena.remove(key);

        assert_eq!(arena.remove(key), None);
        assert_eq!(arena.remove(1000), None);
        assert_eq!(arena.get(1000), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn reserve_accounts_for_vacant_slots() {
        let mut arena: Arena<u64> = Arena::new();
        for i in 0..8 {
            arena.insert(i);
        }
        for k in 0..8u32 {
            arena.remove(k);
        }

        let before = arena.capacity();
        arena.reserve(8);
        assert_eq!(arena.capacity(), before);
    }

    #[test]
    fn clear_drops_values() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        let mut arena: Arena<Rc<()>> = Arena::new();
        for _ in 0..3 {
            arena.insert(Rc::clone(&tracker));
        }
        assert_eq!(Rc::strong_count(&tracker), 4);

        arena.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);
        assert!(arena.is_empty());
        assert_eq!(arena.insert(Rc::clone(&tracker)), 0);
    }

    #[test]
    #[should_panic(expected = "arena exceeds key type maximum")]
    fn key_space_exhaustion_panics() {
        let mut arena: Arena<(), u8> = Arena::new();
        for _ in 0..=u8::MAX as usize {
            arena.insert(());
        }
    }

    #[test]
    fn unchecked_access() {
        let mut arena: Arena<u64> = Arena::new();
        let key = arena.insert(5);

        unsafe {
            *arena.get_unchecked_mut(key) += 1;
            assert_eq!(*arena.get_unchecked(key), 6);
        }
    }

    #[cfg(feature = "slab")]
    mod slab_tests {
        use super::*;

        #[test]
        fn insert_get_remove() {
            let mut storage = slab::Slab::new();

            let key = Storage::insert(&mut storage, 42u64);
            assert_eq!(Storage::get(&storage, key), Some(&42));

            assert_eq!(Storage::remove(&mut storage, key), Some(42));
            assert_eq!(Storage::get(&storage, key), None);
            assert_eq!(Storage::remove(&mut storage, key), None);
        }

        #[test]
        fn slot_reuse() {
            let mut storage = slab::Slab::new();

            let k1 = Storage::insert(&mut storage, 1u64);
            Storage::remove(&mut storage, k1);

            let k2 = Storage::insert(&mut storage, 2u64);
            assert_eq!(k1, k2);
        }
    }
}
