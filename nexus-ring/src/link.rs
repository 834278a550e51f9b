//! Link layer: payload-oblivious ring surgery.
//!
//! Every function here rewires `next`/`prev` keys of nodes that live in a
//! [`Storage`]. None of them allocate, free, or look at payloads; node
//! lifetime is the container's job.
//!
//! # Ring Invariant
//!
//! For every node `n` hooked into a ring:
//!
//! ```text
//! next(prev(n)) == n  &&  prev(next(n)) == n
//! ```
//!
//! A ring always contains its header. An empty ring is a header whose `next`
//! and `prev` are its own key:
//!
//! ```text
//!   ┌──────┐        ┌──────┬──►┌───┬──►┌───┬──┐
//!   │      │        │header│   │ a │   │ b │  │
//! ┌─▼────┐ │        └──────┘◄──┴───┘◄──┴───┘  │
//! │header├─┘           ▲  └───────────────────┘
//! └──────┘             └─────── prev ──────────
//! ```
//!
//! # Panics
//!
//! Keys passed in by the caller are looked up with a checked access and panic
//! if they do not name an occupied slot, or name a node that is not hooked
//! into a ring. Keys reached through links are trusted (ring invariant) and
//! accessed unchecked.

use crate::{Key, Storage};

/// The `next`/`prev` pair embedded in every ring node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link<K: Key> {
    pub(crate) next: K,
    pub(crate) prev: K,
}

impl<K: Key> Link<K> {
    /// Links of a node that is not hooked into any ring.
    #[inline]
    pub const fn unlinked() -> Self {
        Self {
            next: K::NONE,
            prev: K::NONE,
        }
    }

    /// Links of a single-node ring: both point back at `key`.
    #[inline]
    pub const fn looped(key: K) -> Self {
        Self {
            next: key,
            prev: key,
        }
    }

    /// Key of the following node.
    #[inline]
    pub const fn next(&self) -> K {
        self.next
    }

    /// Key of the preceding node.
    #[inline]
    pub const fn prev(&self) -> K {
        self.prev
    }

    /// Returns `true` if the node is not hooked into a ring.
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

impl<K: Key> Default for Link<K> {
    fn default() -> Self {
        Self::unlinked()
    }
}

/// Types that embed a [`Link`] and can therefore be hooked into a ring.
///
/// # Example
///
/// ```
/// use nexus_ring::{Arena, Link, Linked, Storage, link};
///
/// struct Timer {
///     deadline: u64,
///     link: Link<u32>,
/// }
///
/// impl Linked<u32> for Timer {
///     fn link(&self) -> &Link<u32> { &self.link }
///     fn link_mut(&mut self) -> &mut Link<u32> { &mut self.link }
/// }
///
/// let mut storage: Arena<Timer> = Arena::new();
/// let head = storage.insert(Timer { deadline: 0, link: Link::unlinked() });
/// link::init(&mut storage, head);
///
/// let t = storage.insert(Timer { deadline: 10, link: Link::unlinked() });
/// link::hook(&mut storage, t, head);
/// assert!(!link::is_empty(&storage, head));
/// ```
pub trait Linked<K: Key> {
    /// Returns the node's links.
    fn link(&self) -> &Link<K>;

    /// Returns the node's links for rewiring.
    fn link_mut(&mut self) -> &mut Link<K>;

    /// Returns the next node's key.
    #[inline]
    fn next(&self) -> K {
        self.link().next
    }

    /// Returns the previous node's key.
    #[inline]
    fn prev(&self) -> K {
        self.link().prev
    }
}

#[inline]
fn checked<'a, N, S, K>(storage: &'a S, key: K) -> &'a N
where
    K: Key,
    N: Linked<K> + 'a,
    S: Storage<N, Key = K>,
{
    storage.get(key).expect("invalid key")
}

#[inline]
fn link_of<N, S, K>(storage: &S, key: K) -> Link<K>
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    // Safety: only called with keys reached through ring links or validated
    // by `checked` first
    *unsafe { storage.get_unchecked(key) }.link()
}

#[inline]
fn link_mut<'a, N, S, K>(storage: &'a mut S, key: K) -> &'a mut Link<K>
where
    K: Key,
    N: Linked<K> + 'a,
    S: Storage<N, Key = K>,
{
    // Safety: see `link_of`
    unsafe { storage.get_unchecked_mut(key) }.link_mut()
}

/// Links of a caller-supplied key that must be part of a ring. Everything
/// reached from them is then accessed unchecked.
#[inline]
fn hooked<N, S, K>(storage: &S, key: K) -> Link<K>
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    let link = *checked(storage, key).link();
    assert!(link.next.is_some() && link.prev.is_some(), "node is not hooked");
    link
}

/// Turns `header` into an empty ring (self-linked).
///
/// # Panics
///
/// Panics if `header` is not valid in storage.
#[inline]
pub fn init<N, S, K>(storage: &mut S, header: K)
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    *storage.get_mut(header).expect("invalid key").link_mut() = Link::looped(header);
}

/// Returns `true` if the ring headed by `header` holds no other node.
///
/// # Panics
///
/// Panics if `header` is not valid in storage.
#[inline]
pub fn is_empty<N, S, K>(storage: &S, header: K) -> bool
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    checked(storage, header).next() == header
}

/// Hooks `node` into a ring immediately before `position`.
///
/// `position` may be a ring header, in which case `node` becomes the last
/// element. `node` must not currently be hooked anywhere.
///
/// ```text
/// ┌────┬──►┌────┬──►┌────────┐
/// │prev│   │node│   │position│
/// └────┘◄──┴────┘◄──┴────────┘
/// ```
///
/// # Panics
///
/// Panics if `node` or `position` is not valid in storage, if `position`
/// is not hooked into a ring, or if `node` already is.
#[inline]
pub fn hook<N, S, K>(storage: &mut S, node: K, position: K)
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    let prev = hooked(storage, position).prev;
    assert!(
        checked(storage, node).link().is_unlinked(),
        "hooking a node that is already linked"
    );

    *link_mut(storage, node) = Link {
        next: position,
        prev,
    };
    link_mut(storage, prev).next = node;
    link_mut(storage, position).prev = node;
}

/// Unhooks `node` from whatever ring it is in.
///
/// The neighbours are joined and `node`'s own links are reset to
/// [`Link::unlinked`]. The node stays in storage; freeing it is the
/// caller's responsibility.
///
/// # Panics
///
/// Panics if `node` is not valid in storage or is not hooked.
#[inline]
pub fn unhook<N, S, K>(storage: &mut S, node: K)
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    let Link { next, prev } = hooked(storage, node);

    link_mut(storage, prev).next = next;
    link_mut(storage, next).prev = prev;
    *link_mut(storage, node) = Link::unlinked();
}

/// Exchanges the contents of the rings headed by `a` and `b`.
///
/// Afterwards `a` heads what used to be `b`'s sequence and vice versa. Only
/// the two headers and the first/last node of each ring are touched.
///
/// # Panics
///
/// Panics if `a` or `b` is not valid in storage or is not hooked.
pub fn swap<N, S, K>(storage: &mut S, a: K, b: K)
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    if a == b {
        return;
    }

    let a_link = hooked(storage, a);
    let b_link = hooked(storage, b);
    let a_empty = a_link.next == a;
    let b_empty = b_link.next == b;

    match (a_empty, b_empty) {
        (false, false) => {
            adopt(storage, a, b_link);
            adopt(storage, b, a_link);
        }
        (false, true) => {
            adopt(storage, b, a_link);
            *link_mut(storage, a) = Link::looped(a);
        }
        (true, false) => {
            adopt(storage, a, b_link);
            *link_mut(storage, b) = Link::looped(b);
        }
        (true, true) => {}
    }
}

/// Makes `header` the header of the non-empty sequence whose first and last
/// nodes are `members.next` and `members.prev`.
#[inline]
fn adopt<N, S, K>(storage: &mut S, header: K, members: Link<K>)
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    *link_mut(storage, header) = members;
    link_mut(storage, members.next).prev = header;
    link_mut(storage, members.prev).next = header;
}

/// Moves the range `[first, last)` so that it sits immediately before
/// `position`.
///
/// The range may come from the same ring as `position` or from another ring
/// in the same storage. Six link writes, independent of range length.
///
/// Does nothing if the range is empty (`first == last`) or if `position ==
/// last` (the range already sits there).
///
/// ```text
/// before:  fp ─► [first … lp] ─► last        pp ─► position
/// after:   fp ─► last                         pp ─► [first … lp] ─► position
/// ```
///
/// # Panics
///
/// Panics if any key is not valid in storage or names an unhooked node, or
/// if `position == first`. In debug builds, also panics if `position` lies
/// anywhere inside `[first, last)`; release builds skip that walk and leave
/// the range cut out of its ring.
pub fn transfer<N, S, K>(storage: &mut S, position: K, first: K, last: K)
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    if first == last || position == last {
        return;
    }

    let lp = hooked(storage, last).prev;
    let fp = hooked(storage, first).prev;
    let pp = hooked(storage, position).prev;

    assert!(
        position != first,
        "transfer destination lies inside the moved range"
    );
    debug_assert!(
        !range_contains(storage, first, last, position),
        "transfer destination lies inside the moved range"
    );

    link_mut(storage, lp).next = position;
    link_mut(storage, fp).next = last;
    link_mut(storage, pp).next = first;

    link_mut(storage, position).prev = lp;
    link_mut(storage, last).prev = fp;
    link_mut(storage, first).prev = pp;
}

/// Reverses the ring containing `start` in place.
///
/// Swaps `next` and `prev` on every node, so keys keep naming the same
/// nodes; they are simply met in the opposite order. O(n).
///
/// # Panics
///
/// Panics if `start` is not valid in storage or is not hooked.
pub fn reverse<N, S, K>(storage: &mut S, start: K)
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    hooked(storage, start);

    let mut current = start;
    loop {
        let link = link_mut(storage, current);
        core::mem::swap(&mut link.next, &mut link.prev);
        // old next
        current = link.prev;
        if current == start {
            break;
        }
    }
}

/// Counts the nodes in `[first, last)`. O(n) in the range length.
///
/// # Panics
///
/// Panics if `first` is not valid in storage or is not hooked.
pub fn distance<N, S, K>(storage: &S, first: K, last: K) -> usize
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    if first == last {
        return 0;
    }

    let mut count = 1;
    let mut current = hooked(storage, first).next;
    while current != last {
        count += 1;
        current = link_of(storage, current).next;
    }
    count
}

#[cfg(debug_assertions)]
fn range_contains<N, S, K>(storage: &S, first: K, last: K, key: K) -> bool
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    let mut current = first;
    while current != last {
        if current == key {
            return true;
        }
        current = checked(storage, current).next();
    }
    false
}

#[cfg(not(debug_assertions))]
#[inline(always)]
fn range_contains<N, S, K>(_storage: &S, _first: K, _last: K, _key: K) -> bool
where
    K: Key,
    N: Linked<K>,
    S: Storage<N, Key = K>,
{
    false
}
