//! Key trait for node handles.
//!
//! Rings link their nodes by key rather than by pointer. A key is a small
//! copyable index into a [`Storage`](crate::Storage); one value per key type is
//! reserved as [`Key::NONE`] and marks a node that is not hooked into any ring.

use core::fmt::Debug;
use core::hash::Hash;

/// Trait for key/index types used to address ring nodes.
///
/// Provides a sentinel value (`NONE`) and conversion to/from `usize`.
/// Implemented for the unsigned integer types. Narrow keys (`u32`, the
/// default) keep [`Link`](crate::Link) at 8 bytes per node.
///
/// # Example
///
/// ```
/// use nexus_ring::Key;
///
/// let key: u32 = 7;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::from_usize(7), key);
/// ```
pub trait Key: Copy + Eq + Hash + Debug + 'static {
    /// Sentinel value representing "no key".
    ///
    /// Only unhooked nodes carry it. Inside a live ring every link names a
    /// real node, the list header included.
    const NONE: Self;

    /// Creates a key from a `usize` slot index.
    fn from_usize(val: usize) -> Self;

    /// Returns the key as a `usize` slot index.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as $ty
                }

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);
