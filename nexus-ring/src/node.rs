//! Typed ring node.

use crate::{Key, Link, Linked};

/// A ring node: links plus an optional payload.
///
/// Element nodes always carry a value. The header (sentinel) of a list is a
/// node with no value, stored in the same storage as the elements so every
/// link in a ring names a node of one type.
#[derive(Debug)]
pub struct Node<T, K: Key = u32> {
    link: Link<K>,
    value: Option<T>,
}

impl<T, K: Key> Node<T, K> {
    /// Creates an unhooked element node.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            link: Link::unlinked(),
            value: Some(value),
        }
    }

    /// Creates an unhooked header node.
    #[inline]
    pub const fn header() -> Self {
        Self {
            link: Link::unlinked(),
            value: None,
        }
    }

    /// Returns the payload, or `None` for a header.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns the payload mutably, or `None` for a header.
    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Returns `true` if this node is a list header.
    #[inline]
    pub fn is_header(&self) -> bool {
        self.value.is_none()
    }

    /// Returns `true` if this node is hooked into a ring.
    #[inline]
    pub fn is_linked(&self) -> bool {
        !self.link.is_unlinked()
    }

    /// Consumes the node, returning its payload.
    #[inline]
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T, K: Key> Linked<K> for Node<T, K> {
    #[inline]
    fn link(&self) -> &Link<K> {
        &self.link
    }

    #[inline]
    fn link_mut(&mut self) -> &mut Link<K> {
        &mut self.link
    }
}
