//! LIFO adapter over any back-insertable sequence.
//!
//! [`Stack`] exposes only `push`, `pop`, and `top`. The underlying sequence
//! defaults to [`OwnedList`], but any [`BackSequence`] works, including
//! `Vec` and `VecDeque`.
//!
//! # Example
//!
//! ```
//! use nexus_ring::{ListError, Stack};
//!
//! let mut stack: Stack<&str> = Stack::new();
//! stack.push("a");
//! stack.push("b");
//!
//! assert_eq!(stack.top(), Ok(&"b"));
//! assert_eq!(stack.pop(), Ok("b"));
//! assert_eq!(stack.pop(), Ok("a"));
//! assert_eq!(stack.pop(), Err(ListError::EmptyContainer));
//! ```

use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::{Key, ListError, Node, OwnedList, Storage};

/// A sequence that grows and shrinks at the back.
pub trait BackSequence<T> {
    /// Appends `value`.
    fn push_back(&mut self, value: T);

    /// Removes and returns the last element.
    fn pop_back(&mut self) -> Option<T>;

    /// Returns the last element.
    fn back(&self) -> Option<&T>;

    /// Returns the last element mutably.
    fn back_mut(&mut self) -> Option<&mut T>;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, K: Key, S> BackSequence<T> for OwnedList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn push_back(&mut self, value: T) {
        OwnedList::push_back(self, value);
    }

    #[inline]
    fn pop_back(&mut self) -> Option<T> {
        OwnedList::pop_back(self).ok()
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        OwnedList::back(self).ok()
    }

    #[inline]
    fn back_mut(&mut self) -> Option<&mut T> {
        OwnedList::back_mut(self).ok()
    }

    #[inline]
    fn len(&self) -> usize {
        OwnedList::len(self)
    }
}

impl<T> BackSequence<T> for Vec<T> {
    #[inline]
    fn push_back(&mut self, value: T) {
        self.push(value);
    }

    #[inline]
    fn pop_back(&mut self) -> Option<T> {
        self.pop()
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        self.last()
    }

    #[inline]
    fn back_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> BackSequence<T> for VecDeque<T> {
    #[inline]
    fn push_back(&mut self, value: T) {
        VecDeque::push_back(self, value);
    }

    #[inline]
    fn pop_back(&mut self) -> Option<T> {
        VecDeque::pop_back(self)
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        VecDeque::back(self)
    }

    #[inline]
    fn back_mut(&mut self) -> Option<&mut T> {
        VecDeque::back_mut(self)
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

/// Last-in, first-out stack over a [`BackSequence`].
#[derive(Debug)]
pub struct Stack<T, C = OwnedList<T>>
where
    C: BackSequence<T>,
{
    container: C,
    _marker: PhantomData<T>,
}

impl<T, C> Stack<T, C>
where
    C: BackSequence<T> + Default,
{
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::with_container(C::default())
    }
}

impl<T, C> Stack<T, C>
where
    C: BackSequence<T>,
{
    /// Creates a stack on top of `container`; its back is the top.
    #[inline]
    pub fn with_container(container: C) -> Self {
        Self {
            container,
            _marker: PhantomData,
        }
    }

    /// Pushes `value` on top.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.container.push_back(value);
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Result<T, ListError> {
        self.container.pop_back().ok_or(ListError::EmptyContainer)
    }

    /// Returns the top element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the stack is empty.
    #[inline]
    pub fn top(&self) -> Result<&T, ListError> {
        self.container.back().ok_or(ListError::EmptyContainer)
    }

    /// Returns the top element mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the stack is empty.
    #[inline]
    pub fn top_mut(&mut self) -> Result<&mut T, ListError> {
        self.container.back_mut().ok_or(ListError::EmptyContainer)
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// Returns `true` if the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Consumes the stack, returning the underlying container.
    #[inline]
    pub fn into_inner(self) -> C {
        self.container
    }
}

impl<T, C> Default for Stack<T, C>
where
    C: BackSequence<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
