//! Error types for list operations.

use core::fmt;

/// Failure of a list operation that needs an element or a live position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListError {
    /// The operation requires at least one element (`front`, `back`,
    /// `pop_*`, `Stack::pop`, `Stack::top`).
    EmptyContainer,
    /// The position does not name a usable node: it is the end position
    /// where an element is required, or its slot is vacant or holds a list
    /// header.
    ///
    /// A removed element's slot is reused by later inserts, after which an
    /// old position names the new element. Not holding on to positions past
    /// their element's removal is the caller's job.
    InvalidPosition,
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContainer => write!(f, "container is empty"),
            Self::InvalidPosition => write!(f, "position does not name a live element"),
        }
    }
}

impl std::error::Error for ListError {}
