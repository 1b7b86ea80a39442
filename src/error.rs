use crate::InvalidKeyError;
use std::{collections::TryReserveError, error::Error, fmt};

/// The errors reported by [`crate::ChildMap`] operations and by
/// [`crate::NodeIterator`] steps.
///
/// None of these are recovered from internally, every one of them is handed
/// back to the immediate caller.
#[derive(Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The key did not normalize to exactly one byte.
    InvalidKey(InvalidKeyError),
    /// No child is stored under the key.
    KeyNotFound {
        /// The normalized key byte that was looked up
        key: u8,
    },
    /// The node carries no terminal value.
    ValueNotSet,
    /// Growing the child storage failed. The map is left exactly as it was
    /// before the failed operation.
    OutOfMemory(TryReserveError),
    /// The number of children changed since the iterator was created.
    ConcurrentModification {
        /// The number of children observed when the iterator was created
        expected: usize,
        /// The number of children observed on the failing step
        found: usize,
    },
}

impl fmt::Debug for NodeError {
    #[cfg_attr(test, mutants::skip)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey(err) => f.debug_tuple("InvalidKey").field(err).finish(),
            Self::KeyNotFound { key } => f.debug_struct("KeyNotFound").field("key", key).finish(),
            Self::ValueNotSet => f.debug_struct("ValueNotSet").finish(),
            Self::OutOfMemory(err) => f.debug_tuple("OutOfMemory").field(err).finish(),
            Self::ConcurrentModification { expected, found } => f
                .debug_struct("ConcurrentModification")
                .field("expected", expected)
                .field("found", found)
                .finish(),
        }
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey(err) => write!(f, "Invalid child key: {err}"),
            Self::KeyNotFound { key } => {
                write!(f, "No child is stored under the key byte [{key:#04x}].")
            },
            Self::ValueNotSet => write!(f, "The node does not carry a terminal value."),
            Self::OutOfMemory(err) => {
                write!(f, "Unable to grow the child storage of the node: {err}")
            },
            Self::ConcurrentModification { expected, found } => write!(
                f,
                "The node was modified during iteration, the number of children changed from \
                 [{expected}] to [{found}]."
            ),
        }
    }
}

impl Error for NodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidKey(err) => Some(err),
            Self::OutOfMemory(err) => Some(err),
            Self::KeyNotFound { .. } | Self::ValueNotSet | Self::ConcurrentModification { .. } => {
                None
            },
        }
    }
}

impl From<InvalidKeyError> for NodeError {
    fn from(err: InvalidKeyError) -> Self {
        NodeError::InvalidKey(err)
    }
}

impl From<TryReserveError> for NodeError {
    fn from(err: TryReserveError) -> Self {
        NodeError::OutOfMemory(err)
    }
}

impl NodeError {
    /// Return true if this error was caused by a key that did not normalize
    /// to a single byte.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey(_))
    }

    /// Return true if this error reports a missing child.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// Return true if this error was raised by an invalidated iterator.
    pub fn is_concurrent_modification(&self) -> bool {
        matches!(self, Self::ConcurrentModification { .. })
    }
}
