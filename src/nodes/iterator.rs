//! Cursors over the children of a [`ChildMap`] that detect structural
//! mutation between steps.

use crate::{ChildMap, NodeError};
use std::{fmt, marker::PhantomData};

/// Selects what a [`NodeIterator`] yields for each child.
pub trait Projection {
    /// The item yielded for a child borrowed for `'a`.
    type Item<'a, C: 'a>;

    /// Build the item for the child stored under `key`.
    fn project<C>(key: u8, child: &C) -> Self::Item<'_, C>;
}

/// Yields only the key bytes.
#[derive(Debug)]
pub enum KeyProjection {}

/// Yields only the children.
#[derive(Debug)]
pub enum ValueProjection {}

/// Yields `(key, child)` pairs.
#[derive(Debug)]
pub enum ItemProjection {}

impl Projection for KeyProjection {
    type Item<'a, C: 'a> = u8;

    fn project<C>(key: u8, _child: &C) -> Self::Item<'_, C> {
        key
    }
}

impl Projection for ValueProjection {
    type Item<'a, C: 'a> = &'a C;

    fn project<C>(_key: u8, child: &C) -> Self::Item<'_, C> {
        child
    }
}

impl Projection for ItemProjection {
    type Item<'a, C: 'a> = (u8, &'a C);

    fn project<C>(key: u8, child: &C) -> Self::Item<'_, C> {
        (key, child)
    }
}

/// The order in which a [`NodeIterator`] walks the children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending key order
    Forward,
    /// Descending key order
    Backward,
}

/// The lifecycle of a [`NodeIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// More children may be yielded.
    Active,
    /// Every child was yielded, further steps yield nothing.
    Exhausted,
    /// The node changed size during iteration, further steps fail.
    Invalidated,
}

/// A cursor over the children of a [`ChildMap`].
///
/// The cursor does not borrow the node between steps: the node is passed to
/// every call to [`NodeIterator::next`]. This allows the node to be mutated
/// in between, which is detected by comparing the current number of children
/// with the number observed when the cursor was created. A change turns the
/// cursor into a permanent [`NodeError::ConcurrentModification`] failure.
///
/// The check is on the count only. A delete followed by an insert between two
/// steps leaves the count unchanged and is not detected; the cursor then
/// yields whatever is stored at its position.
///
/// Each cursor must only ever be stepped with the node it was created from.
///
/// # Examples
///
/// ```
/// use trienode::{ChildMap, NodeIterator};
///
/// let mut node = ChildMap::<char>::new();
/// for key in [5u8, 1, 3] {
///     node.set(key, char::from(b'a' + key)).unwrap();
/// }
///
/// let mut keys = NodeIterator::keys(&node);
/// assert_eq!(keys.next(&node).unwrap(), Some(1));
///
/// node.set(9, 'j').unwrap();
/// assert!(keys.next(&node).unwrap_err().is_concurrent_modification());
/// ```
pub struct NodeIterator<P> {
    /// The index of the next child to yield, `None` once the cursor walked
    /// off the front of the node.
    position: Option<usize>,
    direction: Direction,
    snapshot_len: usize,
    state: IteratorState,
    _projection: PhantomData<fn() -> P>,
}

impl<P> Clone for NodeIterator<P> {
    fn clone(&self) -> Self {
        NodeIterator {
            position: self.position,
            direction: self.direction,
            snapshot_len: self.snapshot_len,
            state: self.state,
            _projection: PhantomData,
        }
    }
}

impl<P> fmt::Debug for NodeIterator<P> {
    #[cfg_attr(test, mutants::skip)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeIterator")
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("snapshot_len", &self.snapshot_len)
            .field("state", &self.state)
            .finish()
    }
}

impl NodeIterator<KeyProjection> {
    /// Create a cursor yielding the key bytes of `node` in ascending order.
    pub fn keys<C, V>(node: &ChildMap<C, V>) -> Self {
        Self::new(node, Direction::Forward)
    }
}

impl NodeIterator<ValueProjection> {
    /// Create a cursor yielding the children of `node` in ascending key order.
    pub fn values<C, V>(node: &ChildMap<C, V>) -> Self {
        Self::new(node, Direction::Forward)
    }
}

impl NodeIterator<ItemProjection> {
    /// Create a cursor yielding the `(key, child)` pairs of `node` in
    /// ascending key order.
    pub fn items<C, V>(node: &ChildMap<C, V>) -> Self {
        Self::new(node, Direction::Forward)
    }

    /// Create a cursor yielding the `(key, child)` pairs of `node` in
    /// descending key order.
    pub fn reversed<C, V>(node: &ChildMap<C, V>) -> Self {
        Self::new(node, Direction::Backward)
    }
}

impl<P: Projection> NodeIterator<P> {
    /// Create a cursor over `node` walking in the given direction.
    pub fn new<C, V>(node: &ChildMap<C, V>, direction: Direction) -> Self {
        let snapshot_len = node.len();
        let position = match direction {
            Direction::Forward => Some(0),
            Direction::Backward => snapshot_len.checked_sub(1),
        };

        NodeIterator {
            position,
            direction,
            snapshot_len,
            state: IteratorState::Active,
            _projection: PhantomData,
        }
    }

    /// Return the current lifecycle state.
    pub fn state(&self) -> IteratorState {
        self.state
    }

    /// Return the direction of this cursor.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Return the number of children left to yield, assuming the node is not
    /// modified.
    pub fn remaining(&self) -> usize {
        if self.state != IteratorState::Active {
            return 0;
        }

        match (self.direction, self.position) {
            (Direction::Forward, Some(position)) => self.snapshot_len.saturating_sub(position),
            (Direction::Backward, Some(position)) => (position + 1).min(self.snapshot_len),
            (_, None) => 0,
        }
    }

    fn concurrent_modification(&self, found: usize) -> NodeError {
        NodeError::ConcurrentModification {
            expected: self.snapshot_len,
            found,
        }
    }

    /// Advance the cursor over `node` and return the next item.
    ///
    /// Returns `Ok(None)` once every child was yielded.
    ///
    /// `node` must be the node this cursor was created from. The cursor only
    /// records a position and a child count, so a different node with a
    /// different number of children fails like a modified one, and a
    /// different node with the same number of children is walked from the
    /// cursor's current position.
    ///
    /// # Errors
    ///  - [`NodeError::ConcurrentModification`] if the number of children of
    ///    `node` differs from the number observed at creation. The cursor
    ///    stays invalidated and every later step fails the same way.
    pub fn next<'a, C, V>(
        &mut self,
        node: &'a ChildMap<C, V>,
    ) -> Result<Option<P::Item<'a, C>>, NodeError> {
        match self.state {
            IteratorState::Active => {},
            IteratorState::Exhausted => return Ok(None),
            IteratorState::Invalidated => return Err(self.concurrent_modification(node.len())),
        }

        let len = node.len();
        if len != self.snapshot_len {
            self.state = IteratorState::Invalidated;
            return Err(self.concurrent_modification(len));
        }

        let Some(position) = self.position.filter(|position| *position < len) else {
            self.state = IteratorState::Exhausted;
            return Ok(None);
        };

        let (keys, children) = node.initialized_portion();
        let item = P::project(keys[position], &children[position]);

        self.position = match self.direction {
            Direction::Forward => position.checked_add(1),
            Direction::Backward => position.checked_sub(1),
        };

        Ok(Some(item))
    }
}
