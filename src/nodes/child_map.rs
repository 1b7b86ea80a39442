use crate::{AsKeyByte, Header, NodeError};
use std::{
    collections::TryReserveError,
    fmt,
    iter::{Copied, Zip},
    mem, slice, vec,
};

/// Where a write should happen inside the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WritePoint {
    /// In an already existing key fragment
    Existing(usize),
    /// As the last key fragment
    Last(usize),
    /// Shift the key fragments to the right
    Shift(usize),
}

/// An ordered map from single key bytes to owned children, plus the terminal
/// metadata of one trie node.
///
/// Children are kept in two parallel arrays sorted ascending by key byte,
/// with no duplicate keys. Lookups are linear scans, which beat a hash table
/// at the small fan-out typical of trie nodes. By default the arrays are
/// resized to exactly the number of children after every insert and delete.
///
/// The map never interprets its children: `C` can be a nested node, a
/// pointer, or a terminal payload.
///
/// # Examples
///
/// ```
/// use trienode::ChildMap;
///
/// let mut node = ChildMap::<&str>::new();
/// node.set(5, "five").unwrap();
/// node.set(1, "one").unwrap();
/// node.set("c", "c").unwrap();
///
/// assert_eq!(node.get(1).unwrap(), &"one");
/// assert!(node.contains(b"c").unwrap());
/// assert_eq!(node.keys().collect::<Vec<_>>(), [1, 5, b'c']);
///
/// assert_eq!(node.delete(5).unwrap(), "five");
/// assert_eq!(node.len(), 2);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ChildMap<C, V = ()> {
    /// The terminal flags and value of this node.
    pub(crate) header: Header<V>,
    /// The key bytes, sorted ascending. The `i`th key labels the `i`th child.
    pub(crate) keys: Vec<u8>,
    /// The children, in the same order as `keys`.
    pub(crate) children: Vec<C>,
}

/// Iterator over the key bytes and children of a [`ChildMap`].
pub type Iter<'a, C> = Zip<Copied<slice::Iter<'a, u8>>, slice::Iter<'a, C>>;

/// Iterator over the key bytes and mutable children of a [`ChildMap`].
pub type IterMut<'a, C> = Zip<Copied<slice::Iter<'a, u8>>, slice::IterMut<'a, C>>;

/// Iterator over the key bytes of a [`ChildMap`].
pub type Keys<'a> = Copied<slice::Iter<'a, u8>>;

/// Iterator over the children of a [`ChildMap`].
pub type Values<'a, C> = slice::Iter<'a, C>;

/// Iterator over the mutable children of a [`ChildMap`].
pub type ValuesMut<'a, C> = slice::IterMut<'a, C>;

/// Owning iterator over the key bytes and children of a [`ChildMap`].
pub type IntoIter<C> = Zip<vec::IntoIter<u8>, vec::IntoIter<C>>;

impl<C: fmt::Debug, V: fmt::Debug> fmt::Debug for ChildMap<C, V> {
    #[cfg_attr(test, mutants::skip)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (keys, children) = self.initialized_portion();
        f.debug_struct("ChildMap")
            .field("header", &self.header)
            .field("keys", &keys)
            .field("children", &children)
            .finish()
    }
}

impl<C, V> Default for ChildMap<C, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, V> ChildMap<C, V> {
    /// Create an empty node: no children, no flags, no value.
    pub const fn new() -> Self {
        ChildMap {
            header: Header::empty(),
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Return the key bytes and the children of the node.
    pub(crate) fn initialized_portion(&self) -> (&[u8], &[C]) {
        debug_assert_eq!(self.keys.len(), self.children.len());
        (&self.keys, &self.children)
    }

    /// Return the terminal metadata of the node.
    pub fn header(&self) -> &Header<V> {
        &self.header
    }

    /// Return the number of children.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Return true if the node has no children.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Return the number of children the node can hold without growing its
    /// storage.
    ///
    /// Unless the `amortized-growth` feature is enabled, this is equal to
    /// [`ChildMap::len`] for children with a non-zero size. It can only be
    /// larger after a delete that could not allocate the smaller storage.
    pub fn capacity(&self) -> usize {
        self.keys.capacity().min(self.children.capacity())
    }

    /// Get the index of the child if it exists
    fn lookup_child_index(&self, key_fragment: u8) -> Option<usize> {
        for (child_index, key) in self.keys.iter().enumerate() {
            if key_fragment == *key {
                return Some(child_index);
            }
        }

        None
    }

    /// Find the write point for `key_fragment`
    fn find_write_point(&self, key_fragment: u8) -> WritePoint {
        let mut child_index = 0;
        for key in &self.keys {
            #[allow(clippy::comparison_chain)]
            if key_fragment < *key {
                return WritePoint::Shift(child_index);
            } else if key_fragment == *key {
                return WritePoint::Existing(child_index);
            }
            child_index += 1;
        }
        WritePoint::Last(child_index)
    }

    /// Make room for one more child in both arrays.
    ///
    /// On failure the logical contents are untouched, one of the arrays may
    /// keep the extra slot until the next successful resize.
    fn reserve_one(&mut self) -> Result<(), TryReserveError> {
        if cfg!(feature = "amortized-growth") {
            self.keys.try_reserve(1)?;
            self.children.try_reserve(1)?;
        } else {
            self.keys.try_reserve_exact(1)?;
            self.children.try_reserve_exact(1)?;
        }

        Ok(())
    }

    /// Fit the storage to the remaining children after a removal.
    ///
    /// Shrinking needs a fresh allocation. If that fails the larger storage
    /// is kept, the children themselves are never touched.
    fn compact(&mut self) {
        let len = self.keys.len();
        if len == 0 {
            // Release the storage entirely
            self.keys = Vec::new();
            self.children = Vec::new();
        } else if !cfg!(feature = "amortized-growth") || self.capacity() / 2 >= len {
            try_shrink_exact(&mut self.keys);
            try_shrink_exact(&mut self.children);
        }
    }

    /// Return a reference to the child stored under `key_fragment`.
    pub(crate) fn lookup_child(&self, key_fragment: u8) -> Option<&C> {
        let idx = self.lookup_child_index(key_fragment)?;
        self.children.get(idx)
    }

    /// Return a mutable reference to the child stored under `key_fragment`.
    pub(crate) fn lookup_child_mut(&mut self, key_fragment: u8) -> Option<&mut C> {
        let idx = self.lookup_child_index(key_fragment)?;
        self.children.get_mut(idx)
    }

    /// Writes a child to the node, keeping the keys sorted.
    ///
    /// If a child already exists under `key_fragment` it is replaced in place
    /// and returned. Otherwise the node grows by one slot, every child with a
    /// greater key shifts one slot to the right and the new child is written
    /// in the gap.
    pub(crate) fn write_child(
        &mut self,
        key_fragment: u8,
        child: C,
    ) -> Result<Option<C>, TryReserveError> {
        let idx = match self.find_write_point(key_fragment) {
            WritePoint::Existing(child_index) => {
                return Ok(Some(mem::replace(&mut self.children[child_index], child)));
            },
            WritePoint::Last(child_index) | WritePoint::Shift(child_index) => child_index,
        };

        self.reserve_one()?;
        self.keys.insert(idx, key_fragment);
        self.children.insert(idx, child);

        debug_assert!(self.keys.windows(2).all(|pair| pair[0] < pair[1]));
        Ok(None)
    }

    /// Removes the child stored under `key_fragment` if it exists.
    ///
    /// Every child after it shifts one slot to the left and the storage is
    /// fitted to the remaining children.
    pub(crate) fn remove_child(&mut self, key_fragment: u8) -> Option<C> {
        let child_index = self.lookup_child_index(key_fragment)?;

        self.keys.remove(child_index);
        let child = self.children.remove(child_index);
        self.compact();

        Some(child)
    }

    /// Return the child stored under `key`.
    ///
    /// # Errors
    ///  - [`NodeError::InvalidKey`] if `key` does not normalize to one byte.
    ///  - [`NodeError::KeyNotFound`] if no child is stored under `key`.
    pub fn get<K: AsKeyByte>(&self, key: K) -> Result<&C, NodeError> {
        let key = key.key_byte()?;
        self.lookup_child(key).ok_or(NodeError::KeyNotFound { key })
    }

    /// Return the child stored under `key`, or `default` if there is none.
    ///
    /// # Errors
    ///  - [`NodeError::InvalidKey`] if `key` does not normalize to one byte.
    pub fn get_or<'a, K: AsKeyByte>(&'a self, key: K, default: &'a C) -> Result<&'a C, NodeError> {
        let key = key.key_byte()?;
        Ok(self.lookup_child(key).unwrap_or(default))
    }

    /// Return a mutable reference to the child stored under `key`.
    ///
    /// # Errors
    ///  - [`NodeError::InvalidKey`] if `key` does not normalize to one byte.
    ///  - [`NodeError::KeyNotFound`] if no child is stored under `key`.
    pub fn get_mut<K: AsKeyByte>(&mut self, key: K) -> Result<&mut C, NodeError> {
        let key = key.key_byte()?;
        self.lookup_child_mut(key).ok_or(NodeError::KeyNotFound { key })
    }

    /// Return true if a child is stored under `key`.
    ///
    /// # Errors
    ///  - [`NodeError::InvalidKey`] if `key` does not normalize to one byte.
    pub fn contains<K: AsKeyByte>(&self, key: K) -> Result<bool, NodeError> {
        let key = key.key_byte()?;
        Ok(self.lookup_child_index(key).is_some())
    }

    /// Store `child` under `key`, returning the child it replaced.
    ///
    /// Replacing keeps the position of the key, inserting keeps the keys
    /// sorted. Ownership of `child` moves into the map on success; on failure
    /// the map is unchanged and `child` is dropped.
    ///
    /// # Errors
    ///  - [`NodeError::InvalidKey`] if `key` does not normalize to one byte.
    ///  - [`NodeError::OutOfMemory`] if the storage could not grow.
    pub fn set<K: AsKeyByte>(&mut self, key: K, child: C) -> Result<Option<C>, NodeError> {
        let key = key.key_byte()?;
        Ok(self.write_child(key, child)?)
    }

    /// Remove the child stored under `key` and return it.
    ///
    /// # Errors
    ///  - [`NodeError::InvalidKey`] if `key` does not normalize to one byte.
    ///  - [`NodeError::KeyNotFound`] if no child is stored under `key`.
    pub fn delete<K: AsKeyByte>(&mut self, key: K) -> Result<C, NodeError> {
        let key = key.key_byte()?;
        self.remove_child(key).ok_or(NodeError::KeyNotFound { key })
    }

    /// Drop every child and release the storage. The terminal metadata is
    /// kept.
    pub fn clear(&mut self) {
        self.keys = Vec::new();
        self.children = Vec::new();
    }

    /// Return the child with the smallest key byte.
    pub fn first(&self) -> Option<(u8, &C)> {
        Some((*self.keys.first()?, self.children.first()?))
    }

    /// Return the child with the largest key byte.
    pub fn last(&self) -> Option<(u8, &C)> {
        Some((*self.keys.last()?, self.children.last()?))
    }

    /// Return true if this node marks the end of an inserted string.
    pub fn is_end_of_string(&self) -> bool {
        self.header.is_end_of_string()
    }

    /// Mark or unmark this node as the end of an inserted string.
    ///
    /// Unmarking releases the terminal value, if any.
    pub fn set_end_of_string(&mut self, end_of_string: bool) {
        let _ = self.header.set_end_of_string(end_of_string);
    }

    /// Return the terminal value of this node.
    ///
    /// # Errors
    ///  - [`NodeError::ValueNotSet`] if the node carries no value.
    pub fn value(&self) -> Result<&V, NodeError> {
        self.header.value().ok_or(NodeError::ValueNotSet)
    }

    /// Return a mutable reference to the terminal value of this node.
    ///
    /// # Errors
    ///  - [`NodeError::ValueNotSet`] if the node carries no value.
    pub fn value_mut(&mut self) -> Result<&mut V, NodeError> {
        self.header.value_mut().ok_or(NodeError::ValueNotSet)
    }

    /// Store the terminal value of this node, marking it as the end of a
    /// string, and return the value it replaced.
    pub fn set_value(&mut self, value: V) -> Option<V> {
        self.header.replace_value(value)
    }

    /// Remove the terminal value of this node. The end of string flag is left
    /// as is.
    pub fn take_value(&mut self) -> Option<V> {
        self.header.take_value()
    }

    /// Get an iterator over the key bytes and children, in ascending key
    /// order. Reverse it with [`Iterator::rev`].
    pub fn iter(&self) -> Iter<'_, C> {
        self.keys.iter().copied().zip(self.children.iter())
    }

    /// Get an iterator over the key bytes and mutable children, in ascending
    /// key order.
    pub fn iter_mut(&mut self) -> IterMut<'_, C> {
        self.keys.iter().copied().zip(self.children.iter_mut())
    }

    /// Get an iterator over the key bytes, in ascending order.
    pub fn keys(&self) -> Keys<'_> {
        self.keys.iter().copied()
    }

    /// Get an iterator over the children, in ascending key order.
    pub fn values(&self) -> Values<'_, C> {
        self.children.iter()
    }

    /// Get an iterator over the mutable children, in ascending key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, C> {
        self.children.iter_mut()
    }
}

/// Move the elements of `vec` into storage of exactly their length.
///
/// Unlike [`Vec::shrink_to_fit`], a failed allocation leaves `vec` as it was
/// instead of aborting.
fn try_shrink_exact<T>(vec: &mut Vec<T>) {
    if mem::size_of::<T>() == 0 || vec.capacity() == vec.len() {
        return;
    }

    let mut fitted = Vec::new();
    if fitted.try_reserve_exact(vec.len()).is_ok() {
        fitted.append(vec);
        *vec = fitted;
    }
}

impl<'a, C, V> IntoIterator for &'a ChildMap<C, V> {
    type IntoIter = Iter<'a, C>;
    type Item = (u8, &'a C);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, C, V> IntoIterator for &'a mut ChildMap<C, V> {
    type IntoIter = IterMut<'a, C>;
    type Item = (u8, &'a mut C);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<C, V> IntoIterator for ChildMap<C, V> {
    type IntoIter = IntoIter<C>;
    type Item = (u8, C);

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter().zip(self.children)
    }
}
