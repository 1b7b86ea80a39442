use std::fmt;

/// A small bitset of per-node flags.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NodeFlags(u8);

impl NodeFlags {
    /// No flags set.
    pub const EMPTY: NodeFlags = NodeFlags(0);
    /// The node is the terminus of some inserted string.
    pub const END_OF_STRING: NodeFlags = NodeFlags(1 << 0);

    /// Return the raw bits of this flag set.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Return true if every bit of `other` is set in `self`.
    pub const fn contains(self, other: NodeFlags) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Set or clear every bit of `other`.
    pub fn set(&mut self, other: NodeFlags, enabled: bool) {
        if enabled {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl fmt::Debug for NodeFlags {
    #[cfg_attr(test, mutants::skip)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeFlags")
            .field("end_of_string", &self.contains(NodeFlags::END_OF_STRING))
            .finish()
    }
}

/// The terminal metadata of a node, independent of its children.
///
/// A value is only ever stored while the `END_OF_STRING` flag is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<V> {
    flags: NodeFlags,
    value: Option<V>,
}

impl<V> Default for Header<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> Header<V> {
    /// Create a new `Header` with no flags and no value.
    pub const fn empty() -> Self {
        Header {
            flags: NodeFlags::EMPTY,
            value: None,
        }
    }

    /// Return the flags of this header.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Return true if the node marks the end of an inserted string.
    pub fn is_end_of_string(&self) -> bool {
        self.flags.contains(NodeFlags::END_OF_STRING)
    }

    /// Set or clear the end of string flag.
    ///
    /// Clearing the flag releases the stored value, which is returned.
    pub fn set_end_of_string(&mut self, end_of_string: bool) -> Option<V> {
        self.flags.set(NodeFlags::END_OF_STRING, end_of_string);
        if end_of_string {
            None
        } else {
            self.value.take()
        }
    }

    /// Return a reference to the stored value, if present.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Return a mutable reference to the stored value, if present.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    /// Store a value, marking the node as a terminus, and return the
    /// previous value.
    pub fn replace_value(&mut self, value: V) -> Option<V> {
        self.flags.set(NodeFlags::END_OF_STRING, true);
        self.value.replace(value)
    }

    /// Remove the stored value, leaving the end of string flag untouched.
    pub fn take_value(&mut self) -> Option<V> {
        self.value.take()
    }

    #[cfg(test)]
    pub(crate) fn force_value_without_flag(&mut self, value: V) {
        self.flags.set(NodeFlags::END_OF_STRING, false);
        self.value = Some(value);
    }
}
