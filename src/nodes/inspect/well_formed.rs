use crate::ChildMap;
use std::{error::Error, fmt};

/// An issue with the well-formed-ness of a node. See the documentation on
/// [`WellFormedChecker`] for more context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedNodeError {
    /// The key and child arrays have different lengths
    MismatchedLengths {
        /// The number of key bytes
        num_keys: usize,
        /// The number of children
        num_children: usize,
    },
    /// A key byte was not strictly greater than the one before it
    UnsortedKeys {
        /// The index of the offending key
        index: usize,
        /// The key byte stored before it
        previous: u8,
        /// The offending key byte
        key: u8,
    },
    /// A key byte appears more than once
    DuplicateKey {
        /// The index of the second occurrence
        index: usize,
        /// The duplicated key byte
        key: u8,
    },
    /// A value is stored on a node that is not marked as the end of a string
    ValueWithoutTerminus,
}

impl fmt::Display for MalformedNodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedNodeError::MismatchedLengths {
                num_keys,
                num_children,
            } => write!(
                f,
                "Node has [{num_keys}] keys but [{num_children}] children."
            ),
            MalformedNodeError::UnsortedKeys {
                index,
                previous,
                key,
            } => write!(
                f,
                "Key [{key}] at index [{index}] is smaller than the previous key [{previous}]."
            ),
            MalformedNodeError::DuplicateKey { index, key } => {
                write!(f, "Key [{key}] at index [{index}] is a duplicate.")
            },
            MalformedNodeError::ValueWithoutTerminus => write!(
                f,
                "Node stores a value but is not marked as the end of a string."
            ),
        }
    }
}

impl Error for MalformedNodeError {}

/// Checks the structural invariants of a [`ChildMap`]:
///
///  - there is exactly one child per key byte
///  - the key bytes are strictly ascending, which also makes them unique
///  - a value is only stored on a node marked as the end of a string
///
/// Nodes built through the public API always pass this check. It is run by
/// tests and fuzz targets after each operation to confirm the operation kept
/// the node consistent.
#[derive(Debug, Default)]
pub struct WellFormedChecker {
    nodes_checked: usize,
}

impl WellFormedChecker {
    /// Check a single node and return the first issue found.
    pub fn check<C, V>(node: &ChildMap<C, V>) -> Result<(), MalformedNodeError> {
        let mut checker = WellFormedChecker::default();
        checker.visit(node)
    }

    /// Check another node, counting it towards [`WellFormedChecker::nodes_checked`].
    pub fn visit<C, V>(&mut self, node: &ChildMap<C, V>) -> Result<(), MalformedNodeError> {
        self.nodes_checked += 1;

        let (num_keys, num_children) = (node.keys.len(), node.children.len());
        if num_keys != num_children {
            return Err(MalformedNodeError::MismatchedLengths {
                num_keys,
                num_children,
            });
        }

        for (index, pair) in node.keys.windows(2).enumerate() {
            let (previous, key) = (pair[0], pair[1]);
            if previous == key {
                return Err(MalformedNodeError::DuplicateKey {
                    index: index + 1,
                    key,
                });
            }
            if previous > key {
                return Err(MalformedNodeError::UnsortedKeys {
                    index: index + 1,
                    previous,
                    key,
                });
            }
        }

        if node.header.value().is_some() && !node.header.is_end_of_string() {
            return Err(MalformedNodeError::ValueWithoutTerminus);
        }

        Ok(())
    }

    /// Return the number of nodes checked so far.
    pub fn nodes_checked(&self) -> usize {
        self.nodes_checked
    }
}
