#![deny(
    missing_docs,
    unsafe_code,
    deprecated_in_future,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    rustdoc::invalid_codeblock_attributes
)]
#![doc(
    html_playground_url = "https://play.rust-lang.org/",
    test(attr(deny(warnings)))
)]

//! Byte-keyed trie nodes
//!
//! A [`ChildMap`] is one level of a prefix tree: an ordered map from single
//! key bytes to owned children, plus an end of string flag and an optional
//! terminal value. Children are stored in sorted parallel arrays that are
//! resized to fit exactly, which keeps the many small nodes of a trie
//! compact.
//!
//! Children can be enumerated with the borrowing iterators of [`ChildMap`],
//! or with a [`NodeIterator`] cursor, which does not hold a borrow between
//! steps and reports [`NodeError::ConcurrentModification`] if the node
//! changed size in the meantime.
//!
//! ```
//! use trienode::{ChildMap, NodeIterator};
//!
//! struct TrieNode(ChildMap<TrieNode, u32>);
//!
//! let mut root = TrieNode(ChildMap::new());
//! let mut node = &mut root;
//! for byte in b"hi" {
//!     if !node.0.contains(byte).unwrap() {
//!         node.0.set(byte, TrieNode(ChildMap::new())).unwrap();
//!     }
//!     node = node.0.get_mut(byte).unwrap();
//! }
//! node.0.set_value(7);
//!
//! let h = root.0.get("h").unwrap();
//! assert_eq!(h.0.get('i').unwrap().0.value().unwrap(), &7);
//!
//! let mut cursor = NodeIterator::keys(&root.0);
//! assert_eq!(cursor.next(&root.0).unwrap(), Some(b'h'));
//! assert_eq!(cursor.next(&root.0).unwrap(), None);
//! ```

mod error;
mod key;
mod nodes;

pub use error::*;
pub use key::*;
pub use nodes::{inspect, *};

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
