//! Trie node representation and iteration

mod child_map;
mod header;
mod iterator;

pub mod inspect;

pub use child_map::*;
pub use header::*;
pub use iterator::*;
