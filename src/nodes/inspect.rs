//! Diagnostics over [`crate::ChildMap`] nodes: structural validation and
//! memory statistics.

mod node_stats;
mod well_formed;

pub use node_stats::*;
pub use well_formed::*;
