//! Red-black tree with arena-allocated nodes.
//!
//! Inserts rebalance through rotations and recoloring. Removals splice nodes
//! out binary-search-tree style and do not rebalance, so a tree that has seen
//! removals may no longer satisfy the red-black rules (see [`audit::Audit`]).

pub mod audit;
pub mod error;
pub mod rbtree;
pub mod traversal;
pub mod tree;

#[cfg(test)]
mod proptests;
