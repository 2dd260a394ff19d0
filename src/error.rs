//! Errors returned by the checked tree operations.

use thiserror::Error;

/// Everything a checked call on a tree can reject.
///
/// Every checked operation validates its arguments before touching the
/// tree, so receiving one of these means nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A tree needs at least one leaf.
    #[error("cannot build a tree from zero leaves")]
    Empty,

    /// Backing storage for the nodes could not be reserved.
    #[error("failed to allocate storage for {nodes} nodes")]
    AllocationFailure { nodes: usize },

    /// Leaf index outside `[0, len)`.
    #[error("leaf index {index} out of range for tree with {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },

    /// Inclusive range with `start > end` or `end >= len`.
    #[error("invalid range [{start}, {end}] for tree with {len} leaves")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// The slot holds no built tree (never built, or already disposed).
    #[error("tree is not built")]
    InvalidTree,

    /// Another thread panicked while holding the tree's lock.
    #[error("tree lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, Error>;
