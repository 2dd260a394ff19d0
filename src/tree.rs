//! Array-backed range tree.
//!
//! A complete binary tree over `n` leaves is stored in a flat vector of
//! `2n - 1` nodes. For flat index `i` the children are `2i + 1` and
//! `2i + 2`, and the parent of `i > 0` is `(i - 1) / 2`. Internal nodes
//! occupy `0..n - 1`, leaves occupy `n - 1..2n - 1` in order.
//!
//! Invariant: for every internal node `i`,
//! `nodes[i] == combine(nodes[2i + 1], nodes[2i + 2])`.
//!
//! Point updates and range queries are both `O(log n)` combine calls.
//! When `n` is not a power of two some internal nodes straddle two levels
//! of leaves and hold an aggregate of non-adjacent leaves. The bottom-up
//! query never reads such a node.

use std::fmt;
use std::ops::Bound;
use std::ops::RangeBounds;

use crate::combine::Combine;
use crate::combine::Max;
use crate::combine::Min;
use crate::combine::Natural;
use crate::combine::Sum;
use crate::error::Error;
use crate::error::Result;

/// A range tree over `T`, folded with `C`.
#[derive(Clone, Debug)]
pub struct RangeTree<T, C> {
    pub(crate) nodes: Vec<T>,
    pub(crate) identity: T,
    pub(crate) combine: C,
    pub(crate) leaf_count: usize,
}

/// Reserve storage for a tree over `leaf_count` leaves, failing cleanly.
fn allocate<T>(leaf_count: usize) -> Result<Vec<T>> {
    let total = leaf_count
        .checked_mul(2)
        .and_then(|twice| twice.checked_sub(1))
        .ok_or(Error::AllocationFailure { nodes: usize::MAX })?;

    let mut nodes = Vec::new();
    nodes
        .try_reserve_exact(total)
        .map_err(|_| Error::AllocationFailure { nodes: total })?;
    return Ok(nodes);
}

impl<T: Clone, C: Combine<T>> RangeTree<T, C> {
    /// Build a tree from its leaves.
    ///
    /// `identity` must satisfy `combine(e, x) == combine(x, e) == x`, and
    /// `combine` must be associative over every value the tree will hold.
    pub fn build<I>(leaves: I, identity: T, combine: C) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let leaves: Vec<T> = leaves.into_iter().collect();
        let leaf_count = leaves.len();
        if leaf_count == 0 {
            return Err(Error::Empty);
        }

        let mut nodes = allocate(leaf_count)?;
        nodes.resize(leaf_count - 1, identity.clone());
        nodes.extend(leaves);

        let mut tree = RangeTree {
            nodes,
            identity,
            combine,
            leaf_count,
        };
        for i in (0..leaf_count - 1).rev() {
            tree.pull(i);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(leaves = leaf_count, nodes = tree.nodes.len(), "range tree built");

        return Ok(tree);
    }

    /// Recompute internal node `i` from its children.
    #[inline]
    pub(crate) fn pull(&mut self, i: usize) {
        let merged = self.combine.combine(&self.nodes[2 * i + 1], &self.nodes[2 * i + 2]);
        self.nodes[i] = merged;
    }

    #[inline]
    pub(crate) fn leaf_offset(&self) -> usize {
        self.leaf_count - 1
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.leaf_count {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(index, len = self.leaf_count, "rejected update: index out of range");

        return Err(Error::IndexOutOfRange {
            index,
            len: self.leaf_count,
        });
    }

    pub(crate) fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start <= end && end < self.leaf_count {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(start, end, len = self.leaf_count, "rejected range");

        return Err(Error::InvalidRange {
            start,
            end,
            len: self.leaf_count,
        });
    }

    /// Replace leaf `index` and recompute its ancestors.
    pub fn update(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        self.update_unchecked(index, value);
        return Ok(());
    }

    /// Replace leaf `index` with `f(old)`.
    pub fn update_with<F>(&mut self, index: usize, f: F) -> Result<()>
    where
        F: FnOnce(&T) -> T,
    {
        self.check_index(index)?;
        let value = f(&self.nodes[self.leaf_offset() + index]);
        self.update_unchecked(index, value);
        return Ok(());
    }

    /// Point update without the bounds check.
    ///
    /// For callers that already validated `index`. Panics if it is out of
    /// range.
    pub fn update_unchecked(&mut self, index: usize, value: T) {
        debug_assert!(index < self.leaf_count);
        let mut i = self.leaf_offset() + index;
        self.nodes[i] = value;
        while i > 0 {
            i = (i - 1) / 2;
            self.pull(i);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(index, "leaf updated");
    }

    /// Fold the leaves in the inclusive range `[start, end]`.
    pub fn query(&self, start: usize, end: usize) -> Result<T> {
        self.check_range(start, end)?;
        return Ok(self.query_unchecked(start, end));
    }

    /// Range query without the bounds check.
    ///
    /// For callers that already validated `start <= end < len()`. An
    /// invalid range trips a debug assertion; in release builds it yields
    /// an unspecified value or panics, never reading outside the tree.
    pub fn query_unchecked(&self, start: usize, end: usize) -> T {
        debug_assert!(start <= end && end < self.leaf_count);
        return self.fold_span(start, end + 1);
    }

    /// Fold any Rust range of leaves. An empty range yields the identity.
    ///
    /// A rejected range is reported in inclusive form, the same shape
    /// `query` uses: `fold(2..9)` reports `[2, 8]` and `fold(3..2)` reports
    /// `[3, 1]`.
    pub fn fold<R>(&self, range: R) -> Result<T>
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.leaf_count,
        };

        if start > end || end > self.leaf_count {
            #[cfg(feature = "tracing")]
            tracing::warn!(start, end, len = self.leaf_count, "rejected fold: invalid range");

            return Err(Error::InvalidRange {
                start,
                end: end.saturating_sub(1),
                len: self.leaf_count,
            });
        }
        return Ok(self.fold_span(start, end));
    }

    /// Bottom-up fold over the half-open leaf span `[start, end)`.
    ///
    /// Works on 1-based heap positions (flat index + 1), where a left child
    /// is even. A node joins the left accumulator when the left edge sits on
    /// a right child and the right accumulator when the right edge sits past
    /// a left child, so every leaf is counted once and the left and right
    /// boundaries stay in order.
    fn fold_span(&self, start: usize, end: usize) -> T {
        let mut lo = start + self.leaf_count;
        let mut hi = end + self.leaf_count;
        let mut left = self.identity.clone();
        let mut right = self.identity.clone();

        while lo < hi {
            if lo & 1 == 1 {
                left = self.combine.combine(&left, &self.nodes[lo - 1]);
                lo += 1;
            }
            if hi & 1 == 1 {
                hi -= 1;
                right = self.combine.combine(&self.nodes[hi - 1], &right);
            }
            lo >>= 1;
            hi >>= 1;
        }

        return self.combine.combine(&left, &right);
    }

    /// Consume the tree, returning its leaves in order.
    pub fn into_leaves(mut self) -> Vec<T> {
        let offset = self.leaf_offset();
        return self.nodes.split_off(offset);
    }
}

impl<T, C> RangeTree<T, C> {
    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaf_count
    }

    /// Always false: a tree has at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    /// Number of stored nodes, `2 * len() - 1`.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Size in bytes of a single node.
    pub fn node_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Leaf at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.leaf_count {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.leaf_count,
            });
        }
        return Ok(&self.nodes[self.leaf_count - 1 + index]);
    }

    /// Aggregate of every leaf, stored at flat index 0.
    ///
    /// When `len()` is not a power of two the root folds the leaves out of
    /// order, so for a non-commutative operator use `query(0, len() - 1)`.
    pub fn root(&self) -> &T {
        &self.nodes[0]
    }

    pub fn identity(&self) -> &T {
        &self.identity
    }

    pub fn combiner(&self) -> &C {
        &self.combine
    }

    /// Storage holds exactly `2n - 1` nodes for `n >= 1` leaves.
    pub fn is_valid(&self) -> bool {
        self.leaf_count > 0 && self.nodes.len() == 2 * self.leaf_count - 1
    }

    /// Leaves in order.
    pub fn leaves(&self) -> &[T] {
        &self.nodes[self.leaf_count - 1..]
    }

    /// Every node in flat order, internal nodes first.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }
}

impl<T, C> RangeTree<T, C>
where
    T: Clone + PartialEq,
    C: Combine<T>,
{
    /// Re-derive every internal node and compare with what is stored.
    pub fn is_consistent(&self) -> bool {
        return (0..self.leaf_count - 1).all(|i| {
            self.nodes[i] == self.combine.combine(&self.nodes[2 * i + 1], &self.nodes[2 * i + 2])
        });
    }
}

impl<T: Natural> RangeTree<T, Sum> {
    /// Range-sum tree, identity `0`.
    pub fn sum<I: IntoIterator<Item = T>>(leaves: I) -> Result<Self> {
        return RangeTree::build(leaves, Sum::identity(), Sum);
    }
}

impl<T: Natural> RangeTree<T, Min> {
    /// Range-minimum tree, identity the greatest value.
    pub fn min<I: IntoIterator<Item = T>>(leaves: I) -> Result<Self> {
        return RangeTree::build(leaves, Min::identity(), Min);
    }
}

impl<T: Natural> RangeTree<T, Max> {
    /// Range-maximum tree, identity the least value.
    pub fn max<I: IntoIterator<Item = T>>(leaves: I) -> Result<Self> {
        return RangeTree::build(leaves, Max::identity(), Max);
    }
}

/// Prints every node in flat order, space separated.
impl<T: fmt::Display, C> fmt::Display for RangeTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
