//! Canonical decomposition of a leaf range into tree nodes.

use smallvec::SmallVec;

use crate::combine::Combine;
use crate::error::Result;
use crate::tree::RangeTree;

/// Flat node indices covering a range, in leaf order.
pub type Cover = SmallVec<[usize; 32]>;

impl<T: Clone, C: Combine<T>> RangeTree<T, C> {
    /// The nodes `query(start, end)` folds, left to right.
    ///
    /// Every leaf of `[start, end]` lies under exactly one returned node
    /// and at most two nodes are taken per level.
    pub fn cover(&self, start: usize, end: usize) -> Result<Cover> {
        self.check_range(start, end)?;

        let mut lo = start + self.leaf_count;
        let mut hi = end + 1 + self.leaf_count;
        let mut left = Cover::new();
        let mut right = Cover::new();

        while lo < hi {
            if lo & 1 == 1 {
                left.push(lo - 1);
                lo += 1;
            }
            if hi & 1 == 1 {
                hi -= 1;
                right.push(hi - 1);
            }
            lo >>= 1;
            hi >>= 1;
        }

        left.extend(right.into_iter().rev());
        return Ok(left);
    }

    /// Leaf span `[first, last]` under flat node `i`, if it is contiguous.
    ///
    /// Nodes that straddle two leaf levels return `None`.
    pub fn span_of(&self, i: usize) -> Option<(usize, usize)> {
        if i >= self.nodes.len() {
            return None;
        }

        // Descend until the leftmost descendant is a leaf; the rightmost
        // must then be a leaf on the same level.
        let offset = self.leaf_offset();
        let (mut first, mut last) = (i, i);
        while first < offset {
            first = 2 * first + 1;
            last = 2 * last + 2;
        }
        if last >= self.nodes.len() {
            return None;
        }
        return Some((first - offset, last - offset));
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::tree::RangeTree;

    #[test]
    fn cover_folds_to_query() {
        let tree = RangeTree::sum([3, 1, 4, 1, 5, 9, 2, 6]).unwrap();
        for start in 0..8 {
            for end in start..8 {
                let cover = tree.cover(start, end).unwrap();
                let folded: i32 = cover.iter().map(|&i| tree.nodes()[i]).sum();
                assert_eq!(folded, tree.query(start, end).unwrap());
            }
        }
    }

    #[test]
    fn whole_power_of_two_is_root() {
        let tree = RangeTree::sum([1, 2, 3, 4]).unwrap();
        assert_eq!(tree.cover(0, 3).unwrap().as_slice(), &[0]);
        assert_eq!(tree.cover(1, 2).unwrap().as_slice(), &[4, 5]);
        assert_eq!(tree.cover(0, 1).unwrap().as_slice(), &[1]);
    }

    #[test]
    fn spans() {
        let tree = RangeTree::sum([1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(tree.span_of(3), Some((2, 3)));
        assert_eq!(tree.span_of(2), Some((0, 1)));
        assert_eq!(tree.span_of(1), Some((2, 5)));
        assert_eq!(tree.span_of(0), None);
        assert_eq!(tree.span_of(7), Some((2, 2)));
        assert_eq!(tree.span_of(11), None);
    }

    #[test]
    fn rejects_bad_range() {
        let tree = RangeTree::sum([1, 2]).unwrap();
        assert_eq!(tree.cover(1, 0).unwrap_err(), Error::InvalidRange { start: 1, end: 0, len: 2 });
        assert_eq!(tree.cover(0, 2).unwrap_err(), tree.query(0, 2).unwrap_err());
    }
}
