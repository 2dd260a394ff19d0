//! Reference implementations for checking the flat range tree.
//!
//! Nothing here is fast. Everything here is written the obvious way so it
//! can serve as an oracle in tests, fuzzing and benchmarks:
//!
//! - `RecursiveTree`: the textbook top-down segment tree, where
//!   `query(l, r) = combine(query(l, mid), query(mid + 1, r))`.
//! - `naive_fold`: a left-to-right fold over a slice.
//! - `Affine`: a non-commutative operator for catching ordering bugs.
//! - `ops`: the byte-driven operation stream shared by the fuzz harness and
//!   the crash reproducer.
//!
//! # Example
//!
//! ```
//! use reference::RecursiveTree;
//!
//! let add = |a: &i64, b: &i64| a + b;
//! let mut tree = RecursiveTree::new(vec![1, 2, 3, 4], 0, add);
//! assert_eq!(tree.query(1, 2), 5);
//! tree.update(0, 10);
//! assert_eq!(tree.query(0, 3), 19);
//! ```

pub mod affine;
pub mod ops;

pub use affine::Affine;

/// Fold `leaves[start..=end]` left to right.
pub fn naive_fold<T, F>(leaves: &[T], start: usize, end: usize, identity: T, combine: F) -> T
where
    F: Fn(&T, &T) -> T,
{
    let mut acc = identity;
    for leaf in &leaves[start..=end] {
        acc = combine(&acc, leaf);
    }
    return acc;
}

/// A top-down recursive segment tree.
///
/// Node 1 covers `[0, n)`; node `k` covering `[lo, hi)` has children
/// `2k` over `[lo, mid)` and `2k + 1` over `[mid, hi)`.
pub struct RecursiveTree<T, F> {
    nodes: Vec<T>,
    len: usize,
    identity: T,
    combine: F,
}

impl<T: Clone, F: Fn(&T, &T) -> T> RecursiveTree<T, F> {
    pub fn new(leaves: Vec<T>, identity: T, combine: F) -> Self {
        assert!(!leaves.is_empty(), "reference tree needs a leaf");
        let len = leaves.len();
        let mut tree = RecursiveTree {
            nodes: vec![identity.clone(); 4 * len],
            len,
            identity,
            combine,
        };
        tree.build(1, 0, len, &leaves);
        return tree;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn build(&mut self, node: usize, lo: usize, hi: usize, leaves: &[T]) {
        if hi - lo == 1 {
            self.nodes[node] = leaves[lo].clone();
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.build(2 * node, lo, mid, leaves);
        self.build(2 * node + 1, mid, hi, leaves);
        self.nodes[node] = (self.combine)(&self.nodes[2 * node], &self.nodes[2 * node + 1]);
    }

    /// Inclusive range fold. Panics on an invalid range.
    pub fn query(&self, start: usize, end: usize) -> T {
        assert!(start <= end && end < self.len, "invalid range [{start}, {end}]");
        return self.query_node(1, 0, self.len, start, end + 1);
    }

    fn query_node(&self, node: usize, lo: usize, hi: usize, start: usize, end: usize) -> T {
        if end <= lo || hi <= start {
            return self.identity.clone();
        }
        if start <= lo && hi <= end {
            return self.nodes[node].clone();
        }
        let mid = lo + (hi - lo) / 2;
        let left = self.query_node(2 * node, lo, mid, start, end);
        let right = self.query_node(2 * node + 1, mid, hi, start, end);
        return (self.combine)(&left, &right);
    }

    pub fn update(&mut self, index: usize, value: T) {
        assert!(index < self.len, "index {index} out of range");
        self.update_node(1, 0, self.len, index, value);
    }

    fn update_node(&mut self, node: usize, lo: usize, hi: usize, index: usize, value: T) {
        if hi - lo == 1 {
            self.nodes[node] = value;
            return;
        }
        let mid = lo + (hi - lo) / 2;
        if index < mid {
            self.update_node(2 * node, lo, mid, index, value);
        } else {
            self.update_node(2 * node + 1, mid, hi, index, value);
        }
        self.nodes[node] = (self.combine)(&self.nodes[2 * node], &self.nodes[2 * node + 1]);
    }

    pub fn get(&self, index: usize) -> T {
        return self.query(index, index);
    }
}
