//! AFL fuzz harness for the range tree
//!
//! Every operation is mirrored on the recursive reference tree and the two
//! must agree. The operator composes affine maps, which is associative but
//! not commutative, so any leaf ordering mistake in the iterative query
//! shows up as a mismatch.
//!
//! Properties checked after each step:
//! 1. Query agreement with the reference on the same range
//! 2. Rejected calls leave every node untouched
//! 3. Every internal node equals the combine of its children

use afl::fuzz;
use rangetree::Error;
use rangetree::RangeTree;
use reference::affine::compose;
use reference::ops::{self, Op};
use reference::{Affine, RecursiveTree};

fn main() {
    fuzz!(|data: &[u8]| {
        let (len, mut remaining) = ops::initial(data);
        let leaves: Vec<Affine> = (0..len).map(|i| Affine::from_seed(i as u64)).collect();

        let mut tree = RangeTree::build(leaves.clone(), Affine::IDENTITY, compose).unwrap();
        let mut model = RecursiveTree::new(leaves, Affine::IDENTITY, compose);

        while let Some((op, rest)) = Op::from_bytes(remaining) {
            remaining = rest;

            match op {
                Op::Update { pos_frac, seed } => {
                    let index = ops::scale(pos_frac, len);
                    let value = Affine::from_seed(seed as u64);
                    tree.update(index, value).unwrap();
                    model.update(index, value);
                    assert_eq!(tree.query(index, index).unwrap(), value);
                }

                Op::Query { start_frac, end_frac } => {
                    let a = ops::scale(start_frac, len);
                    let b = ops::scale(end_frac, len);
                    let (start, end) = (a.min(b), a.max(b));
                    assert_eq!(
                        tree.query(start, end).unwrap(),
                        model.query(start, end),
                        "query [{}, {}] disagrees with reference",
                        start,
                        end
                    );
                }

                Op::Batch { pos_frac, count, seed } => {
                    let first = ops::scale(pos_frac, len);
                    let last = (first + count as usize).min(len);
                    let writes: Vec<(usize, Affine)> = (first..last)
                        .map(|i| (i, Affine::from_seed(seed as u64 + i as u64)))
                        .collect();
                    tree.update_many(writes.clone()).unwrap();
                    for (index, value) in writes {
                        model.update(index, value);
                    }
                }

                Op::OutOfRange { past } => {
                    let before = tree.nodes().to_vec();
                    let index = len + past as usize;
                    assert_eq!(
                        tree.update(index, Affine::IDENTITY),
                        Err(Error::IndexOutOfRange { index, len })
                    );
                    assert!(tree.query(0, index).is_err());
                    assert_eq!(tree.nodes(), &before[..], "rejected call mutated the tree");
                }
            }

            assert!(tree.is_consistent(), "tree invariant broken after {:?}", op);
        }

        // Full range must match as well
        assert_eq!(tree.query(0, len - 1).unwrap(), model.query(0, len - 1));
    });
}
