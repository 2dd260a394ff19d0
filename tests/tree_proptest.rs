//! Property-based tests for the range tree.
//!
//! The recursive reference tree is the oracle. Affine composition is used
//! as the operator wherever order matters, since it is associative but not
//! commutative.

use proptest::prelude::*;
use rangetree::{Combine, Max, Min, RangeTree, Sum};
use reference::affine::compose;
use reference::{naive_fold, Affine, RecursiveTree};

// =============================================================================
// Strategies
// =============================================================================

fn leaves() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000i64..1_000, 1..80)
}

fn affine_leaves() -> impl Strategy<Value = Vec<Affine>> {
    prop::collection::vec((any::<u64>(), any::<u64>()), 1..80)
        .prop_map(|pairs| pairs.into_iter().map(|(m, a)| Affine::new(m, a)).collect())
}

/// Leaves plus an inclusive range inside them.
fn leaves_and_range() -> impl Strategy<Value = (Vec<Affine>, usize, usize)> {
    affine_leaves().prop_flat_map(|leaves| {
        let len = leaves.len();
        (Just(leaves), 0..len, 0..len).prop_map(|(leaves, a, b)| (leaves, a.min(b), a.max(b)))
    })
}

#[derive(Clone, Debug)]
enum Step {
    Update { pos: usize, value: Affine },
    Batch { writes: Vec<(usize, Affine)> },
}

fn steps() -> impl Strategy<Value = Vec<Step>> {
    let value = (any::<u64>(), any::<u64>()).prop_map(|(m, a)| Affine::new(m, a));
    let step = prop_oneof![
        (any::<usize>(), value.clone()).prop_map(|(pos, value)| Step::Update { pos, value }),
        prop::collection::vec((any::<usize>(), value), 0..6)
            .prop_map(|writes| Step::Batch { writes }),
    ];
    prop::collection::vec(step, 0..40)
}

fn apply<C, F>(tree: &mut RangeTree<Affine, C>, model: &mut RecursiveTree<Affine, F>, step: &Step)
where
    C: Combine<Affine>,
    F: Fn(&Affine, &Affine) -> Affine,
{
    let len = tree.len();
    match step {
        Step::Update { pos, value } => {
            tree.update(pos % len, *value).unwrap();
            model.update(pos % len, *value);
        }
        Step::Batch { writes } => {
            let writes: Vec<(usize, Affine)> = writes.iter().map(|(p, v)| (p % len, *v)).collect();
            tree.update_many(writes.clone()).unwrap();
            for (index, value) in writes {
                model.update(index, value);
            }
        }
    }
}

// =============================================================================
// Query correctness
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Sum, min and max queries equal a direct fold over the slice
    #[test]
    fn builtin_queries_match_naive_fold(leaves in leaves(), a in any::<usize>(), b in any::<usize>()) {
        let len = leaves.len();
        let (start, end) = ((a % len).min(b % len), (a % len).max(b % len));

        let sum = RangeTree::sum(leaves.clone()).unwrap();
        let min = RangeTree::min(leaves.clone()).unwrap();
        let max = RangeTree::max(leaves.clone()).unwrap();

        prop_assert_eq!(sum.query(start, end).unwrap(), leaves[start..=end].iter().sum::<i64>());
        prop_assert_eq!(min.query(start, end).unwrap(), *leaves[start..=end].iter().min().unwrap());
        prop_assert_eq!(max.query(start, end).unwrap(), *leaves[start..=end].iter().max().unwrap());
    }

    /// Order-sensitive queries equal the recursive formulation
    #[test]
    fn query_matches_recursive_reference((leaves, start, end) in leaves_and_range()) {
        let tree = RangeTree::build(leaves.clone(), Affine::IDENTITY, compose).unwrap();
        let model = RecursiveTree::new(leaves.clone(), Affine::IDENTITY, compose);

        prop_assert_eq!(tree.query(start, end).unwrap(), model.query(start, end));
        prop_assert_eq!(
            tree.query(start, end).unwrap(),
            naive_fold(&leaves, start, end, Affine::IDENTITY, compose)
        );
    }

    /// query(l, r) == combine(query(l, mid), query(mid + 1, r)) for every split
    #[test]
    fn query_splits_anywhere((leaves, start, end) in leaves_and_range()) {
        let tree = RangeTree::build(leaves, Affine::IDENTITY, compose).unwrap();
        let whole = tree.query(start, end).unwrap();
        for mid in start..end {
            let left = tree.query(start, mid).unwrap();
            let right = tree.query(mid + 1, end).unwrap();
            prop_assert_eq!(compose(&left, &right), whole);
        }
    }

    /// fold over a half-open range matches the inclusive query, and empty is identity
    #[test]
    fn fold_matches_query((leaves, start, end) in leaves_and_range()) {
        let tree = RangeTree::build(leaves, Affine::IDENTITY, compose).unwrap();
        prop_assert_eq!(tree.fold(start..end + 1).unwrap(), tree.query(start, end).unwrap());
        prop_assert_eq!(tree.fold(start..start).unwrap(), Affine::IDENTITY);
    }
}

// =============================================================================
// Invariants under updates
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every internal node equals the combine of its children after any updates
    #[test]
    fn consistency_after_updates(leaves in affine_leaves(), steps in steps()) {
        let mut tree = RangeTree::build(leaves.clone(), Affine::IDENTITY, compose).unwrap();
        let mut model = RecursiveTree::new(leaves, Affine::IDENTITY, compose);

        for step in &steps {
            apply(&mut tree, &mut model, step);
            prop_assert!(tree.is_consistent());
        }

        let len = tree.len();
        for start in 0..len {
            prop_assert_eq!(tree.query(start, len - 1).unwrap(), model.query(start, len - 1));
            prop_assert_eq!(*tree.get(start).unwrap(), model.get(start));
        }
    }

    /// After update(k, v): query(k, k) == v and disjoint ranges are untouched
    #[test]
    fn update_is_local(leaves in leaves(), k in any::<usize>(), v in -1_000i64..1_000) {
        let len = leaves.len();
        let k = k % len;
        let mut tree = RangeTree::sum(leaves.clone()).unwrap();
        let left = if k > 0 { Some(tree.query(0, k - 1).unwrap()) } else { None };
        let right = if k + 1 < len { Some(tree.query(k + 1, len - 1).unwrap()) } else { None };

        tree.update(k, v).unwrap();

        prop_assert_eq!(tree.query(k, k).unwrap(), v);
        if let Some(left) = left {
            prop_assert_eq!(tree.query(0, k - 1).unwrap(), left);
        }
        if let Some(right) = right {
            prop_assert_eq!(tree.query(k + 1, len - 1).unwrap(), right);
        }
    }

    /// A batch leaves the tree exactly as the same writes applied one by one
    #[test]
    fn batch_equals_sequential(leaves in affine_leaves(), steps in steps()) {
        let mut batched = RangeTree::build(leaves.clone(), Affine::IDENTITY, compose).unwrap();
        let mut single = batched.clone();
        let len = leaves.len();

        for step in &steps {
            if let Step::Batch { writes } = step {
                let writes: Vec<(usize, Affine)> = writes.iter().map(|(p, v)| (p % len, *v)).collect();
                batched.update_many(writes.clone()).unwrap();
                for (index, value) in writes {
                    single.update(index, value).unwrap();
                }
            }
        }

        prop_assert_eq!(batched.nodes(), single.nodes());
    }

    /// Out-of-range calls fail and change nothing
    #[test]
    fn rejected_calls_change_nothing(leaves in leaves(), past in 0usize..10) {
        let mut tree = RangeTree::sum(leaves.clone()).unwrap();
        let before = tree.nodes().to_vec();
        let len = leaves.len();

        prop_assert!(tree.update(len + past, 1).is_err());
        prop_assert!(tree.update_many([(0, 5), (len + past, 1)]).is_err());
        prop_assert!(tree.query(0, len + past).is_err());
        prop_assert_eq!(tree.nodes(), &before[..]);
    }
}

// =============================================================================
// Cover and identity laws
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The cover folds to the query, stays logarithmic, and tiles the range
    #[test]
    fn cover_tiles_range((leaves, start, end) in leaves_and_range()) {
        let tree = RangeTree::build(leaves, Affine::IDENTITY, compose).unwrap();
        let cover = tree.cover(start, end).unwrap();

        let folded = cover.iter().fold(Affine::IDENTITY, |acc, &i| compose(&acc, &tree.nodes()[i]));
        prop_assert_eq!(folded, tree.query(start, end).unwrap());

        let levels = usize::BITS - tree.len().leading_zeros();
        prop_assert!(cover.len() <= 2 * levels as usize + 2);

        let mut next = start;
        for &i in &cover {
            let (first, last) = tree.span_of(i).unwrap();
            prop_assert_eq!(first, next);
            next = last + 1;
        }
        prop_assert_eq!(next, end + 1);
    }

    /// combine(identity, x) == combine(x, identity) == x for the built-in operators
    #[test]
    fn identities_are_neutral(x in any::<i64>()) {
        prop_assert_eq!(Sum.combine(&Sum::identity::<i64>(), &x), x);
        prop_assert_eq!(Sum.combine(&x, &Sum::identity::<i64>()), x);
        prop_assert_eq!(Min.combine(&Min::identity::<i64>(), &x), x);
        prop_assert_eq!(Min.combine(&x, &Min::identity::<i64>()), x);
        prop_assert_eq!(Max.combine(&Max::identity::<i64>(), &x), x);
        prop_assert_eq!(Max.combine(&x, &Max::identity::<i64>()), x);
    }
}
