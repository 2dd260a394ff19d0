//! Many point updates, one pass over the ancestors.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::combine::Combine;
use crate::error::Result;
use crate::tree::RangeTree;

impl<T: Clone, C: Combine<T>> RangeTree<T, C> {
    /// Apply a batch of `(index, value)` writes.
    ///
    /// Every index is checked before any leaf is written. Later writes to
    /// the same index win. Shared ancestors are recomputed once, children
    /// before parents.
    pub fn update_many<I>(&mut self, updates: I) -> Result<()>
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        let updates: SmallVec<[(usize, T); 16]> = updates.into_iter().collect();
        for (index, _) in &updates {
            self.check_index(*index)?;
        }
        if updates.is_empty() {
            return Ok(());
        }

        let offset = self.leaf_offset();
        #[cfg(feature = "tracing")]
        let count = updates.len();
        let mut dirty = FxHashSet::default();
        for (index, value) in updates {
            let mut i = offset + index;
            self.nodes[i] = value;
            while i > 0 {
                i = (i - 1) / 2;
                // Everything above an already dirty node is dirty too.
                if !dirty.insert(i) {
                    break;
                }
            }
        }

        let mut order: Vec<usize> = dirty.into_iter().collect();
        order.sort_unstable_by(|a, b| b.cmp(a));
        for &i in &order {
            self.pull(i);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(updates = count, recomputed = order.len(), "batch applied");

        return Ok(());
    }
}
