//! A tree behind one reader-writer lock.
//!
//! Queries share the read lock and may run concurrently. Updates take the
//! write lock and exclude every other call on the same tree.

use std::sync::Arc;
use std::sync::RwLock;

use crate::combine::Combine;
use crate::error::Error;
use crate::error::Result;
use crate::tree::RangeTree;

/// A cloneable handle; clones share the same tree.
#[derive(Debug)]
pub struct SharedRangeTree<T, C> {
    inner: Arc<RwLock<RangeTree<T, C>>>,
}

impl<T, C> Clone for SharedRangeTree<T, C> {
    fn clone(&self) -> Self {
        SharedRangeTree {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone, C: Combine<T>> SharedRangeTree<T, C> {
    pub fn new(tree: RangeTree<T, C>) -> Self {
        SharedRangeTree {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    pub fn query(&self, start: usize, end: usize) -> Result<T> {
        let tree = self.inner.read().map_err(|_| Error::Poisoned)?;
        return tree.query(start, end);
    }

    pub fn update(&self, index: usize, value: T) -> Result<()> {
        let mut tree = self.inner.write().map_err(|_| Error::Poisoned)?;
        return tree.update(index, value);
    }

    pub fn update_many<I>(&self, updates: I) -> Result<()>
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        let mut tree = self.inner.write().map_err(|_| Error::Poisoned)?;
        return tree.update_many(updates);
    }

    pub fn root(&self) -> Result<T> {
        let tree = self.inner.read().map_err(|_| Error::Poisoned)?;
        return Ok(tree.root().clone());
    }

    pub fn len(&self) -> Result<usize> {
        let tree = self.inner.read().map_err(|_| Error::Poisoned)?;
        return Ok(tree.len());
    }

    /// Run `f` against the tree under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&RangeTree<T, C>) -> R) -> Result<R> {
        let tree = self.inner.read().map_err(|_| Error::Poisoned)?;
        return Ok(f(&tree));
    }

    /// Whether a thread panicked while holding the lock. A poisoned tree
    /// may have a rewritten leaf whose ancestors were never recomputed.
    pub fn is_poisoned(&self) -> bool {
        self.inner.is_poisoned()
    }

    /// Take the tree back once this is the last handle.
    ///
    /// Hands `self` back unchanged while other clones remain. The last
    /// handle on a poisoned lock yields `Ok(Err(Error::Poisoned))`; the
    /// tree is dropped rather than returned.
    pub fn try_unwrap(self) -> std::result::Result<Result<RangeTree<T, C>>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => Ok(lock.into_inner().map_err(|_| Error::Poisoned)),
            Err(inner) => Err(SharedRangeTree { inner }),
        }
    }
}
