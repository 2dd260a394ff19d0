//! A tree slot with an explicit lifecycle.
//!
//! `RangeTree` itself cannot be used after disposal: `into_leaves` consumes
//! it. `TreeSlot` is for hosts that keep a tree in a long-lived field and
//! need the `Uninitialized -> Built -> Disposed` states to be observable,
//! with every call outside `Built` rejected as `Error::InvalidTree`.

use std::mem;

use crate::combine::Combine;
use crate::error::Error;
use crate::error::Result;
use crate::tree::RangeTree;

#[derive(Clone, Debug)]
pub enum TreeSlot<T, C> {
    Uninitialized,
    Built(RangeTree<T, C>),
    Disposed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Uninitialized,
    Built,
    Disposed,
}

impl<T, C> Default for TreeSlot<T, C> {
    fn default() -> Self {
        TreeSlot::Uninitialized
    }
}

impl<T: Clone, C: Combine<T>> TreeSlot<T, C> {
    pub fn new() -> Self {
        TreeSlot::Uninitialized
    }

    pub fn state(&self) -> SlotState {
        match self {
            TreeSlot::Uninitialized => SlotState::Uninitialized,
            TreeSlot::Built(_) => SlotState::Built,
            TreeSlot::Disposed => SlotState::Disposed,
        }
    }

    /// Build the tree. Only valid once, from `Uninitialized`.
    ///
    /// A failed build leaves the slot uninitialized.
    pub fn build<I>(&mut self, leaves: I, identity: T, combine: C) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        if !matches!(self, TreeSlot::Uninitialized) {
            return Err(Error::InvalidTree);
        }
        *self = TreeSlot::Built(RangeTree::build(leaves, identity, combine)?);
        return Ok(());
    }

    pub fn tree(&self) -> Result<&RangeTree<T, C>> {
        match self {
            TreeSlot::Built(tree) => Ok(tree),
            _ => Err(Error::InvalidTree),
        }
    }

    pub fn tree_mut(&mut self) -> Result<&mut RangeTree<T, C>> {
        match self {
            TreeSlot::Built(tree) => Ok(tree),
            _ => Err(Error::InvalidTree),
        }
    }

    pub fn update(&mut self, index: usize, value: T) -> Result<()> {
        return self.tree_mut()?.update(index, value);
    }

    pub fn query(&self, start: usize, end: usize) -> Result<T> {
        return self.tree()?.query(start, end);
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        return self.tree()?.get(index);
    }

    pub fn root(&self) -> Result<&T> {
        return Ok(self.tree()?.root());
    }

    /// Release the tree, returning its leaves. `Disposed` is terminal.
    pub fn dispose(&mut self) -> Result<Vec<T>> {
        match mem::replace(self, TreeSlot::Disposed) {
            TreeSlot::Built(tree) => Ok(tree.into_leaves()),
            other => {
                *self = other;
                Err(Error::InvalidTree)
            }
        }
    }
}
