//! Affine maps over wrapping `u64`, composed left then right.
//!
//! Composition of affine maps is associative but not commutative, so a
//! tree folded with `Affine::then` returns the right answer only if it
//! keeps leaves in order.

/// The map `x -> mul * x + add`, modulo 2^64.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Affine {
    pub mul: u64,
    pub add: u64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine { mul: 1, add: 0 };

    pub fn new(mul: u64, add: u64) -> Self {
        Affine { mul, add }
    }

    /// Derive a map from a small seed; never the identity.
    pub fn from_seed(seed: u64) -> Self {
        return Affine {
            mul: seed.wrapping_mul(2).wrapping_add(3),
            add: seed.wrapping_mul(7).wrapping_add(1),
        };
    }

    pub fn apply(&self, x: u64) -> u64 {
        self.mul.wrapping_mul(x).wrapping_add(self.add)
    }

    /// Apply `self`, then `next`.
    pub fn then(&self, next: &Affine) -> Affine {
        return Affine {
            mul: next.mul.wrapping_mul(self.mul),
            add: next.mul.wrapping_mul(self.add).wrapping_add(next.add),
        };
    }
}

/// `Affine::then` as a free function, usable as a tree operator.
pub fn compose(left: &Affine, right: &Affine) -> Affine {
    left.then(right)
}
