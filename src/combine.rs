//! Associative operators a tree folds with.
//!
//! A range tree only ever asks one thing of its operator: merge the
//! aggregate of a left span with the aggregate of the adjacent right span.
//! That operation must be associative; it need not be commutative. The tree
//! cannot check associativity at runtime, so it is part of the contract of
//! every `Combine` implementation.

/// An associative binary operation over `T`.
///
/// For all `a`, `b`, `c`:
/// `combine(a, combine(b, c)) == combine(combine(a, b), c)`.
pub trait Combine<T> {
    /// Merge the aggregate of a left span with that of the right span.
    fn combine(&self, left: &T, right: &T) -> T;
}

impl<T, F> Combine<T> for F
where
    F: Fn(&T, &T) -> T,
{
    fn combine(&self, left: &T, right: &T) -> T {
        return self(left, right);
    }
}

/// Numeric types with natural identities for the built-in operators.
pub trait Natural: Copy + PartialOrd {
    /// Identity of `Sum`.
    const ZERO: Self;
    /// Greatest value, or `+inf`. Identity of `Min`.
    const GREATEST: Self;
    /// Least value, or `-inf`. Identity of `Max`.
    const LEAST: Self;

    fn plus(self, other: Self) -> Self;
    fn lesser(self, other: Self) -> Self;
    fn greater(self, other: Self) -> Self;
}

macro_rules! natural_int {
    ($($t:ty),*) => {$(
        impl Natural for $t {
            const ZERO: Self = 0;
            const GREATEST: Self = <$t>::MAX;
            const LEAST: Self = <$t>::MIN;

            // Wrapping keeps the sum total and associative.
            fn plus(self, other: Self) -> Self { self.wrapping_add(other) }
            fn lesser(self, other: Self) -> Self { std::cmp::min(self, other) }
            fn greater(self, other: Self) -> Self { std::cmp::max(self, other) }
        }
    )*};
}

macro_rules! natural_float {
    ($($t:ty),*) => {$(
        impl Natural for $t {
            const ZERO: Self = 0.0;
            const GREATEST: Self = <$t>::INFINITY;
            const LEAST: Self = <$t>::NEG_INFINITY;

            fn plus(self, other: Self) -> Self { self + other }
            fn lesser(self, other: Self) -> Self { <$t>::min(self, other) }
            fn greater(self, other: Self) -> Self { <$t>::max(self, other) }
        }
    )*};
}

natural_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
natural_float!(f32, f64);

/// Range sum. Identity `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sum;

/// Range minimum (RMQ). Identity is the greatest representable value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Min;

/// Range maximum. Identity is the least representable value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Max;

impl Sum {
    pub fn identity<T: Natural>() -> T {
        return T::ZERO;
    }
}

impl Min {
    pub fn identity<T: Natural>() -> T {
        return T::GREATEST;
    }
}

impl Max {
    pub fn identity<T: Natural>() -> T {
        return T::LEAST;
    }
}

impl<T: Natural> Combine<T> for Sum {
    fn combine(&self, left: &T, right: &T) -> T {
        return left.plus(*right);
    }
}

impl<T: Natural> Combine<T> for Min {
    fn combine(&self, left: &T, right: &T) -> T {
        return left.lesser(*right);
    }
}

impl<T: Natural> Combine<T> for Max {
    fn combine(&self, left: &T, right: &T) -> T {
        return left.greater(*right);
    }
}
