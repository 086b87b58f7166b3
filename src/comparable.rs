//! Range checks, comparers and default-value helpers.
//!
//! ```rust
//! use pure_ext::comparable::{ComparableExt, DescendingComparer, MembershipExt};
//!
//! assert!(5.between(1, 10));
//! assert!(!1.between(1, 10));
//! assert!(1.in_range(1, 10));
//! assert!(7.is_between(10, 1));
//! assert!(7.is_between_by(1, 10, &DescendingComparer));
//! assert!("b".is_in(&["a", "b"]));
//! ```

use std::cmp::Ordering;

/// Orders two values
pub trait Comparer<T: ?Sized> {
    /// `Less` when `x` sorts before `y`
    fn compare(&self, x: &T, y: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, x: &T, y: &T) -> Ordering {
        self(x, y)
    }
}

/// The natural order of `T`
#[derive(Debug, Clone, Copy, Default)]
pub struct AscendingComparer;

impl<T: PartialOrd + ?Sized> Comparer<T> for AscendingComparer {
    fn compare(&self, x: &T, y: &T) -> Ordering {
        x.partial_cmp(y).unwrap_or(Ordering::Equal)
    }
}

/// The reverse of the natural order of `T`
#[derive(Debug, Clone, Copy, Default)]
pub struct DescendingComparer;

impl<T: PartialOrd + ?Sized> Comparer<T> for DescendingComparer {
    fn compare(&self, x: &T, y: &T) -> Ordering {
        y.partial_cmp(x).unwrap_or(Ordering::Equal)
    }
}

/// Range checks on ordered values.
///
/// `between` excludes both bounds while `in_range` includes them. Values that do not compare
/// (`NaN`) are in no range.
pub trait ComparableExt: PartialOrd + Sized {
    /// `min < self < max`
    fn between(&self, min: Self, max: Self) -> bool {
        *self > min && *self < max
    }

    /// `min <= self <= max`
    fn in_range(&self, min: Self, max: Self) -> bool {
        *self >= min && *self <= max
    }

    /// Inclusive check that accepts the bounds in either order
    fn is_between(&self, min: Self, max: Self) -> bool {
        self.is_between_by(min, max, &AscendingComparer)
    }

    /// Inclusive check under `comparer`, the bounds may come in either order
    fn is_between_by<C>(&self, min: Self, max: Self, comparer: &C) -> bool
    where
        C: Comparer<Self> + ?Sized,
    {
        let (low, high) = if comparer.compare(&min, &max) == Ordering::Less {
            (min, max)
        } else {
            (max, min)
        };

        comparer.compare(self, &low) != Ordering::Less
            && comparer.compare(self, &high) != Ordering::Greater
    }
}

impl<T: PartialOrd> ComparableExt for T {}

/// Membership in a list of candidates
pub trait MembershipExt: PartialEq + Sized {
    /// `self` equals one of `candidates`
    fn is_in(&self, candidates: &[Self]) -> bool {
        candidates.contains(self)
    }

    /// `self` equals none of `candidates`
    fn not_in(&self, candidates: &[Self]) -> bool {
        !self.is_in(candidates)
    }
}

impl<T: PartialEq> MembershipExt for T {}

/// Helpers comparing plain values against their default
pub trait ValueExt: PartialEq + Default + Copy {
    /// Equal to the default value
    fn is_empty(self) -> bool {
        self == Self::default()
    }

    /// Differs from the default value
    fn is_not_empty(self) -> bool {
        !ValueExt::is_empty(self)
    }

    /// `None` for the default value, the value otherwise
    fn to_nullable(self) -> Option<Self> {
        if ValueExt::is_empty(self) {
            None
        } else {
            Some(self)
        }
    }
}

impl<T: PartialEq + Default + Copy> ValueExt for T {}
