//! Growth policies which select the capacity of an array when it runs out of room.

use core::fmt::Debug;

use const_default::ConstDefault;

use crate::storage::utils::min_non_zero_cap;

/// A policy for choosing the next capacity of a growing array.
pub trait Grow: Debug {
    /// Select the new capacity when `minimum` slots are required and
    /// `prev` slots are currently allocated. The result must be at least
    /// `minimum`.
    fn next_capacity<T>(prev: usize, minimum: usize) -> usize;
}

/// Allocate exactly the number of slots required.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowExact;

impl Grow for GrowExact {
    #[inline]
    fn next_capacity<T>(_prev: usize, minimum: usize) -> usize {
        minimum
    }
}

impl ConstDefault for GrowExact {
    const DEFAULT: Self = Self;
}

/// Double the capacity on each reallocation, giving amortized constant
/// time appends.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowDoubling;

impl Grow for GrowDoubling {
    #[inline]
    fn next_capacity<T>(prev: usize, minimum: usize) -> usize {
        let preferred = if prev == 0 {
            min_non_zero_cap::<T>()
        } else {
            prev.saturating_mul(2)
        };
        preferred.max(minimum)
    }
}

impl ConstDefault for GrowDoubling {
    const DEFAULT: Self = Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_sequence() {
        let mut cap = 0;
        let mut seen = [0usize; 5];
        for slot in seen.iter_mut() {
            cap = GrowDoubling::next_capacity::<u32>(cap, cap + 1);
            *slot = cap;
        }
        assert_eq!(seen, [4, 8, 16, 32, 64]);
    }

    #[test]
    fn doubling_respects_minimum() {
        assert_eq!(GrowDoubling::next_capacity::<u8>(0, 3), 8);
        assert_eq!(GrowDoubling::next_capacity::<u8>(8, 100), 100);
        assert_eq!(GrowDoubling::next_capacity::<u8>(usize::MAX / 2 + 1, 5), usize::MAX);
    }

    #[test]
    fn exact_sequence() {
        assert_eq!(GrowExact::next_capacity::<u32>(0, 1), 1);
        assert_eq!(GrowExact::next_capacity::<u32>(4, 5), 5);
    }
}
