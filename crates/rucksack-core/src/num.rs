// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Solver Numeric Trait
//!
//! Unified numeric bound for capacities and weights. Solver components stay
//! generic over the integer type while bound arithmetic, which can go
//! transiently negative, is widened to `i64` via the `Into<i64>`
//! requirement. These are usually the signed integer types up to `i64`;
//! `i128` is excluded on purpose since nothing here needs the range.

use std::hash::Hash;

use num_traits::{PrimInt, Signed};

/// Numeric capabilities required of capacity and weight values.
///
/// The solver never relies on fractional arithmetic; it divides, compares
/// and subtracts capacities and widens to `i64` where a subtraction may
/// undershoot zero. `Hash` is needed because `(profit, weight)` pairs key
/// the weight-class registry.
pub trait SolverNum:
    PrimInt + Signed + Into<i64> + Hash + Send + Sync + std::fmt::Debug + std::fmt::Display
{
}

impl<T> SolverNum for T where
    T: PrimInt + Signed + Into<i64> + Hash + Send + Sync + std::fmt::Debug + std::fmt::Display
{
}

/// Widens a count into the numeric domain.
///
/// Counts in this workspace are bounded by `capacity / weight` of some
/// knapsack, so the conversion cannot overflow for any instance the model
/// accepts; the saturating fallback keeps the function total.
#[inline]
pub fn from_count<T: PrimInt>(count: usize) -> T {
    T::from(count).unwrap_or_else(T::max_value)
}

/// Narrows a numeric value to a count. Values below zero narrow to `0`.
#[inline]
pub fn to_count<T: PrimInt>(value: T) -> usize {
    value.to_usize().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_solver_num<T: SolverNum>() {}

    #[test]
    fn test_standard_signed_types_qualify() {
        assert_solver_num::<i8>();
        assert_solver_num::<i16>();
        assert_solver_num::<i32>();
        assert_solver_num::<i64>();
    }

    #[test]
    fn test_from_count_round_trips_small_values() {
        assert_eq!(from_count::<i64>(17), 17);
        assert_eq!(from_count::<i32>(0), 0);
    }

    #[test]
    fn test_from_count_saturates_out_of_range() {
        assert_eq!(from_count::<i8>(1000), i8::MAX);
    }

    #[test]
    fn test_to_count_clamps_negative_values() {
        assert_eq!(to_count(-4i64), 0);
        assert_eq!(to_count(9i64), 9);
    }
}
