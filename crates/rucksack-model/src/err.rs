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

/// Errors raised while building an instance.
///
/// All validation happens eagerly in the builder; a successfully built
/// `Instance` is structurally sound. Offending values are widened to `i64`
/// so the error type stays independent of the instance's numeric type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    /// A knapsack was given a capacity `<= 0`.
    NonPositiveCapacity(i64),
    /// A weight class was given a weight `<= 0`.
    NonPositiveWeight(i64),
    /// A weight class was given a profit `<= 0`.
    NonPositiveProfit(i64),
    /// An item was created with an empty restriction set.
    EmptyRestrictions,
    /// An item referenced a knapsack index the builder has not created.
    UnknownKnapsack { index: usize, num_knapsacks: usize },
    /// An item referenced a class index the builder has not created.
    UnknownClass { index: usize, num_classes: usize },
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceError::NonPositiveCapacity(capacity) => {
                write!(f, "knapsack capacity must be positive, got {}", capacity)
            }
            InstanceError::NonPositiveWeight(weight) => {
                write!(f, "class weight must be positive, got {}", weight)
            }
            InstanceError::NonPositiveProfit(profit) => {
                write!(f, "class profit must be positive, got {}", profit)
            }
            InstanceError::EmptyRestrictions => {
                write!(f, "an item must be eligible for at least one knapsack")
            }
            InstanceError::UnknownKnapsack {
                index,
                num_knapsacks,
            } => write!(
                f,
                "restriction references knapsack {} but only {} knapsacks exist",
                index, num_knapsacks
            ),
            InstanceError::UnknownClass { index, num_classes } => write!(
                f,
                "item references class {} but only {} classes exist",
                index, num_classes
            ),
        }
    }
}

impl std::error::Error for InstanceError {}
