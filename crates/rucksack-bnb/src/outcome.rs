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

use crate::stats::SolverStatistics;
use rucksack_model::assignment::Assignment;

/// Result of a completed solve: the optimal value, the witnessing
/// assignment, and the statistics of the run.
///
/// The search is exhaustive with bound-based pruning, so a returned
/// outcome is always optimal; there is no feasible-but-unproven variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    value: usize,
    assignment: Assignment,
    statistics: SolverStatistics,
}

impl SolveOutcome {
    #[inline]
    pub(crate) fn new(value: usize, assignment: Assignment, statistics: SolverStatistics) -> Self {
        debug_assert_eq!(
            value,
            assignment.value(),
            "outcome value must match its assignment"
        );
        Self {
            value,
            assignment,
            statistics,
        }
    }

    /// Returns the optimal number of placed items.
    #[inline]
    pub fn value(&self) -> usize {
        self.value
    }

    /// Returns the optimal assignment.
    #[inline]
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolveOutcome(value: {}, nodes: {}, time: {:.2?})",
            self.value, self.statistics.nodes_explored, self.statistics.time_total
        )
    }
}
