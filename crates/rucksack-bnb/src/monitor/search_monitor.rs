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

/// Why a branch candidate was cut off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
    /// The requested count is structurally unreachable (no augmenting
    /// path, not enough items, or committed capacity exceeded).
    Infeasible,
    /// The optimistic bound fell to the incumbent value.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Observes the progress of a branch-and-bound run.
///
/// All hooks default to no-ops so implementors only override what they
/// need. The engine drives the hooks in this order: `on_enter_search`
/// once, then per candidate `on_node` followed by either `on_prune` or
/// (on improvement) `on_incumbent`, and finally `on_exit_search` once.
pub trait SearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once after the initial matchings are in place.
    fn on_enter_search(&mut self, _root_value: usize, _stats: &SolverStatistics) {}

    /// Called for every branch candidate before its bounds are computed.
    fn on_node(&mut self, _stats: &SolverStatistics) {}

    /// Called when a candidate improves the incumbent solution.
    fn on_incumbent(&mut self, _value: usize, _stats: &SolverStatistics) {}

    /// Called when a candidate is cut off.
    fn on_prune(&mut self, _reason: PruneReason, _stats: &SolverStatistics) {}

    /// Called once when the search has finished.
    fn on_exit_search(&mut self, _best_value: usize, _stats: &SolverStatistics) {}
}

impl std::fmt::Debug for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
