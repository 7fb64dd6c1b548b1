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

use crate::{
    monitor::search_monitor::{PruneReason, SearchMonitor},
    stats::SolverStatistics,
};
use tracing::{debug, trace};

/// Emits search progress through the `tracing` facade.
///
/// Incumbent updates and search enter/exit land on `debug`, per-candidate
/// prunes on `trace`. Install a subscriber to see anything.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TracingMonitor;

impl TracingMonitor {
    /// Creates a new `TracingMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl SearchMonitor for TracingMonitor {
    #[inline(always)]
    fn name(&self) -> &str {
        "TracingMonitor"
    }

    fn on_enter_search(&mut self, root_value: usize, _stats: &SolverStatistics) {
        debug!(root_value, "entering branch-and-bound search");
    }

    fn on_incumbent(&mut self, value: usize, stats: &SolverStatistics) {
        debug!(
            value,
            nodes = stats.nodes_explored,
            "incumbent solution improved"
        );
    }

    fn on_prune(&mut self, reason: PruneReason, stats: &SolverStatistics) {
        trace!(%reason, nodes = stats.nodes_explored, "candidate pruned");
    }

    fn on_exit_search(&mut self, best_value: usize, stats: &SolverStatistics) {
        debug!(
            best_value,
            nodes = stats.nodes_explored,
            time = ?stats.time_total,
            "search finished"
        );
    }
}
