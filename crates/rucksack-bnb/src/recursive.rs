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

//! # Recursive Search Controller
//!
//! Drives the bound-and-branch logic with plain call-stack recursion —
//! the simplest controller to reason about. Recursion depth is bounded by
//! the cursor range (`num_classes × num_knapsacks`), which is fine for
//! moderate instances; [`crate::iterative::IterativeSolver`] exists for
//! the rest.

use crate::{
    err::SolveError,
    monitor::{no_op::NoOperationMonitor, search_monitor::SearchMonitor},
    outcome::SolveOutcome,
    session::{Cursor, Probe, SearchSession},
};
use rucksack_core::num::SolverNum;
use rucksack_matching::state::MatchingState;
use rucksack_model::instance::Instance;

impl<'a, T, M> SearchSession<'a, T, M>
where
    T: SolverNum,
    M: SearchMonitor,
{
    /// Explores the subtree below `cursor` recursively.
    ///
    /// At the advanced cursor position the candidate counts are visited in
    /// two runs over a private clone of the snapshot list: upwards from
    /// the inherited count to the slot budget, then downwards to zero.
    /// Each surviving candidate's subtree is explored before the next
    /// candidate of the same direction. A bound-dominated candidate only
    /// skips its own subtree — the optimistic bound grows again towards
    /// the low end of the downward run, so the run itself continues until
    /// a candidate is structurally infeasible.
    pub(crate) fn run_recursive(
        &mut self,
        cursor: Option<Cursor>,
        states: &[MatchingState<T>],
    ) {
        let Some((next, locked)) = self.advance(cursor, states) else {
            return;
        };
        self.current_value += locked;
        let depth = (next.class * self.instance.num_knapsacks() + next.knapsack + 1) as u64;
        self.stats.on_depth_update(depth);

        let current = states[next.class].count_at(next.knapsack);
        let available = self.available_at(next, states);

        let mut working = states.to_vec();
        for fixed_to in current..=available {
            match self.probe(next, fixed_to, &mut working) {
                Probe::Explore => self.run_recursive(Some(next), &working),
                Probe::Pruned => {}
                Probe::Infeasible => break,
            }
        }

        // Cloning is skipped entirely when there is nothing to lower.
        if current > 0 {
            let mut working = states.to_vec();
            for fixed_to in (0..current).rev() {
                match self.probe(next, fixed_to, &mut working) {
                    Probe::Explore => self.run_recursive(Some(next), &working),
                    Probe::Pruned => {}
                    Probe::Infeasible => break,
                }
            }
        }

        self.current_value -= locked;
    }
}

/// Branch-and-bound solver with the recursive controller.
///
/// The solve result is cached: a second `solve()` call returns the stored
/// outcome without re-running the search.
pub struct RecursiveSolver<'a, T> {
    instance: &'a Instance<T>,
    outcome: Option<SolveOutcome>,
}

impl<'a, T> RecursiveSolver<'a, T>
where
    T: SolverNum,
{
    /// Creates a solver for the given instance.
    #[inline]
    pub fn new(instance: &'a Instance<T>) -> Self {
        Self {
            instance,
            outcome: None,
        }
    }

    /// Returns `true` once a solve has completed.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Solves the instance (or returns the cached outcome).
    pub fn solve(&mut self) -> Result<SolveOutcome, SolveError> {
        self.solve_with_monitor(NoOperationMonitor::new())
    }

    /// Solves the instance, reporting progress to `monitor`. When a cached
    /// outcome exists the monitor is not invoked at all.
    pub fn solve_with_monitor<M>(&mut self, monitor: M) -> Result<SolveOutcome, SolveError>
    where
        M: SearchMonitor,
    {
        if let Some(outcome) = &self.outcome {
            return Ok(outcome.clone());
        }

        let mut session = SearchSession::new(self.instance, monitor)?;
        let states = session.prepare();
        if session.has_search_space() {
            session.run_recursive(None, &states);
        }
        let outcome = session.finish();
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }
}
