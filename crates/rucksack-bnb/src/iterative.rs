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

//! # Iterative Search Controller
//!
//! The mechanical worklist transform of the recursive controller: every
//! pending branch candidate lives as an explicit frame on a single stack,
//! popped depth-first. A surviving candidate first pushes its own
//! direction continuation and then its child expansion, so the children
//! pop first — reproducing the recursive decision sequence exactly while
//! keeping the call stack flat. Use this controller when the cursor range
//! (`num_classes × num_knapsacks`) could outgrow the thread stack.

use crate::{
    err::SolveError,
    monitor::{no_op::NoOperationMonitor, search_monitor::SearchMonitor},
    outcome::SolveOutcome,
    session::{Cursor, Probe, SearchSession},
};
use rucksack_core::num::SolverNum;
use rucksack_matching::state::MatchingState;
use rucksack_model::instance::Instance;

/// Which way a direction run moves the candidate count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Increase,
    Decrease,
}

/// One pending branch candidate on the worklist.
///
/// `base_value` is the sum of locked class totals at this cursor, restored
/// into the session before probing; `extent` is the inclusive upper limit
/// of the increase run (the decrease run always bottoms out at zero).
struct BranchFrame<T> {
    cursor: Cursor,
    fixed_to: usize,
    direction: Direction,
    extent: usize,
    base_value: usize,
    states: Vec<MatchingState<T>>,
}

impl<T> BranchFrame<T> {
    /// The next candidate of the same direction run, if any remains.
    #[inline]
    fn next_candidate(&self) -> Option<usize> {
        match self.direction {
            Direction::Increase => {
                (self.fixed_to < self.extent).then(|| self.fixed_to + 1)
            }
            Direction::Decrease => self.fixed_to.checked_sub(1),
        }
    }
}

impl<'a, T, M> SearchSession<'a, T, M>
where
    T: SolverNum,
    M: SearchMonitor,
{
    /// Explores the whole branch tree with an explicit worklist.
    pub(crate) fn run_iterative(&mut self, initial: &[MatchingState<T>]) {
        let mut worklist: Vec<BranchFrame<T>> = Vec::new();
        self.expand(None, initial, 0, &mut worklist);

        while let Some(frame) = worklist.pop() {
            let continuation = frame.next_candidate();
            let BranchFrame {
                cursor,
                fixed_to,
                direction,
                extent,
                base_value,
                mut states,
            } = frame;

            self.current_value = base_value;
            match self.probe(cursor, fixed_to, &mut states) {
                Probe::Explore => {
                    // Continuation first, children second: the children
                    // pop before the sibling candidate, exactly like the
                    // recursive descent.
                    if let Some(next_fixed) = continuation {
                        worklist.push(BranchFrame {
                            cursor,
                            fixed_to: next_fixed,
                            direction,
                            extent,
                            base_value,
                            states: states.clone(),
                        });
                    }
                    self.expand(Some(cursor), &states, base_value, &mut worklist);
                }
                // A bound-dominated candidate skips its subtree but the
                // direction run carries on.
                Probe::Pruned => {
                    if let Some(next_fixed) = continuation {
                        worklist.push(BranchFrame {
                            cursor,
                            fixed_to: next_fixed,
                            direction,
                            extent,
                            base_value,
                            states,
                        });
                    }
                }
                // A structurally infeasible candidate ends the run: no
                // continuation is pushed.
                Probe::Infeasible => {}
            }
        }

        self.current_value = 0;
    }

    /// Advances the cursor from `cursor` and pushes the two direction
    /// runs for the new position (decrease below increase, so increase
    /// pops first). Pushes nothing when the cursor is exhausted.
    fn expand(
        &mut self,
        cursor: Option<Cursor>,
        states: &[MatchingState<T>],
        base_value: usize,
        worklist: &mut Vec<BranchFrame<T>>,
    ) {
        let Some((next, locked)) = self.advance(cursor, states) else {
            return;
        };
        let base_value = base_value + locked;
        let depth = (next.class * self.instance.num_knapsacks() + next.knapsack + 1) as u64;
        self.stats.on_depth_update(depth);

        let current = states[next.class].count_at(next.knapsack);
        let available = self.available_at(next, states);

        if current > 0 {
            worklist.push(BranchFrame {
                cursor: next,
                fixed_to: current - 1,
                direction: Direction::Decrease,
                extent: 0,
                base_value,
                states: states.to_vec(),
            });
        }
        worklist.push(BranchFrame {
            cursor: next,
            fixed_to: current,
            direction: Direction::Increase,
            extent: available,
            base_value,
            states: states.to_vec(),
        });
    }
}

/// Branch-and-bound solver with the explicit-worklist controller.
///
/// Behaviourally identical to [`crate::recursive::RecursiveSolver`]; the
/// solve result is cached the same way.
pub struct IterativeSolver<'a, T> {
    instance: &'a Instance<T>,
    outcome: Option<SolveOutcome>,
}

impl<'a, T> IterativeSolver<'a, T>
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
            session.run_iterative(&states);
        }
        let outcome = session.finish();
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }
}
