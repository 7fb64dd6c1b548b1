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

//! # Search Session
//!
//! The state and logic shared by both search controllers: the per-class
//! graphs and matchings, the branching cursor, the optimistic and
//! constructive bounds of a candidate, and incumbent bookkeeping. The
//! controllers in `recursive`/`iterative` only decide *in which order*
//! candidates are probed; everything they probe goes through here, which
//! is what makes their decision sequences identical.
//!
//! A session lives for exactly one solve and is consumed by
//! [`SearchSession::finish`].

use crate::{
    err::SolveError,
    monitor::search_monitor::{PruneReason, SearchMonitor},
    outcome::SolveOutcome,
    stats::SolverStatistics,
};
use rucksack_core::num::{to_count, SolverNum};
use rucksack_matching::{
    adjust::adjust,
    augment::{decrease_by_one, increase_by_one},
    graph::ClassGraph,
    state::MatchingState,
};
use rucksack_model::{
    assignment::Assignment,
    index::{ClassIndex, KnapsackIndex},
    instance::Instance,
};
use std::cmp::Ordering;

/// The branching cursor: which `(class, knapsack)` count is being fixed.
/// Classes advance in weight order (major), knapsacks in capacity order
/// (minor).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) class: usize,
    pub(crate) knapsack: usize,
}

/// Outcome of probing one branch candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    /// The requested count cannot be realized; the direction ends here.
    Infeasible,
    /// Feasible, but the optimistic bound cannot beat the incumbent; the
    /// direction ends here.
    Pruned,
    /// Feasible and potentially improving; descend into the subtree, then
    /// continue the direction.
    Explore,
}

pub(crate) struct SearchSession<'a, T, M> {
    pub(crate) instance: &'a Instance<T>,
    pub(crate) graphs: Vec<ClassGraph<T>>,
    /// Sum of the locked totals of all classes up to the cursor class.
    pub(crate) current_value: usize,
    pub(crate) best_value: usize,
    pub(crate) best_states: Vec<MatchingState<T>>,
    pub(crate) stats: SolverStatistics,
    pub(crate) monitor: M,
    start_time: std::time::Instant,
}

impl<'a, T, M> SearchSession<'a, T, M>
where
    T: SolverNum,
    M: SearchMonitor,
{
    /// Creates a session, validating the unit-profit precondition and
    /// building every class's bipartite graph.
    pub(crate) fn new(instance: &'a Instance<T>, monitor: M) -> Result<Self, SolveError> {
        for class in instance.classes() {
            if class.profit() != T::one() {
                return Err(SolveError::NonUnitProfit {
                    profit: class.profit().into(),
                    weight: class.weight().into(),
                });
            }
        }

        let graphs = (0..instance.num_classes())
            .map(|c| ClassGraph::build(instance, ClassIndex::new(c)))
            .collect();

        Ok(Self {
            instance,
            graphs,
            current_value: 0,
            best_value: 0,
            best_states: Vec::new(),
            stats: SolverStatistics::default(),
            monitor,
            start_time: std::time::Instant::now(),
        })
    }

    /// Builds the initial maximum matchings, class by class in weight
    /// order, consuming capacity greedily. The resulting total becomes the
    /// root incumbent.
    pub(crate) fn prepare(&mut self) -> Vec<MatchingState<T>> {
        let mut cascade = self.instance.capacities();
        let mut states = Vec::with_capacity(self.graphs.len());
        let mut root_value = 0;
        for graph in &self.graphs {
            let state = MatchingState::initial(graph, &mut cascade);
            root_value += state.total_matched();
            states.push(state);
        }

        self.best_value = root_value;
        self.best_states = states.clone();
        self.stats.set_root_value(root_value as u64);
        self.monitor.on_enter_search(root_value, &self.stats);
        states
    }

    /// Returns `true` when branching can change anything at all.
    pub(crate) fn has_search_space(&self) -> bool {
        self.instance.num_knapsacks() > 0 && self.instance.num_items() > 0
    }

    /// Advances the branching cursor in class-major, knapsack-minor order.
    ///
    /// Entering a new class returns that class's total as the value to
    /// lock into `current_value` for the subtree. The last class is never
    /// branched — its matching is fully determined by the cascading
    /// adjustments — so the cursor ends after the second-to-last class.
    pub(crate) fn advance(
        &self,
        cursor: Option<Cursor>,
        states: &[MatchingState<T>],
    ) -> Option<(Cursor, usize)> {
        let num_knapsacks = self.instance.num_knapsacks();
        match cursor {
            Some(cursor) if cursor.knapsack + 1 < num_knapsacks => Some((
                Cursor {
                    class: cursor.class,
                    knapsack: cursor.knapsack + 1,
                },
                0,
            )),
            _ => {
                let class = cursor.map_or(0, |cursor| cursor.class + 1);
                if class + 1 >= self.instance.num_classes() {
                    return None;
                }
                let locked = states[class].total_matched();
                Some((Cursor { class, knapsack: 0 }, locked))
            }
        }
    }

    /// Returns the number of slots the cursor knapsack could hold for the
    /// cursor class, given the capacity apportioned to that class.
    pub(crate) fn available_at(&self, cursor: Cursor, states: &[MatchingState<T>]) -> usize {
        let remaining = states[cursor.class].remaining()[cursor.knapsack];
        if remaining <= T::zero() {
            return 0;
        }
        to_count(remaining / self.graphs[cursor.class].weight())
    }

    /// The optimistic bound: from this candidate forward, assume every
    /// remaining unit of capacity can be filled by *some* item of the
    /// relevant class, ignoring restriction sets. Capacity is pooled
    /// across knapsacks and consumed greedily in weight order.
    ///
    /// `None` when the candidate is infeasible outright: the fixed counts
    /// exceed the class's item supply, or the committed capacity exceeds
    /// what the class was apportioned.
    pub(crate) fn upper_bound(
        &self,
        cursor: Cursor,
        fixed_to: usize,
        states: &[MatchingState<T>],
    ) -> Option<usize> {
        let state = &states[cursor.class];
        let graph = &self.graphs[cursor.class];
        let weight: i64 = graph.weight().into();

        let prerequire: usize =
            state.match_counts()[..cursor.knapsack].iter().sum::<usize>() + fixed_to;
        if prerequire > graph.num_items() {
            return None;
        }

        let pooled: i64 = state.remaining().iter().map(|&r| r.into()).sum();
        let mut capacity = pooled - prerequire as i64 * weight;
        if capacity < 0 {
            return None;
        }

        let mut value = self.current_value;
        let supply = graph.num_items() - prerequire;
        let take = ((capacity / weight) as usize).min(supply);
        value += take;
        capacity -= take as i64 * weight;

        for graph in &self.graphs[cursor.class + 1..] {
            let weight: i64 = graph.weight().into();
            let take = ((capacity / weight) as usize).min(graph.num_items());
            value += take;
            capacity -= take as i64 * weight;
        }

        Some(value)
    }

    /// The constructive bound: force the cursor class's count at the
    /// cursor knapsack to `fixed_to` (the candidates arrive in unit steps,
    /// so exactly one increase or decrease suffices), then cascade the
    /// resulting capacity vector through every later class and sum what
    /// actually matched.
    ///
    /// `None` when the single-unit adjustment finds no augmenting path.
    pub(crate) fn lower_bound(
        &self,
        cursor: Cursor,
        fixed_to: usize,
        states: &mut [MatchingState<T>],
    ) -> Option<usize> {
        let class = cursor.class;
        debug_assert!(class + 1 < states.len());
        let mut cascade: Vec<T> = states[class + 1].remaining().to_vec();

        {
            let state = &mut states[class];
            let graph = &self.graphs[class];
            match state.count_at(cursor.knapsack).cmp(&fixed_to) {
                Ordering::Less => {
                    if !increase_by_one(state, graph, cursor.knapsack, &mut cascade) {
                        return None;
                    }
                }
                Ordering::Greater => {
                    if !decrease_by_one(state, graph, cursor.knapsack, &mut cascade) {
                        return None;
                    }
                }
                Ordering::Equal => {}
            }
        }

        let mut bound = self.current_value;
        for i in class + 1..states.len() {
            adjust(&mut states[i], &self.graphs[i], &mut cascade);
            bound += states[i].total_matched();
        }
        Some(bound)
    }

    /// Evaluates one branch candidate: optimistic bound, constructive
    /// bound (mutating `states` in place), incumbent update, and the
    /// verdict that drives the direction loop.
    ///
    /// # Panics
    ///
    /// Panics when the constructive bound disagrees with the actual total
    /// match count — matching maintenance has corrupted state and the
    /// result could no longer be trusted.
    pub(crate) fn probe(
        &mut self,
        cursor: Cursor,
        fixed_to: usize,
        states: &mut Vec<MatchingState<T>>,
    ) -> Probe {
        self.stats.on_node_explored();
        self.monitor.on_node(&self.stats);

        let Some(upper) = self.upper_bound(cursor, fixed_to, states) else {
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(PruneReason::Infeasible, &self.stats);
            return Probe::Infeasible;
        };

        let Some(lower) = self.lower_bound(cursor, fixed_to, states) else {
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(PruneReason::Infeasible, &self.stats);
            return Probe::Infeasible;
        };

        let matched: usize = states.iter().map(|s| s.total_matched()).sum();
        assert_eq!(
            lower, matched,
            "constructive bound {} disagrees with {} matched items; matching maintenance is corrupted",
            lower, matched
        );
        debug_assert!(
            upper >= lower,
            "optimistic bound {} below constructive bound {}",
            upper,
            lower
        );

        if lower > self.best_value {
            self.best_value = lower;
            self.best_states = states.clone();
            self.stats.on_incumbent_update();
            self.monitor.on_incumbent(lower, &self.stats);
        }

        if upper > self.best_value {
            Probe::Explore
        } else {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(PruneReason::BoundDominated, &self.stats);
            Probe::Pruned
        }
    }

    /// Converts the best snapshot list into the final item placements and
    /// consumes the session.
    pub(crate) fn finish(mut self) -> SolveOutcome {
        let mut placements = vec![None; self.instance.num_items()];
        for (class, state) in self.best_states.iter().enumerate() {
            let graph = &self.graphs[class];
            for local in 0..graph.num_items() {
                if let Some(slot) = state.slot_of(local) {
                    placements[graph.item(local).get()] =
                        Some(KnapsackIndex::new(slot.knapsack as usize));
                }
            }
        }

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(self.best_value, &self.stats);

        let assignment = Assignment::new(self.best_value, placements);
        SolveOutcome::new(self.best_value, assignment, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;
    use rucksack_model::instance::InstanceBuilder;

    fn two_class_instance() -> Instance<i64> {
        // Capacities [4, 8]; class (1, 2) with three unrestricted items,
        // class (1, 3) with two unrestricted items.
        let mut builder = InstanceBuilder::<i64>::new();
        let k0 = builder.add_knapsack(4).unwrap();
        let k1 = builder.add_knapsack(8).unwrap();
        let light = builder.class(1, 2).unwrap();
        let heavy = builder.class(1, 3).unwrap();
        for _ in 0..3 {
            builder.add_item(light, &[k0, k1]).unwrap();
        }
        for _ in 0..2 {
            builder.add_item(heavy, &[k0, k1]).unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_session_rejects_non_unit_profit() {
        let mut builder = InstanceBuilder::<i64>::new();
        let k = builder.add_knapsack(10).unwrap();
        let class = builder.class(2, 1).unwrap();
        builder.add_item(class, &[k]).unwrap();
        let instance = builder.build();

        let result = SearchSession::new(&instance, NoOperationMonitor::new());
        assert!(matches!(
            result.map(|_| ()),
            Err(SolveError::NonUnitProfit {
                profit: 2,
                weight: 1
            })
        ));
    }

    #[test]
    fn test_prepare_builds_greedy_root_matching() {
        let instance = two_class_instance();
        let mut session = SearchSession::new(&instance, NoOperationMonitor::new()).unwrap();
        let states = session.prepare();

        // All five items fit: 3 × weight 2 + 2 × weight 3 = 12 = 4 + 8.
        assert_eq!(session.best_value, 5);
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].total_matched(), 3);
        assert_eq!(states[1].total_matched(), 2);
        // The lighter class saw full capacity, the heavier the leftovers.
        assert_eq!(states[0].remaining(), &[4, 8]);
        let consumed: i64 = 3 * 2;
        let leftover: i64 = states[1].remaining().iter().sum();
        assert_eq!(leftover, 12 - consumed);
    }

    #[test]
    fn test_advance_walks_class_major_knapsack_minor() {
        let instance = two_class_instance();
        let mut session = SearchSession::new(&instance, NoOperationMonitor::new()).unwrap();
        let states = session.prepare();

        let (first, locked) = session.advance(None, &states).unwrap();
        assert_eq!(first, Cursor { class: 0, knapsack: 0 });
        assert_eq!(locked, states[0].total_matched());

        let (second, locked) = session.advance(Some(first), &states).unwrap();
        assert_eq!(second, Cursor { class: 0, knapsack: 1 });
        assert_eq!(locked, 0);

        // The next wrap would enter the last class, which is never
        // branched.
        assert!(session.advance(Some(second), &states).is_none());
    }

    #[test]
    fn test_upper_bound_greedy_fill() {
        let instance = two_class_instance();
        let mut session = SearchSession::new(&instance, NoOperationMonitor::new()).unwrap();
        let states = session.prepare();
        session.current_value = states[0].total_matched();

        let cursor = Cursor { class: 0, knapsack: 0 };
        // Fixing two light items at knapsack 0: 12 − 4 = 8 pooled units
        // remain, one more light item fits (8 / 2, capped by supply 1),
        // then two heavy items (6 / 3).
        assert_eq!(session.upper_bound(cursor, 2, &states), Some(6));
    }

    #[test]
    fn test_upper_bound_rejects_excess_supply() {
        let instance = two_class_instance();
        let mut session = SearchSession::new(&instance, NoOperationMonitor::new()).unwrap();
        let states = session.prepare();

        let cursor = Cursor { class: 0, knapsack: 0 };
        // Only three light items exist.
        assert_eq!(session.upper_bound(cursor, 4, &states), None);
    }

    #[test]
    fn test_upper_bound_rejects_overcommitted_capacity() {
        let mut builder = InstanceBuilder::<i64>::new();
        let k0 = builder.add_knapsack(6).unwrap();
        let k1 = builder.add_knapsack(6).unwrap();
        let heavy = builder.class(1, 5).unwrap();
        let filler = builder.class(1, 6).unwrap();
        for _ in 0..4 {
            builder.add_item(heavy, &[k0, k1]).unwrap();
        }
        builder.add_item(filler, &[k0, k1]).unwrap();
        let instance = builder.build();

        let mut session = SearchSession::new(&instance, NoOperationMonitor::new()).unwrap();
        let states = session.prepare();

        let cursor = Cursor { class: 0, knapsack: 0 };
        // Three heavy items would commit 15 of 12 pooled units.
        assert_eq!(session.upper_bound(cursor, 3, &states), None);
    }

    #[test]
    fn test_lower_bound_matches_total_matched() {
        let instance = two_class_instance();
        let mut session = SearchSession::new(&instance, NoOperationMonitor::new()).unwrap();
        let mut states = session.prepare();
        session.current_value = states[0].total_matched();

        let cursor = Cursor { class: 0, knapsack: 0 };
        let fixed_to = states[0].count_at(0);
        let bound = session.lower_bound(cursor, fixed_to, &mut states);
        let matched: usize = states.iter().map(|s| s.total_matched()).sum();
        assert_eq!(bound, Some(matched));
    }

    #[test]
    fn test_probe_keeps_incumbent_on_equal_value() {
        let instance = two_class_instance();
        let mut session = SearchSession::new(&instance, NoOperationMonitor::new()).unwrap();
        let mut states = session.prepare();
        session.current_value = states[0].total_matched();
        let best_before = session.best_value;

        let cursor = Cursor { class: 0, knapsack: 0 };
        let fixed_to = states[0].count_at(0);
        let probe = session.probe(cursor, fixed_to, &mut states);

        // Re-probing the incumbent's own counts cannot improve it; the
        // optimistic bound stays loose though (it pools capacity and
        // ignores restrictions), so the verdict is to keep exploring.
        assert_eq!(probe, Probe::Explore);
        assert_eq!(session.best_value, best_before);
        assert_eq!(session.stats.nodes_explored, 1);
        assert_eq!(session.stats.prunings_bound, 0);
    }
}
