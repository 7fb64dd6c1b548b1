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

//! # Rucksack BnB
//!
//! Exact branch-and-bound engine for the multiple-knapsack problem with
//! assignment restrictions and unit profits.
//!
//! The engine maintains one maximum bipartite matching per weight class
//! (items against per-knapsack capacity slots, see `rucksack_matching`)
//! and branches on *how many* items of a class go into a knapsack, in
//! class-major (ascending weight), knapsack-minor (ascending capacity)
//! order. Per candidate it computes an optimistic pooled-capacity bound
//! and a constructive bound obtained by actually forcing the count and
//! cascading capacity corrections through every later class's matching.
//!
//! Two interchangeable controllers drive the search:
//!
//! * [`recursive::RecursiveSolver`] — call-stack recursion, the simplest
//!   to follow;
//! * [`iterative::IterativeSolver`] — the same decision sequence on an
//!   explicit worklist, immune to call-stack limits.
//!
//! Both return a [`outcome::SolveOutcome`] with the optimal value, the
//! witnessing `Assignment`, and run statistics. Progress can be observed
//! through the [`monitor`] hooks; [`monitor::log::TracingMonitor`] wires
//! them to the `tracing` facade.
//!
//! The engine is single-threaded and synchronous: branch isolation is
//! achieved by cloning the per-class matching states at every branch
//! point, never by sharing. Callers needing a wall-clock limit must
//! cancel the whole solve from outside; there is no internal checkpoint.

pub mod err;
pub mod iterative;
pub mod monitor;
pub mod outcome;
pub mod recursive;
mod session;
pub mod stats;

pub use err::SolveError;
pub use iterative::IterativeSolver;
pub use outcome::SolveOutcome;
pub use recursive::RecursiveSolver;

#[cfg(test)]
mod tests {
    use crate::{monitor::log::TracingMonitor, IterativeSolver, RecursiveSolver};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rucksack_model::{
        assignment::Assignment,
        index::{ItemIndex, KnapsackIndex},
        instance::{Instance, InstanceBuilder},
    };

    /// Exhaustive reference: tries every placement of every item, with a
    /// simple remaining-supply cutoff. Only for small instances.
    fn brute_force_value(instance: &Instance<i64>) -> usize {
        fn descend(
            instance: &Instance<i64>,
            item: usize,
            remaining: &mut [i64],
            placed: usize,
            best: &mut usize,
        ) {
            let num_items = instance.num_items();
            if placed + (num_items - item) <= *best {
                return;
            }
            if item == num_items {
                *best = placed;
                return;
            }
            let index = ItemIndex::new(item);
            let weight = instance.item_weight(index);
            let eligible: Vec<usize> = instance.item(index).restrictions().ones().collect();
            for k in eligible {
                if remaining[k] >= weight {
                    remaining[k] -= weight;
                    descend(instance, item + 1, remaining, placed + 1, best);
                    remaining[k] += weight;
                }
            }
            descend(instance, item + 1, remaining, placed, best);
        }

        let mut remaining = instance.capacities();
        let mut best = 0;
        descend(instance, 0, &mut remaining, 0, &mut best);
        best
    }

    /// Checks the feasibility contract of a returned assignment.
    fn assert_feasible(instance: &Instance<i64>, assignment: &Assignment) {
        assert_eq!(assignment.num_items(), instance.num_items());
        let mut load = vec![0i64; instance.num_knapsacks()];
        let mut placed = 0;
        for i in 0..instance.num_items() {
            let index = ItemIndex::new(i);
            if let Some(k) = assignment.knapsack_for_item(index) {
                assert!(
                    instance.item(index).is_eligible(k),
                    "item {} placed into ineligible knapsack {}",
                    i,
                    k.get()
                );
                load[k.get()] += instance.item_weight(index);
                placed += 1;
            }
        }
        for (k, &used) in load.iter().enumerate() {
            let capacity = instance.knapsack(KnapsackIndex::new(k)).capacity();
            assert!(
                used <= capacity,
                "knapsack {} overfilled: {} of {}",
                k,
                used,
                capacity
            );
        }
        assert_eq!(placed, assignment.value());
    }

    fn random_instance(rng: &mut ChaCha8Rng) -> Instance<i64> {
        let mut builder = InstanceBuilder::<i64>::new();
        let num_knapsacks = rng.gen_range(1..=3);
        let knapsacks: Vec<_> = (0..num_knapsacks)
            .map(|_| builder.add_knapsack(rng.gen_range(1..=25)).unwrap())
            .collect();
        let num_classes = rng.gen_range(1..=3);
        let classes: Vec<_> = (0..num_classes)
            .map(|_| builder.class(1, rng.gen_range(1..=6)).unwrap())
            .collect();
        let num_items = rng.gen_range(0..=10);
        for _ in 0..num_items {
            let class = classes[rng.gen_range(0..classes.len())];
            let mut eligible: Vec<_> = knapsacks
                .iter()
                .copied()
                .filter(|_| rng.gen_bool(0.6))
                .collect();
            if eligible.is_empty() {
                eligible.push(knapsacks[rng.gen_range(0..knapsacks.len())]);
            }
            builder.add_item(class, &eligible).unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_controllers_agree_and_match_brute_force() {
        for seed in 0..40u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let instance = random_instance(&mut rng);

            let recursive = RecursiveSolver::new(&instance).solve().unwrap();
            let iterative = IterativeSolver::new(&instance).solve().unwrap();
            let optimum = brute_force_value(&instance);

            assert_eq!(
                recursive.value(),
                iterative.value(),
                "controllers disagree on seed {} ({})",
                seed,
                instance
            );
            assert_eq!(
                recursive.value(),
                optimum,
                "recursive controller missed the optimum on seed {} ({})",
                seed,
                instance
            );

            assert_feasible(&instance, recursive.assignment());
            assert_feasible(&instance, iterative.assignment());
        }
    }

    #[test]
    fn test_controllers_explore_identical_node_counts() {
        // Same decision sequence means the same number of probed
        // candidates, not just the same answer.
        for seed in 100..120u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let instance = random_instance(&mut rng);

            let recursive = RecursiveSolver::new(&instance).solve().unwrap();
            let iterative = IterativeSolver::new(&instance).solve().unwrap();
            assert_eq!(
                recursive.statistics().nodes_explored,
                iterative.statistics().nodes_explored,
                "node counts diverge on seed {}",
                seed
            );
            assert_eq!(
                recursive.statistics().prunings_bound,
                iterative.statistics().prunings_bound,
                "prune counts diverge on seed {}",
                seed
            );
        }
    }

    #[test]
    fn test_restriction_heavy_instances_stay_feasible() {
        // Every item restricted to exactly one knapsack: the matching
        // degenerates to per-knapsack counting, a good edge case for the
        // cascade logic.
        for seed in 200..210u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut builder = InstanceBuilder::<i64>::new();
            let knapsacks: Vec<_> = (0..3)
                .map(|_| builder.add_knapsack(rng.gen_range(1..=12)).unwrap())
                .collect();
            let class = builder.class(1, rng.gen_range(1..=3)).unwrap();
            for _ in 0..8 {
                let k = knapsacks[rng.gen_range(0..knapsacks.len())];
                builder.add_item(class, &[k]).unwrap();
            }
            let instance = builder.build();

            let recursive = RecursiveSolver::new(&instance).solve().unwrap();
            let iterative = IterativeSolver::new(&instance).solve().unwrap();
            assert_eq!(recursive.value(), iterative.value());
            assert_eq!(recursive.value(), brute_force_value(&instance));
            assert_feasible(&instance, recursive.assignment());
        }
    }

    #[test]
    fn test_solving_with_tracing_monitor_changes_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let instance = random_instance(&mut rng);

        let plain = RecursiveSolver::new(&instance).solve().unwrap();
        let mut traced_solver = RecursiveSolver::new(&instance);
        let traced = traced_solver
            .solve_with_monitor(TracingMonitor::new())
            .unwrap();
        assert_eq!(plain.value(), traced.value());
    }
}
