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

//! # Matching Maximization
//!
//! Hopcroft–Karp phase search: breadth-first layering by alternating-path
//! distance from all unmatched items, followed by depth-first augmentation
//! along shortest augmenting paths, repeated until no augmenting path
//! remains.
//!
//! John E. Hopcroft and Richard M. Karp. "An n^{5/2} Algorithm for Maximum
//! Matchings in Bipartite Graphs". SIAM Journal of Computing 2.4 (1973),
//! pp. 225–231. <https://doi.org/10.1137/0202019>

use crate::{
    graph::ClassGraph,
    state::{MatchingState, SlotRef},
};
use rucksack_core::num::SolverNum;
use std::collections::VecDeque;

const UNREACHED: usize = usize::MAX;

/// Maximizes the matching from its current state.
///
/// Used after the slot set changed (capacity grew or shrank), not for
/// single-unit adjustments. Newly matched slots consume one class-weight
/// each from `cascade` and bump the state's match counts; already-matched
/// pairs are only ever re-routed, never double-counted.
pub fn maximize<T>(state: &mut MatchingState<T>, graph: &ClassGraph<T>, cascade: &mut [T])
where
    T: SolverNum,
{
    let num_items = graph.num_items();
    let mut dist = vec![UNREACHED; num_items];

    loop {
        let shortest = layer_distances(state, graph, &mut dist);
        if shortest == UNREACHED {
            break;
        }
        for item in 0..num_items {
            if state.item_slot[item].is_none() {
                augment_shortest(state, graph, &mut dist, shortest, cascade, item);
            }
        }
    }
}

/// BFS phase: labels every item with its alternating-path distance from the
/// set of unmatched items and returns the length of the shortest augmenting
/// path (`UNREACHED` when none exists).
fn layer_distances<T>(
    state: &MatchingState<T>,
    graph: &ClassGraph<T>,
    dist: &mut [usize],
) -> usize
where
    T: SolverNum,
{
    let mut queue = VecDeque::new();
    for (item, slot) in state.item_slot.iter().enumerate() {
        if slot.is_none() {
            dist[item] = 0;
            queue.push_back(item);
        } else {
            dist[item] = UNREACHED;
        }
    }

    let mut shortest = UNREACHED;
    while let Some(item) = queue.pop_front() {
        if dist[item] >= shortest {
            continue;
        }
        for &k in graph.item_knapsacks(item) {
            let k = k as usize;
            for j in 0..state.active_slots(k) {
                match state.slot_item[k][j] {
                    Some(owner) => {
                        let owner = owner as usize;
                        if dist[owner] == UNREACHED {
                            dist[owner] = dist[item] + 1;
                            queue.push_back(owner);
                        }
                    }
                    None => {
                        if shortest == UNREACHED {
                            shortest = dist[item] + 1;
                        }
                    }
                }
            }
        }
    }
    shortest
}

/// DFS phase: augments along a shortest alternating path starting at an
/// unmatched item. Follows only slots whose owner sits exactly one BFS
/// layer deeper, which is what bounds the phase count.
fn augment_shortest<T>(
    state: &mut MatchingState<T>,
    graph: &ClassGraph<T>,
    dist: &mut [usize],
    shortest: usize,
    cascade: &mut [T],
    item: usize,
) -> bool
where
    T: SolverNum,
{
    for &k in graph.item_knapsacks(item) {
        let k = k as usize;
        for j in 0..state.active_slots(k) {
            let owner = state.slot_item[k][j];
            let owner_dist = match owner {
                Some(owner) => dist[owner as usize],
                None => shortest,
            };
            if owner_dist != dist[item] + 1 {
                continue;
            }
            let reachable = match owner {
                None => true,
                Some(owner) => {
                    augment_shortest(state, graph, dist, shortest, cascade, owner as usize)
                }
            };
            if reachable {
                if owner.is_none() {
                    state.match_counts[k] += 1;
                    cascade[k] = cascade[k] - graph.weight();
                }
                state.link(item as u32, SlotRef::new(k, j));
                return true;
            }
        }
    }
    dist[item] = UNREACHED;
    false
}
