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

//! # Capacity Reconciliation
//!
//! When the search fixes a match count upstream, every later class sees a
//! different remaining-capacity vector and its matching must be corrected.
//! [`adjust`] is that correction: prune slots the new capacity no longer
//! permits (re-seating evicted items within the same knapsack where
//! possible, to minimize disruption), add newly permitted slots, debit the
//! cascade by the surviving consumption, and re-maximize.

use crate::{
    graph::{slots_within, ClassGraph},
    maximize::maximize,
    state::{MatchingState, SlotRef},
};
use rucksack_core::num::{from_count, SolverNum};

/// Reconciles `state` to the capacity limits in `cascade`.
///
/// On entry `cascade[k]` is the capacity apportioned to this class at
/// knapsack `k`; on return it is the capacity left over for the next
/// class. The permitted slot count is `min(cascade[k] / weight, n_items)`
/// — zero capacity permits zero slots.
pub fn adjust<T>(state: &mut MatchingState<T>, graph: &ClassGraph<T>, cascade: &mut [T])
where
    T: SolverNum,
{
    let weight = graph.weight();
    state.remaining.clear();
    state.remaining.extend_from_slice(cascade);

    for k in 0..graph.num_knapsacks() {
        let permitted = slots_within(cascade[k], weight).min(graph.num_items());
        let active = state.active_slots(k);

        if active > permitted {
            for j in permitted..active {
                let Some(item) = state.slot_item[k][j] else {
                    continue;
                };
                state.slot_item[k][j] = None;
                state.item_slot[item as usize] = None;
                state.match_counts[k] -= 1;
                // Prefer a surviving free slot of the same knapsack over
                // a full re-route.
                if let Some(free) = state.slot_item[k][..permitted]
                    .iter()
                    .position(|s| s.is_none())
                {
                    state.link(item, SlotRef::new(k, free));
                    state.match_counts[k] += 1;
                }
            }
            state.slot_item[k].truncate(permitted);
        } else if active < permitted {
            state.slot_item[k].resize(permitted, None);
        }
    }

    for k in 0..graph.num_knapsacks() {
        cascade[k] = cascade[k] - weight * from_count(state.match_counts[k]);
    }

    maximize(state, graph, cascade);
    debug_assert!(state.is_consistent(graph));
}
