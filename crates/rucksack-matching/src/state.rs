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
    graph::{slots_within, ClassGraph},
    maximize::maximize,
};
use rucksack_core::num::SolverNum;

/// Addresses one capacity slot: `(knapsack, slot)` in canonical knapsack
/// order. Slot `j` exists while `j < active_slots(knapsack)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SlotRef {
    pub knapsack: u32,
    pub slot: u32,
}

impl SlotRef {
    #[inline]
    pub fn new(knapsack: usize, slot: usize) -> Self {
        Self {
            knapsack: knapsack as u32,
            slot: slot as u32,
        }
    }
}

impl std::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({}, {})", self.knapsack, self.slot)
    }
}

/// The mutable half of one weight class's matching, snapshotted at a point
/// of the search.
///
/// Bundles the capacity apportioned to the class (`remaining`, before the
/// class's own consumption), the per-knapsack match counts, and the
/// item↔slot matching itself. The slot set of a knapsack is implicit in
/// `slot_item[k].len()` — every slot of a knapsack has identical adjacency,
/// so pruning or extending the bipartite graph is a vector resize. `Clone`
/// therefore performs the cheap structural copy the branch-and-bound search
/// takes before every branch point.
///
/// Invariants (checked by [`MatchingState::is_consistent`]):
/// - the matching is symmetric and each side is matched at most once;
/// - `match_counts[k]` equals the number of matched slots of `k`;
/// - the sum of `match_counts` equals the number of matched items.
#[derive(Clone, Debug)]
pub struct MatchingState<T> {
    pub(crate) remaining: Vec<T>,
    pub(crate) match_counts: Vec<usize>,
    pub(crate) item_slot: Vec<Option<SlotRef>>,
    pub(crate) slot_item: Vec<Vec<Option<u32>>>,
}

impl<T> MatchingState<T>
where
    T: SolverNum,
{
    /// Creates the initial state for one class: slots pruned to the
    /// capacity left over by lighter classes, then a maximum matching from
    /// scratch. `cascade` holds the capacity available to this class on
    /// entry and the capacity left for the next class on return.
    pub fn initial(graph: &ClassGraph<T>, cascade: &mut [T]) -> Self {
        let weight = graph.weight();
        let slot_item = (0..graph.num_knapsacks())
            .map(|k| {
                let slots = slots_within(cascade[k], weight).min(graph.available_spaces(k));
                vec![None; slots]
            })
            .collect();

        let mut state = Self {
            remaining: cascade.to_vec(),
            match_counts: vec![0; graph.num_knapsacks()],
            item_slot: vec![None; graph.num_items()],
            slot_item,
        };
        maximize(&mut state, graph, cascade);
        state
    }

    /// Returns the capacity apportioned to this class, per knapsack.
    #[inline]
    pub fn remaining(&self) -> &[T] {
        &self.remaining
    }

    /// Returns the per-knapsack match counts.
    #[inline]
    pub fn match_counts(&self) -> &[usize] {
        &self.match_counts
    }

    /// Returns the match count of one knapsack.
    #[inline]
    pub fn count_at(&self, knapsack: usize) -> usize {
        self.match_counts[knapsack]
    }

    /// Returns the total number of matched items.
    #[inline]
    pub fn total_matched(&self) -> usize {
        self.match_counts.iter().sum()
    }

    /// Returns the number of active slots of a knapsack.
    #[inline]
    pub fn active_slots(&self, knapsack: usize) -> usize {
        self.slot_item[knapsack].len()
    }

    /// Returns the slot matched to a local item, if any.
    #[inline]
    pub fn slot_of(&self, local_item: usize) -> Option<SlotRef> {
        self.item_slot[local_item]
    }

    /// Returns the local item matched to a slot, if any.
    #[inline]
    pub fn item_at(&self, slot: SlotRef) -> Option<u32> {
        self.slot_item[slot.knapsack as usize][slot.slot as usize]
    }

    /// Links a local item and a slot (both directions).
    #[inline]
    pub(crate) fn link(&mut self, local_item: u32, slot: SlotRef) {
        self.item_slot[local_item as usize] = Some(slot);
        self.slot_item[slot.knapsack as usize][slot.slot as usize] = Some(local_item);
    }

    /// Checks the structural matching invariants against the graph.
    pub fn is_consistent(&self, graph: &ClassGraph<T>) -> bool {
        let mut matched_items = 0;
        for (local, slot) in self.item_slot.iter().enumerate() {
            if let Some(slot) = *slot {
                matched_items += 1;
                let k = slot.knapsack as usize;
                if slot.slot as usize >= self.slot_item[k].len() {
                    return false;
                }
                if self.slot_item[k][slot.slot as usize] != Some(local as u32) {
                    return false;
                }
                if !graph.item_knapsacks(local).contains(&slot.knapsack) {
                    return false;
                }
            }
        }
        for (k, slots) in self.slot_item.iter().enumerate() {
            let matched = slots.iter().filter(|s| s.is_some()).count();
            if matched != self.match_counts[k] {
                return false;
            }
            for (j, item) in slots.iter().enumerate() {
                if let Some(item) = *item {
                    if self.item_slot[item as usize] != Some(SlotRef::new(k, j)) {
                        return false;
                    }
                }
            }
        }
        matched_items == self.total_matched()
    }
}
