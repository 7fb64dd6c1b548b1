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

//! # Single-Unit Matching Adjustments
//!
//! Depth-first alternating-path searches that move exactly one matched unit
//! into (`increase_by_one`) or out of (`decrease_by_one`) a knapsack while
//! the class's total match count stays fixed.
//!
//! Both searches freeze the branching prefix: with `k` the knapsack being
//! fixed, the donor (increase) or receiver (decrease) knapsack must have an
//! index strictly greater than `k`, so the counts of knapsacks `0..=k` —
//! everything the search has already committed to — are never disturbed.
//! Interior path flips re-seat items between slots without changing any
//! per-knapsack count, so only the two endpoints matter.
//!
//! A failed search is an ordinary outcome (`false`): the requested count is
//! structurally unreachable and the caller prunes the branch.

use crate::{
    graph::ClassGraph,
    state::{MatchingState, SlotRef},
};
use rucksack_core::num::SolverNum;

/// One vertex of the alternating-path search.
#[derive(Clone, Copy, Debug)]
enum Node {
    Item(u32),
    Slot(SlotRef),
}

/// Search trace: nodes plus parent links for path reconstruction.
struct Trace {
    entries: Vec<(Node, Option<usize>)>,
}

impl Trace {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[inline]
    fn push(&mut self, node: Node, parent: Option<usize>) -> usize {
        self.entries.push((node, parent));
        self.entries.len() - 1
    }

    #[inline]
    fn node(&self, index: usize) -> Node {
        self.entries[index].0
    }

    /// Reconstructs the path from a terminal entry back to its seed,
    /// terminal first.
    fn path(&self, terminal: usize) -> Vec<Node> {
        let mut path = Vec::new();
        let mut cursor = Some(terminal);
        while let Some(index) = cursor {
            let (node, parent) = self.entries[index];
            path.push(node);
            cursor = parent;
        }
        path
    }
}

/// Per-call visited marks, mirroring the state's slot layout.
struct Visited {
    items: Vec<bool>,
    slots: Vec<Vec<bool>>,
}

impl Visited {
    fn new<T: SolverNum>(state: &MatchingState<T>, num_items: usize) -> Self {
        Self {
            items: vec![false; num_items],
            slots: state
                .slot_item
                .iter()
                .map(|slots| vec![false; slots.len()])
                .collect(),
        }
    }

    #[inline]
    fn mark_item(&mut self, item: u32) -> bool {
        let seen = &mut self.items[item as usize];
        let first = !*seen;
        *seen = true;
        first
    }

    #[inline]
    fn mark_slot(&mut self, slot: SlotRef) -> bool {
        let seen = &mut self.slots[slot.knapsack as usize][slot.slot as usize];
        let first = !*seen;
        *seen = true;
        first
    }
}

/// Raises the match count at `knapsack` by one by stealing a matched unit
/// from a knapsack with strictly greater index.
///
/// The path starts at an unmatched slot of `knapsack`, alternates between
/// items and their matched slots, passes through slots of knapsacks
/// `0..=knapsack` only, and terminates at a matched slot of a later
/// knapsack — the donor. Flipping the path re-seats every interior item
/// and frees the donor slot. `cascade` (the remaining capacity handed to
/// the next class) is debited at `knapsack` and credited at the donor.
///
/// Returns `false` when no such path exists; the state is then unchanged.
pub fn increase_by_one<T>(
    state: &mut MatchingState<T>,
    graph: &ClassGraph<T>,
    knapsack: usize,
    cascade: &mut [T],
) -> bool
where
    T: SolverNum,
{
    let mut trace = Trace::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut visited = Visited::new(state, graph.num_items());

    for j in 0..state.active_slots(knapsack) {
        if state.slot_item[knapsack][j].is_none() {
            let slot = SlotRef::new(knapsack, j);
            visited.mark_slot(slot);
            let entry = trace.push(Node::Slot(slot), None);
            stack.push(entry);
        }
    }

    while let Some(entry) = stack.pop() {
        match trace.node(entry) {
            Node::Item(item) => {
                if let Some(slot) = state.item_slot[item as usize] {
                    if visited.mark_slot(slot) {
                        let next = trace.push(Node::Slot(slot), Some(entry));
                        stack.push(next);
                    }
                }
            }
            Node::Slot(slot) => {
                let k = slot.knapsack as usize;
                if k <= knapsack {
                    for &item in graph.knapsack_items(k) {
                        if visited.mark_item(item) {
                            let next = trace.push(Node::Item(item), Some(entry));
                            stack.push(next);
                        }
                    }
                } else if state.slot_item[k][slot.slot as usize].is_some() {
                    apply_increase(state, graph, &trace.path(entry), knapsack, cascade);
                    return true;
                }
            }
        }
    }
    false
}

/// Lowers the match count at `knapsack` by one, re-routing the freed item
/// (or a substitute along an alternating path) to an unmatched slot of a
/// knapsack with strictly greater index.
///
/// The path starts at a matched slot of `knapsack`, may pass through any
/// matched slot, and terminates at an unmatched slot of a later knapsack —
/// the receiver. `cascade` is credited at `knapsack` and debited at the
/// receiver.
///
/// Returns `false` when no valid re-route exists; the state is unchanged.
pub fn decrease_by_one<T>(
    state: &mut MatchingState<T>,
    graph: &ClassGraph<T>,
    knapsack: usize,
    cascade: &mut [T],
) -> bool
where
    T: SolverNum,
{
    let mut trace = Trace::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut visited = Visited::new(state, graph.num_items());

    for j in 0..state.active_slots(knapsack) {
        if state.slot_item[knapsack][j].is_some() {
            let slot = SlotRef::new(knapsack, j);
            visited.mark_slot(slot);
            let entry = trace.push(Node::Slot(slot), None);
            stack.push(entry);
        }
    }

    while let Some(entry) = stack.pop() {
        match trace.node(entry) {
            Node::Item(item) => {
                for &k in graph.item_knapsacks(item as usize) {
                    let k = k as usize;
                    for j in 0..state.active_slots(k) {
                        let slot = SlotRef::new(k, j);
                        if visited.mark_slot(slot) {
                            let next = trace.push(Node::Slot(slot), Some(entry));
                            stack.push(next);
                        }
                    }
                }
            }
            Node::Slot(slot) => {
                let k = slot.knapsack as usize;
                if let Some(item) = state.slot_item[k][slot.slot as usize] {
                    if visited.mark_item(item) {
                        let next = trace.push(Node::Item(item), Some(entry));
                        stack.push(next);
                    }
                } else if k > knapsack {
                    apply_decrease(state, graph, &trace.path(entry), knapsack, cascade);
                    return true;
                }
            }
        }
    }
    false
}

/// Flips an increase path `[donor slot, item, slot, …, item, seed slot]`:
/// every item re-seats onto the slot that follows it, the donor slot is
/// freed, and the seed slot of the raised knapsack becomes matched.
fn apply_increase<T>(
    state: &mut MatchingState<T>,
    graph: &ClassGraph<T>,
    path: &[Node],
    knapsack: usize,
    cascade: &mut [T],
) where
    T: SolverNum,
{
    let donor = match path[0] {
        Node::Slot(slot) => slot,
        Node::Item(_) => unreachable!("increase path must terminate at a slot"),
    };

    let mut index = 1;
    while index + 1 < path.len() {
        match (path[index], path[index + 1]) {
            (Node::Item(item), Node::Slot(slot)) => state.link(item, slot),
            _ => unreachable!("increase path must alternate item/slot"),
        }
        index += 2;
    }
    state.slot_item[donor.knapsack as usize][donor.slot as usize] = None;

    let weight = graph.weight();
    state.match_counts[knapsack] += 1;
    state.match_counts[donor.knapsack as usize] -= 1;
    cascade[knapsack] = cascade[knapsack] - weight;
    cascade[donor.knapsack as usize] = cascade[donor.knapsack as usize] + weight;

    debug_assert!(state.is_consistent(graph));
}

/// Flips a decrease path `[receiver slot, item, …, item, seed slot]`:
/// every item re-seats onto the slot that precedes it, the seed slot of
/// the lowered knapsack is freed, and the receiver slot becomes matched.
fn apply_decrease<T>(
    state: &mut MatchingState<T>,
    graph: &ClassGraph<T>,
    path: &[Node],
    knapsack: usize,
    cascade: &mut [T],
) where
    T: SolverNum,
{
    let receiver = match path[0] {
        Node::Slot(slot) => slot,
        Node::Item(_) => unreachable!("decrease path must terminate at a slot"),
    };
    let seed = match path[path.len() - 1] {
        Node::Slot(slot) => slot,
        Node::Item(_) => unreachable!("decrease path must start at a slot"),
    };

    let mut index = 0;
    while index + 1 < path.len() {
        match (path[index], path[index + 1]) {
            (Node::Slot(slot), Node::Item(item)) => state.link(item, slot),
            _ => unreachable!("decrease path must alternate slot/item"),
        }
        index += 2;
    }
    state.slot_item[seed.knapsack as usize][seed.slot as usize] = None;

    let weight = graph.weight();
    state.match_counts[knapsack] -= 1;
    state.match_counts[receiver.knapsack as usize] += 1;
    cascade[knapsack] = cascade[knapsack] + weight;
    cascade[receiver.knapsack as usize] = cascade[receiver.knapsack as usize] - weight;

    debug_assert!(state.is_consistent(graph));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rucksack_model::{index::ItemIndex, instance::InstanceBuilder};

    fn graph_for(
        capacities: &[i64],
        weight: i64,
        restrictions: &[&[usize]],
    ) -> ClassGraph<i64> {
        let mut builder = InstanceBuilder::<i64>::new();
        let knapsacks: Vec<_> = capacities
            .iter()
            .map(|&c| builder.add_knapsack(c).unwrap())
            .collect();
        let class = builder.class(1, weight).unwrap();
        for item_restrictions in restrictions {
            let eligible: Vec<_> = item_restrictions.iter().map(|&k| knapsacks[k]).collect();
            builder.add_item(class, &eligible).unwrap();
        }
        let instance = builder.build();
        let class = instance.item(ItemIndex::new(0)).class();
        ClassGraph::build(&instance, class)
    }

    /// Builds a state with the given explicit matching. Slots are sized by
    /// the full available spaces; `cascade` starts at full capacity minus
    /// the placed matches.
    fn state_with(
        graph: &ClassGraph<i64>,
        capacities: &[i64],
        matches: &[(usize, usize)], // (local item, knapsack), slot = next free
    ) -> (MatchingState<i64>, Vec<i64>) {
        let mut state = MatchingState {
            remaining: capacities.to_vec(),
            match_counts: vec![0; graph.num_knapsacks()],
            item_slot: vec![None; graph.num_items()],
            slot_item: (0..graph.num_knapsacks())
                .map(|k| vec![None; graph.available_spaces(k)])
                .collect(),
        };
        let mut cascade = capacities.to_vec();
        for &(item, k) in matches {
            let j = state.slot_item[k]
                .iter()
                .position(|s| s.is_none())
                .expect("no free slot for test setup");
            state.link(item as u32, SlotRef::new(k, j));
            state.match_counts[k] += 1;
            cascade[k] -= graph.weight();
        }
        assert!(state.is_consistent(graph));
        (state, cascade)
    }

    #[test]
    fn test_increase_steals_from_later_knapsack() {
        // Item 0 is matched at knapsack 1; raising knapsack 0 must move it.
        let graph = graph_for(&[2, 3], 1, &[&[0, 1]]);
        let (mut state, mut cascade) = state_with(&graph, &[2, 3], &[(0, 1)]);

        assert!(increase_by_one(&mut state, &graph, 0, &mut cascade));
        assert!(state.is_consistent(&graph));
        assert_eq!(state.match_counts(), &[1, 0]);
        assert_eq!(state.total_matched(), 1);
        assert_eq!(cascade, vec![1, 3]);
    }

    #[test]
    fn test_increase_never_steals_from_earlier_knapsack() {
        // The only matched unit sits at knapsack 0; raising knapsack 1
        // would have to steal from an earlier index, which is frozen.
        let graph = graph_for(&[2, 3], 1, &[&[0, 1]]);
        let (mut state, mut cascade) = state_with(&graph, &[2, 3], &[(0, 0)]);
        let before_counts = state.match_counts().to_vec();
        let before_cascade = cascade.clone();

        assert!(!increase_by_one(&mut state, &graph, 1, &mut cascade));
        assert!(state.is_consistent(&graph));
        assert_eq!(state.match_counts(), &before_counts[..]);
        assert_eq!(cascade, before_cascade);
    }

    #[test]
    fn test_increase_fails_without_free_slot() {
        // Knapsack 0 is saturated (one slot, already matched): no
        // unmatched seed slot exists, so the search cannot even start.
        let graph = graph_for(&[1, 1], 1, &[&[0, 1], &[0, 1]]);
        let (mut state, mut cascade) = state_with(&graph, &[1, 1], &[(0, 0), (1, 1)]);

        assert!(!increase_by_one(&mut state, &graph, 0, &mut cascade));
        assert_eq!(state.match_counts(), &[1, 1]);
    }

    #[test]
    fn test_increase_rotates_through_intermediate_item() {
        // Item 0 may use both knapsacks and is matched at 1; item 1 may
        // only use knapsack 0 but is unmatched... raising knapsack 0 twice
        // exercises a two-edge path first, then infeasibility.
        let graph = graph_for(&[2, 2], 1, &[&[0, 1], &[0]]);
        let (mut state, mut cascade) = state_with(&graph, &[2, 2], &[(0, 1), (1, 0)]);

        // Raise knapsack 0 from 1 to 2: steals item 0 from knapsack 1.
        assert!(increase_by_one(&mut state, &graph, 0, &mut cascade));
        assert_eq!(state.match_counts(), &[2, 0]);
        assert_eq!(state.total_matched(), 2);
        assert_eq!(cascade, vec![0, 2]);

        // Nothing left to steal.
        assert!(!increase_by_one(&mut state, &graph, 0, &mut cascade));
    }

    #[test]
    fn test_decrease_reroutes_to_later_knapsack() {
        let graph = graph_for(&[2, 3], 1, &[&[0, 1]]);
        let (mut state, mut cascade) = state_with(&graph, &[2, 3], &[(0, 0)]);

        assert!(decrease_by_one(&mut state, &graph, 0, &mut cascade));
        assert!(state.is_consistent(&graph));
        assert_eq!(state.match_counts(), &[0, 1]);
        assert_eq!(state.total_matched(), 1);
        assert_eq!(cascade, vec![2, 2]);
    }

    #[test]
    fn test_decrease_never_reroutes_to_earlier_knapsack() {
        // The freed item's only alternative knapsack has a smaller index;
        // the decrease must fail rather than disturb the frozen prefix.
        let graph = graph_for(&[2, 3], 1, &[&[0, 1]]);
        let (mut state, mut cascade) = state_with(&graph, &[2, 3], &[(0, 1)]);

        assert!(!decrease_by_one(&mut state, &graph, 1, &mut cascade));
        assert!(state.is_consistent(&graph));
        assert_eq!(state.match_counts(), &[0, 1]);
    }

    #[test]
    fn test_decrease_fails_for_restricted_item() {
        // Item restricted to knapsack 0 alone: no later knapsack can take
        // it, so its count cannot be lowered.
        let graph = graph_for(&[2, 3], 1, &[&[0]]);
        let (mut state, mut cascade) = state_with(&graph, &[2, 3], &[(0, 0)]);

        assert!(!decrease_by_one(&mut state, &graph, 0, &mut cascade));
        assert_eq!(state.match_counts(), &[1, 0]);
    }

    #[test]
    fn test_decrease_chains_through_substitute_item() {
        // Item 0: knapsacks {0, 1}, matched at 0. Item 1: knapsacks
        // {0, 2}... wait for it: lowering knapsack 0 can route item 0 to
        // knapsack 1 directly; a longer alternating chain is forced by
        // saturating knapsack 1 with item 1 which can also sit at 2.
        let graph = graph_for(&[1, 1, 1], 1, &[&[0, 1], &[1, 2]]);
        let (mut state, mut cascade) = state_with(&graph, &[1, 1, 1], &[(0, 0), (1, 1)]);

        assert!(decrease_by_one(&mut state, &graph, 0, &mut cascade));
        assert!(state.is_consistent(&graph));
        assert_eq!(state.match_counts(), &[0, 1, 1]);
        assert_eq!(state.total_matched(), 2);
        // Item 0 took knapsack 1, pushing item 1 to knapsack 2.
        assert_eq!(state.slot_of(0), Some(SlotRef::new(1, 0)));
        assert_eq!(state.slot_of(1), Some(SlotRef::new(2, 0)));
        assert_eq!(cascade, vec![1, 0, 0]);
    }

    #[test]
    fn test_adjustments_preserve_total_count() {
        let graph = graph_for(&[3, 3, 3], 1, &[&[0, 1, 2], &[0, 1, 2], &[1, 2]]);
        let (mut state, mut cascade) =
            state_with(&graph, &[3, 3, 3], &[(0, 0), (1, 1), (2, 2)]);
        let total = state.total_matched();

        assert!(increase_by_one(&mut state, &graph, 0, &mut cascade));
        assert_eq!(state.total_matched(), total);
        assert!(decrease_by_one(&mut state, &graph, 0, &mut cascade));
        assert_eq!(state.total_matched(), total);
    }
}
