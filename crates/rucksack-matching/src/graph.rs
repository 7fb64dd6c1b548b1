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

use rucksack_core::num::{to_count, SolverNum};
use rucksack_model::{
    index::{ClassIndex, ItemIndex},
    instance::Instance,
};

/// Returns how many slots a capacity can hold for the given class weight.
#[inline]
pub(crate) fn slots_within<T: SolverNum>(capacity: T, weight: T) -> usize {
    if capacity <= T::zero() {
        return 0;
    }
    to_count(capacity / weight)
}

/// The static half of one weight class's bipartite graph.
///
/// Items are addressed by *local* indices (`0..num_items`), defined by the
/// class's member list; the eligibility adjacency is stored in both
/// directions so the alternating-path searches can walk item→slot and
/// slot→item without touching the instance. Built once per class before
/// any search and never mutated afterwards — the mutable half lives in
/// [`crate::state::MatchingState`].
#[derive(Clone, Debug)]
pub struct ClassGraph<T> {
    class: ClassIndex,
    weight: T,
    items: Vec<ItemIndex>,
    item_knapsacks: Vec<Vec<u32>>,
    knapsack_items: Vec<Vec<u32>>,
    available_spaces: Vec<usize>,
}

impl<T> ClassGraph<T>
where
    T: SolverNum,
{
    /// Builds the graph for one weight class of the instance.
    ///
    /// The per-knapsack slot budget is `min(capacity / weight, n_items)`:
    /// an upper bound on how many class items the knapsack could ever
    /// hold, capped by demand.
    pub fn build(instance: &Instance<T>, class: ClassIndex) -> Self {
        let weight_class = instance.class(class);
        let weight = weight_class.weight();
        let items: Vec<ItemIndex> = weight_class.items().to_vec();
        let num_knapsacks = instance.num_knapsacks();

        let mut item_knapsacks = Vec::with_capacity(items.len());
        let mut knapsack_items = vec![Vec::new(); num_knapsacks];
        for (local, &item) in items.iter().enumerate() {
            let eligible: Vec<u32> = instance
                .item(item)
                .restrictions()
                .ones()
                .map(|k| k as u32)
                .collect();
            for &k in &eligible {
                knapsack_items[k as usize].push(local as u32);
            }
            item_knapsacks.push(eligible);
        }

        let available_spaces = instance
            .knapsacks()
            .iter()
            .map(|k| slots_within(k.capacity(), weight).min(items.len()))
            .collect();

        Self {
            class,
            weight,
            items,
            item_knapsacks,
            knapsack_items,
            available_spaces,
        }
    }

    /// Returns the weight class this graph belongs to.
    #[inline]
    pub fn class(&self) -> ClassIndex {
        self.class
    }

    /// Returns the class weight.
    #[inline]
    pub fn weight(&self) -> T {
        self.weight
    }

    /// Returns the number of class items (the local index range).
    #[inline]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of knapsacks.
    #[inline]
    pub fn num_knapsacks(&self) -> usize {
        self.available_spaces.len()
    }

    /// Returns the global item index for a local one.
    #[inline]
    pub fn item(&self, local: usize) -> ItemIndex {
        self.items[local]
    }

    /// Returns the eligible knapsacks of a local item, ascending.
    #[inline]
    pub fn item_knapsacks(&self, local: usize) -> &[u32] {
        &self.item_knapsacks[local]
    }

    /// Returns the eligible local items of a knapsack.
    #[inline]
    pub fn knapsack_items(&self, knapsack: usize) -> &[u32] {
        &self.knapsack_items[knapsack]
    }

    /// Returns the demand-capped slot budget of a knapsack.
    #[inline]
    pub fn available_spaces(&self, knapsack: usize) -> usize {
        self.available_spaces[knapsack]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rucksack_model::instance::InstanceBuilder;

    #[test]
    fn test_slots_within_floors_and_clamps() {
        assert_eq!(slots_within(10i64, 3), 3);
        assert_eq!(slots_within(9i64, 3), 3);
        assert_eq!(slots_within(2i64, 3), 0);
        assert_eq!(slots_within(0i64, 3), 0);
        assert_eq!(slots_within(-6i64, 3), 0);
    }

    #[test]
    fn test_build_caps_spaces_by_demand() {
        let mut builder = InstanceBuilder::<i64>::new();
        let k0 = builder.add_knapsack(4).unwrap();
        let k1 = builder.add_knapsack(100).unwrap();
        let class = builder.class(1, 2).unwrap();
        for _ in 0..3 {
            builder.add_item(class, &[k0, k1]).unwrap();
        }
        let instance = builder.build();

        let class = instance.item(rucksack_model::index::ItemIndex::new(0)).class();
        let graph = ClassGraph::build(&instance, class);
        // Knapsack 0 (capacity 4, weight 2) fits 2; knapsack 1 would fit 50
        // but only 3 items exist.
        assert_eq!(graph.available_spaces(0), 2);
        assert_eq!(graph.available_spaces(1), 3);
    }

    #[test]
    fn test_build_wires_adjacency_both_ways() {
        let mut builder = InstanceBuilder::<i64>::new();
        let k0 = builder.add_knapsack(5).unwrap();
        let k1 = builder.add_knapsack(7).unwrap();
        let class = builder.class(1, 1).unwrap();
        builder.add_item(class, &[k0]).unwrap();
        builder.add_item(class, &[k0, k1]).unwrap();
        let instance = builder.build();

        let class = instance.item(rucksack_model::index::ItemIndex::new(0)).class();
        let graph = ClassGraph::build(&instance, class);
        assert_eq!(graph.num_items(), 2);
        assert_eq!(graph.item_knapsacks(0), &[0]);
        assert_eq!(graph.item_knapsacks(1), &[0, 1]);
        assert_eq!(graph.knapsack_items(0), &[0, 1]);
        assert_eq!(graph.knapsack_items(1), &[1]);
    }
}
