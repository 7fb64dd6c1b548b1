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
    err::InstanceError,
    index::{ClassIndex, ItemIndex, KnapsackIndex},
};
use fixedbitset::FixedBitSet;
use rucksack_core::num::SolverNum;
use rustc_hash::FxHashMap;

/// A capacity-limited knapsack.
///
/// The `identifier` is assigned in creation order and survives the
/// canonical re-ordering performed by [`InstanceBuilder::build`]; it is the
/// stable handle for mapping solver output back to the caller's world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Knapsack<T> {
    identifier: u32,
    capacity: T,
}

impl<T> Knapsack<T>
where
    T: SolverNum,
{
    /// Returns the creation-order identifier.
    #[inline]
    pub fn identifier(&self) -> u32 {
        self.identifier
    }

    /// Returns the capacity.
    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }
}

impl<T> std::fmt::Display for Knapsack<T>
where
    T: SolverNum,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Knapsack {} ({})", self.identifier, self.capacity)
    }
}

/// A weight class: the canonical representative of all items sharing one
/// `(profit, weight)` pair. Owns the indices of its member items.
#[derive(Clone, Debug)]
pub struct WeightClass<T> {
    profit: T,
    weight: T,
    items: Vec<ItemIndex>,
}

impl<T> WeightClass<T>
where
    T: SolverNum,
{
    /// Returns the per-item profit of this class.
    #[inline]
    pub fn profit(&self) -> T {
        self.profit
    }

    /// Returns the per-item weight of this class.
    #[inline]
    pub fn weight(&self) -> T {
        self.weight
    }

    /// Returns the member items of this class.
    #[inline]
    pub fn items(&self) -> &[ItemIndex] {
        &self.items
    }

    /// Returns the number of member items.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }
}

impl<T> std::fmt::Display for WeightClass<T>
where
    T: SolverNum,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WeightClass ({}, {})", self.profit, self.weight)
    }
}

/// An item: a member of exactly one weight class, carrying the set of
/// knapsacks it may be placed into. Profit and weight live on the class.
#[derive(Clone, Debug)]
pub struct Item {
    class: ClassIndex,
    restrictions: FixedBitSet,
}

impl Item {
    /// Returns the weight class this item belongs to.
    #[inline]
    pub fn class(&self) -> ClassIndex {
        self.class
    }

    /// Returns the eligibility mask over canonical knapsack indices.
    #[inline]
    pub fn restrictions(&self) -> &FixedBitSet {
        &self.restrictions
    }

    /// Returns `true` if this item may be placed into `knapsack`.
    #[inline]
    pub fn is_eligible(&self, knapsack: KnapsackIndex) -> bool {
        self.restrictions.contains(knapsack.get())
    }
}

/// The immutable, canonically ordered problem instance.
///
/// Invariants established by [`InstanceBuilder::build`]:
/// - knapsacks are ordered ascending by capacity (ties by identifier);
/// - weight classes are ordered ascending by weight (ties by profit);
/// - every item belongs to exactly one class and has a non-empty
///   restriction mask over valid knapsack indices;
/// - all capacities, weights, and profits are positive.
///
/// Item indices are creation-order and unaffected by the re-ordering.
#[derive(Clone, Debug)]
pub struct Instance<T> {
    knapsacks: Vec<Knapsack<T>>,
    classes: Vec<WeightClass<T>>,
    items: Vec<Item>,
}

impl<T> Instance<T>
where
    T: SolverNum,
{
    /// Returns the number of knapsacks.
    #[inline]
    pub fn num_knapsacks(&self) -> usize {
        self.knapsacks.len()
    }

    /// Returns the number of weight classes.
    #[inline]
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Returns the number of items.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the knapsack at the given canonical index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn knapsack(&self, index: KnapsackIndex) -> &Knapsack<T> {
        &self.knapsacks[index.get()]
    }

    /// Returns the weight class at the given canonical index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn class(&self, index: ClassIndex) -> &WeightClass<T> {
        &self.classes[index.get()]
    }

    /// Returns the item at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn item(&self, index: ItemIndex) -> &Item {
        &self.items[index.get()]
    }

    /// Returns all knapsacks in canonical (ascending capacity) order.
    #[inline]
    pub fn knapsacks(&self) -> &[Knapsack<T>] {
        &self.knapsacks
    }

    /// Returns all weight classes in canonical (ascending weight) order.
    #[inline]
    pub fn classes(&self) -> &[WeightClass<T>] {
        &self.classes
    }

    /// Returns all items in creation order.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the capacity vector in canonical knapsack order.
    #[inline]
    pub fn capacities(&self) -> Vec<T> {
        self.knapsacks.iter().map(|k| k.capacity).collect()
    }

    /// Returns the weight of the given item, read through its class.
    #[inline]
    pub fn item_weight(&self, index: ItemIndex) -> T {
        self.classes[self.items[index.get()].class.get()].weight
    }

    /// Returns the profit of the given item, read through its class.
    #[inline]
    pub fn item_profit(&self, index: ItemIndex) -> T {
        self.classes[self.items[index.get()].class.get()].profit
    }
}

impl<T> std::fmt::Display for Instance<T>
where
    T: SolverNum,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instance(knapsacks: {}, classes: {}, items: {})",
            self.num_knapsacks(),
            self.num_classes(),
            self.num_items()
        )
    }
}

/// Mutable, validating counterpart of [`Instance`].
///
/// Weight classes are deduplicated through a registry keyed by
/// `(profit, weight)`: [`InstanceBuilder::class`] returns the existing
/// handle when the pair is already known, so callers look up or insert
/// before creating items.
///
/// Indices returned by the builder are creation-order; `build()` re-orders
/// knapsacks and classes canonically and remaps every reference, so
/// builder-returned `KnapsackIndex`/`ClassIndex` values must not be used
/// against the built instance. `ItemIndex` values remain valid.
#[derive(Clone, Debug, Default)]
pub struct InstanceBuilder<T> {
    capacities: Vec<T>,
    classes: Vec<(T, T)>,
    registry: FxHashMap<(T, T), ClassIndex>,
    items: Vec<(ClassIndex, FixedBitSet)>,
}

impl<T> InstanceBuilder<T>
where
    T: SolverNum,
{
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            capacities: Vec::new(),
            classes: Vec::new(),
            registry: FxHashMap::default(),
            items: Vec::new(),
        }
    }

    /// Adds a knapsack with the given capacity.
    pub fn add_knapsack(&mut self, capacity: T) -> Result<KnapsackIndex, InstanceError> {
        if capacity <= T::zero() {
            return Err(InstanceError::NonPositiveCapacity(capacity.into()));
        }
        let index = KnapsackIndex::new(self.capacities.len());
        self.capacities.push(capacity);
        Ok(index)
    }

    /// Looks up or registers the weight class for `(profit, weight)`.
    pub fn class(&mut self, profit: T, weight: T) -> Result<ClassIndex, InstanceError> {
        if weight <= T::zero() {
            return Err(InstanceError::NonPositiveWeight(weight.into()));
        }
        if profit <= T::zero() {
            return Err(InstanceError::NonPositiveProfit(profit.into()));
        }
        if let Some(&index) = self.registry.get(&(profit, weight)) {
            return Ok(index);
        }
        let index = ClassIndex::new(self.classes.len());
        self.classes.push((profit, weight));
        self.registry.insert((profit, weight), index);
        Ok(index)
    }

    /// Adds an item of the given class, eligible for exactly the listed
    /// knapsacks. Duplicate entries in `restrictions` are harmless.
    pub fn add_item(
        &mut self,
        class: ClassIndex,
        restrictions: &[KnapsackIndex],
    ) -> Result<ItemIndex, InstanceError> {
        if class.get() >= self.classes.len() {
            return Err(InstanceError::UnknownClass {
                index: class.get(),
                num_classes: self.classes.len(),
            });
        }
        if restrictions.is_empty() {
            return Err(InstanceError::EmptyRestrictions);
        }
        let mut mask = FixedBitSet::with_capacity(self.capacities.len());
        for &knapsack in restrictions {
            if knapsack.get() >= self.capacities.len() {
                return Err(InstanceError::UnknownKnapsack {
                    index: knapsack.get(),
                    num_knapsacks: self.capacities.len(),
                });
            }
            mask.insert(knapsack.get());
        }
        let index = ItemIndex::new(self.items.len());
        self.items.push((class, mask));
        Ok(index)
    }

    /// Finalizes the instance: sorts knapsacks ascending by capacity and
    /// classes ascending by weight, and remaps every item reference into
    /// the canonical index spaces.
    pub fn build(self) -> Instance<T> {
        let num_knapsacks = self.capacities.len();

        // Knapsack permutation: ascending capacity, ties by creation order.
        let mut knapsack_order: Vec<usize> = (0..num_knapsacks).collect();
        knapsack_order.sort_by_key(|&i| (self.capacities[i], i));
        let mut knapsack_rank = vec![0usize; num_knapsacks];
        for (rank, &old) in knapsack_order.iter().enumerate() {
            knapsack_rank[old] = rank;
        }
        let knapsacks: Vec<Knapsack<T>> = knapsack_order
            .iter()
            .map(|&old| Knapsack {
                identifier: old as u32,
                capacity: self.capacities[old],
            })
            .collect();

        // Class permutation: ascending weight, ties by profit.
        let mut class_order: Vec<usize> = (0..self.classes.len()).collect();
        class_order.sort_by_key(|&i| {
            let (profit, weight) = self.classes[i];
            (weight, profit)
        });
        let mut class_rank = vec![0usize; self.classes.len()];
        for (rank, &old) in class_order.iter().enumerate() {
            class_rank[old] = rank;
        }
        let mut classes: Vec<WeightClass<T>> = class_order
            .iter()
            .map(|&old| {
                let (profit, weight) = self.classes[old];
                WeightClass {
                    profit,
                    weight,
                    items: Vec::new(),
                }
            })
            .collect();

        let items: Vec<Item> = self
            .items
            .into_iter()
            .enumerate()
            .map(|(item_id, (class, mask))| {
                let class = ClassIndex::new(class_rank[class.get()]);
                let mut restrictions = FixedBitSet::with_capacity(num_knapsacks);
                for old in mask.ones() {
                    restrictions.insert(knapsack_rank[old]);
                }
                classes[class.get()].items.push(ItemIndex::new(item_id));
                Item {
                    class,
                    restrictions,
                }
            })
            .collect();

        Instance {
            knapsacks,
            classes,
            items,
        }
    }
}
