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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rucksack_bnb::{IterativeSolver, RecursiveSolver};
use rucksack_model::instance::{Instance, InstanceBuilder};
use std::hint::black_box;

/// A seeded instance with enough restriction structure to force real
/// branching.
fn build_instance(seed: u64, num_knapsacks: usize, num_items: usize) -> Instance<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = InstanceBuilder::<i64>::new();
    let knapsacks: Vec<_> = (0..num_knapsacks)
        .map(|_| builder.add_knapsack(rng.gen_range(5..=40)).unwrap())
        .collect();
    let classes: Vec<_> = (1..=4)
        .map(|weight| builder.class(1, weight).unwrap())
        .collect();
    for _ in 0..num_items {
        let class = classes[rng.gen_range(0..classes.len())];
        let mut eligible: Vec<_> = knapsacks
            .iter()
            .copied()
            .filter(|_| rng.gen_bool(0.5))
            .collect();
        if eligible.is_empty() {
            eligible.push(knapsacks[rng.gen_range(0..knapsacks.len())]);
        }
        builder.add_item(class, &eligible).unwrap();
    }
    builder.build()
}

fn bench_controllers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    for &(num_knapsacks, num_items) in &[(2usize, 20usize), (3, 30)] {
        let instance = build_instance(42, num_knapsacks, num_items);
        let label = format!("{}x{}", num_knapsacks, num_items);

        group.bench_with_input(
            BenchmarkId::new("recursive", &label),
            &instance,
            |b, instance| {
                b.iter(|| {
                    let mut solver = RecursiveSolver::new(black_box(instance));
                    solver.solve().unwrap().value()
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("iterative", &label),
            &instance,
            |b, instance| {
                b.iter(|| {
                    let mut solver = IterativeSolver::new(black_box(instance));
                    solver.solve().unwrap().value()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_controllers);
criterion_main!(benches);
