// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout passes and mutations over balanced trees of increasing size.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use tessera_layout::{Layout, LayoutEngine, LayoutOptions, Snap};
use tessera_tree::{Adjust, NodeId, Tree};

/// A tree with `fanout^depth` leaves whose weights cycle through 1..=97.
fn balanced(fanout: usize, depth: usize) -> (Tree<usize>, NodeId) {
    fn build(tree: &mut Tree<usize>, fanout: usize, depth: usize, next: &mut usize) -> NodeId {
        *next += 1;
        let label = *next;
        if depth == 0 {
            return tree.leaf(label, (label % 97 + 1) as f64);
        }
        let children: Vec<_> = (0..fanout)
            .map(|_| build(tree, fanout, depth - 1, next))
            .collect();
        tree.branch(label, children)
    }
    let mut tree = Tree::new();
    let root = build(&mut tree, fanout, depth, &mut 0);
    (tree, root)
}

const BOUNDS: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for (fanout, depth) in [(4, 3), (8, 3), (8, 4), (16, 3)] {
        let (tree, root) = balanced(fanout, depth);
        let leaves = tree.leaves(root).count();
        let floor = LayoutEngine::new();
        let exact = LayoutEngine::with_options(LayoutOptions::new().snap(Snap::Exact));

        group.bench_with_input(BenchmarkId::new("floor", leaves), &tree, |b, tree| {
            let mut out = Layout::new();
            b.iter(|| {
                floor.layout_into(black_box(tree), root, BOUNDS, &mut out);
                black_box(out.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("exact", leaves), &tree, |b, tree| {
            b.iter(|| black_box(exact.layout(black_box(tree), root, BOUNDS)));
        });
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    for (fanout, depth) in [(8, 3), (16, 3)] {
        let (tree, root) = balanced(fanout, depth);
        let layout = LayoutEngine::new().layout(&tree, root, BOUNDS);
        group.bench_with_input(
            BenchmarkId::from_parameter(layout.len()),
            &layout,
            |b, layout| {
                b.iter(|| black_box(layout.hit_test(black_box(Point::new(1500.0, 900.0)))));
            },
        );
    }
    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let (tree, root) = balanced(8, 4);
    let leaf = tree.leaves(root).nth(1234).unwrap_or(root);
    c.bench_function("scale_weight/depth4", |b| {
        let mut tree = balanced(8, 4).0;
        b.iter(|| {
            tree.scale_weight(leaf, Adjust::Grow);
            tree.scale_weight(leaf, Adjust::Shrink);
        });
    });
    c.bench_function("delete_and_relayout/depth4", |b| {
        b.iter_batched(
            || balanced(8, 4).0,
            |mut tree| {
                tree.delete(leaf);
                LayoutEngine::new().layout(&tree, root, BOUNDS)
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_layout, bench_hit_test, bench_mutation);
criterion_main!(benches);
