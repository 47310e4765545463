// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests over randomly shaped trees: tiling, pruning, weight conservation, and delta
//! propagation.

use kurbo::Rect;
use proptest::prelude::*;
use tessera_layout::{LayoutEngine, LayoutOptions, Snap};
use tessera_tree::{Adjust, NodeId, SCALE_STEP, Tree};

#[derive(Clone, Debug)]
enum Shape {
    Leaf(u32),
    Branch(Vec<Shape>),
}

/// Leaf weights mix small values with ones many orders of magnitude larger, so that deleting a
/// heavy leaf leaves light siblings behind.
fn any_shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![0_u32..1000, 1_000_000_000_u32..=u32::MAX].prop_map(Shape::Leaf);
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop::collection::vec(inner, 1..6).prop_map(Shape::Branch)
    })
}

fn any_bounds() -> impl Strategy<Value = Rect> {
    (0_u16..50, 0_u16..50, 1_u16..300, 1_u16..300).prop_map(|(x, y, w, h)| {
        Rect::from_origin_size(
            (f64::from(x), f64::from(y)),
            (f64::from(w), f64::from(h)),
        )
    })
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Delete(usize),
    Grow(usize),
    Shrink(usize),
}

fn any_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            any::<usize>().prop_map(Op::Delete),
            any::<usize>().prop_map(Op::Grow),
            any::<usize>().prop_map(Op::Shrink),
        ],
        0..24,
    )
}

fn build(tree: &mut Tree<u32>, shape: &Shape, next: &mut u32) -> NodeId {
    *next += 1;
    let label = *next;
    match shape {
        Shape::Leaf(w) => tree.leaf(label, f64::from(*w)),
        Shape::Branch(children) => {
            let ids: Vec<_> = children.iter().map(|c| build(tree, c, next)).collect();
            tree.branch(label, ids)
        }
    }
}

fn build_tree(shape: &Shape) -> (Tree<u32>, NodeId) {
    let mut tree = Tree::new();
    let root = build(&mut tree, shape, &mut 0);
    (tree, root)
}

fn apply(tree: &mut Tree<u32>, root: NodeId, ops: &[Op]) {
    for op in ops {
        let leaves: Vec<_> = tree.leaves(root).collect();
        if leaves.is_empty() {
            return;
        }
        match *op {
            Op::Delete(i) => tree.delete(leaves[i % leaves.len()]),
            Op::Grow(i) => tree.scale_weight(leaves[i % leaves.len()], Adjust::Grow),
            Op::Shrink(i) => tree.scale_weight(leaves[i % leaves.len()], Adjust::Shrink),
        }
    }
}

fn ancestors(tree: &Tree<u32>, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut current = tree.parent_of(id);
    while let Some(p) = current {
        out.push(p);
        current = tree.parent_of(p);
    }
    out
}

fn assert_tiles(rects: &[Rect], bounds: Rect, tolerance: f64) -> Result<(), TestCaseError> {
    for (i, a) in rects.iter().enumerate() {
        prop_assert!(a.x0 >= bounds.x0 - tolerance && a.x1 <= bounds.x1 + tolerance);
        prop_assert!(a.y0 >= bounds.y0 - tolerance && a.y1 <= bounds.y1 + tolerance);
        prop_assert!(a.width() >= 0.0 && a.height() >= 0.0);
        for b in &rects[i + 1..] {
            prop_assert!(
                a.intersect(*b).area() <= tolerance,
                "{a:?} overlaps {b:?}"
            );
        }
    }
    let covered: f64 = rects.iter().map(|r| r.area()).sum();
    prop_assert!(
        (covered - bounds.area()).abs() <= tolerance * bounds.area().max(1.0),
        "tiles cover {covered}, bounds {}",
        bounds.area()
    );
    Ok(())
}

proptest! {
    #[test]
    fn floor_layout_tiles_bounds_exactly(shape in any_shape(), bounds in any_bounds()) {
        let (tree, root) = build_tree(&shape);
        prop_assume!(tree.weight(root) > 0.0);
        let layout = LayoutEngine::new().layout(&tree, root, bounds);
        let rects: Vec<_> = layout.tiles().iter().map(|t| t.rect).collect();
        assert_tiles(&rects, bounds, 0.0)?;
    }

    #[test]
    fn exact_layout_tiles_bounds(shape in any_shape(), bounds in any_bounds()) {
        let (tree, root) = build_tree(&shape);
        prop_assume!(tree.weight(root) > 0.0);
        let engine = LayoutEngine::with_options(LayoutOptions::new().snap(Snap::Exact));
        let layout = engine.layout(&tree, root, bounds);
        let rects: Vec<_> = layout.tiles().iter().map(|t| t.rect).collect();
        assert_tiles(&rects, bounds, 1e-6)?;
    }

    #[test]
    fn tiling_survives_mutation(shape in any_shape(), bounds in any_bounds(), ops in any_ops()) {
        let (mut tree, root) = build_tree(&shape);
        apply(&mut tree, root, &ops);
        prop_assume!(tree.weight(root) > 1e-6);
        let layout = LayoutEngine::new().layout(&tree, root, bounds);
        let rects: Vec<_> = layout.tiles().iter().map(|t| t.rect).collect();
        assert_tiles(&rects, bounds, 0.0)?;
    }

    #[test]
    fn only_live_weighted_leaves_get_tiles(shape in any_shape(), bounds in any_bounds(), ops in any_ops()) {
        let (mut tree, root) = build_tree(&shape);
        let all_leaves: Vec<_> = tree.leaves(root).collect();
        apply(&mut tree, root, &ops);
        let layout = LayoutEngine::new().layout(&tree, root, bounds);

        let expected: Vec<_> = tree
            .leaves(root)
            .filter(|&id| tree.weight(id) > 0.0)
            .collect();
        let got: Vec<_> = layout.tiles().iter().map(|t| t.node).collect();
        if tree.weight(root) > 0.0 {
            prop_assert_eq!(&got, &expected);
        } else {
            prop_assert!(got.is_empty());
        }
        for id in all_leaves {
            if tree.is_empty(id) {
                prop_assert_eq!(layout.rect_of(id), None);
            }
        }
        prop_assert_eq!(layout.hit_index().len(), layout.len());
    }

    #[test]
    fn weights_are_conserved(shape in any_shape(), ops in any_ops()) {
        let (mut tree, root) = build_tree(&shape);
        prop_assert!(tree.weights_consistent(root));
        apply(&mut tree, root, &ops);
        prop_assert!(tree.weights_consistent(root));
        prop_assert!(tree.weight(root) >= 0.0);
    }

    #[test]
    fn scale_moves_every_ancestor_by_the_same_delta(
        shape in any_shape(),
        pick in any::<usize>(),
        grow in any::<bool>(),
    ) {
        let (mut tree, root) = build_tree(&shape);
        let leaves: Vec<_> = tree.leaves(root).collect();
        let leaf = leaves[pick % leaves.len()];
        let chain = ancestors(&tree, leaf);
        let before_leaf = tree.weight(leaf);
        let before: Vec<_> = chain.iter().map(|&a| tree.weight(a)).collect();

        tree.scale_weight(leaf, Adjust::from_grow(grow));

        let delta = if grow { before_leaf * SCALE_STEP } else { -before_leaf * SCALE_STEP };
        prop_assert!((tree.weight(leaf) - (before_leaf + delta)).abs() <= 1e-9);
        for (&a, &w) in chain.iter().zip(&before) {
            prop_assert!((tree.weight(a) - (w + delta)).abs() <= 1e-9 * w.max(1.0));
        }
    }

    #[test]
    fn delete_subtracts_from_every_ancestor(shape in any_shape(), pick in any::<usize>()) {
        let (mut tree, root) = build_tree(&shape);
        let leaves: Vec<_> = tree.leaves(root).collect();
        let leaf = leaves[pick % leaves.len()];
        let removed = tree.weight(leaf);
        let chain = ancestors(&tree, leaf);
        let before: Vec<_> = chain.iter().map(|&a| tree.weight(a)).collect();

        tree.delete(leaf);

        prop_assert!(tree.is_empty(leaf));
        prop_assert_eq!(tree.weight(leaf), 0.0);
        for (&a, &w) in chain.iter().zip(&before) {
            prop_assert_eq!(tree.weight(a), w - removed);
        }
    }
}
