// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slice-and-dice partitioning of a weighted tree.

use alloc::{vec, vec::Vec};
use kurbo::Rect;
use tessera_tree::{NodeId, Tree};

use crate::layout::{Layout, Tile};
use crate::options::LayoutOptions;

/// Maps a [`Tree`] onto a rectangle.
///
/// Each internal node's rectangle is cut into strips along its wider side, one strip per child
/// in stored order, each strip as wide as the child's share of the parent's weight. Strips are
/// then cut again for the grandchildren, and so on down to the leaves. Empty nodes and nodes
/// of zero weight are pruned along with their subtrees.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use tessera_layout::LayoutEngine;
/// use tessera_tree::Tree;
///
/// let mut tree = Tree::new();
/// let a = tree.leaf("a", 30.0);
/// let b = tree.leaf("b", 70.0);
/// let root = tree.branch("root", [a, b]);
///
/// let engine = LayoutEngine::new();
/// let layout = engine.layout(&tree, root, Rect::new(0.0, 0.0, 100.0, 50.0));
/// assert_eq!(layout.rect_of(a), Some(Rect::new(0.0, 0.0, 30.0, 50.0)));
/// assert_eq!(layout.rect_of(b), Some(Rect::new(30.0, 0.0, 100.0, 50.0)));
/// assert_eq!(layout.hit_test(Point::new(50.0, 10.0)), Some(b));
///
/// tree.delete(a);
/// assert!(layout.is_stale(&tree));
/// let layout = engine.layout(&tree, root, Rect::new(0.0, 0.0, 100.0, 50.0));
/// assert_eq!(layout.len(), 1);
/// assert_eq!(layout.rect_of(b), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

/// Which way a rectangle is cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Split {
    /// Side-by-side strips along x.
    Columns,
    /// Stacked strips along y.
    Rows,
}

impl Split {
    /// Cut along the wider side; squares are cut into rows.
    fn of(rect: Rect) -> Self {
        if rect.width() > rect.height() {
            Self::Columns
        } else {
            Self::Rows
        }
    }

    fn range(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Columns => (rect.x0, rect.x1),
            Self::Rows => (rect.y0, rect.y1),
        }
    }

    fn strip(self, rect: Rect, from: f64, to: f64) -> Rect {
        match self {
            Self::Columns => Rect::new(from, rect.y0, to, rect.y1),
            Self::Rows => Rect::new(rect.x0, from, rect.x1, to),
        }
    }
}

impl LayoutEngine {
    /// An engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with the given options.
    pub fn with_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// The engine's options.
    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    /// Lay out the subtree under `root` inside `rect`.
    ///
    /// `rect` is normalized first, so an inverted rectangle behaves like its upright form.
    pub fn layout<L>(&self, tree: &Tree<L>, root: NodeId, rect: Rect) -> Layout {
        let mut layout = Layout::new();
        self.layout_into(tree, root, rect, &mut layout);
        layout
    }

    /// Like [`LayoutEngine::layout`], but reuses the allocations of `out`.
    ///
    /// Every previous tile and hit entry in `out` is discarded.
    pub fn layout_into<L>(&self, tree: &Tree<L>, root: NodeId, rect: Rect, out: &mut Layout) {
        let rect = rect.abs();
        out.reset(rect, tree.revision());

        #[cfg(feature = "tracing")]
        let mut pruned = 0_usize;

        let emits = emitting_nodes(tree, root);

        // Depth-first with an explicit stack. Each node's strips are pushed in reverse so that
        // children pop, and emit their tiles, in stored order.
        let mut stack = vec![(root, rect)];
        while let Some((id, rect)) = stack.pop() {
            if !emits[slot(id)] {
                continue;
            }
            if tree.children_of(id).is_empty() {
                out.push(Tile {
                    node: id,
                    rect,
                    color: tree.color(id),
                });
                continue;
            }
            let start = stack.len();
            let _skipped = self.partition(tree, id, rect, &emits, &mut stack);
            stack[start..].reverse();
            #[cfg(feature = "tracing")]
            {
                pruned += _skipped;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            root = root.index(),
            tiles = out.tiles.len(),
            pruned = pruned + usize::from(!emits[slot(root)]),
            "layout pass"
        );
    }

    /// Push one strip of `rect` per child of `id` that emits tiles, returning how many children
    /// were skipped.
    fn partition<L>(
        &self,
        tree: &Tree<L>,
        id: NodeId,
        rect: Rect,
        emits: &[bool],
        out: &mut Vec<(NodeId, Rect)>,
    ) -> usize {
        let children = tree.children_of(id);
        // Pruned trailing children must not own the rounding remainder, so the strip that runs
        // to the trailing edge goes to the last child that actually emits tiles.
        let Some(last) = children.iter().rposition(|&c| emits[slot(c)]) else {
            return children.len();
        };

        let split = Split::of(rect);
        let (start, end) = split.range(rect);
        let extent = end - start;
        let total = tree.weight(id);
        let mut cursor = start;
        let mut skipped = children.len() - last - 1;

        for &child in &children[..last] {
            if !emits[slot(child)] {
                skipped += 1;
                continue;
            }
            let share = self.options.snap.apply(tree.weight(child) * extent / total);
            let next = (cursor + share).min(end);
            out.push((child, split.strip(rect, cursor, next)));
            cursor = next;
        }
        out.push((children[last], split.strip(rect, cursor, end)));
        skipped
    }
}

/// Lay out `root` inside `rect` with default options.
pub fn layout<L>(tree: &Tree<L>, root: NodeId, rect: Rect) -> Layout {
    LayoutEngine::new().layout(tree, root, rect)
}

#[inline]
fn slot(id: NodeId) -> usize {
    id.index() as usize
}

/// Mark, per node slot, whether the node under `root` produces at least one tile.
///
/// A node emits when it is non-empty, has positive weight, and is either a leaf or has an
/// emitting child. The last clause only matters under float drift: an internal node can keep
/// a residual weight after all of its leaves are deleted, and it must not be handed area that
/// no tile would cover.
fn emitting_nodes<L>(tree: &Tree<L>, root: NodeId) -> Vec<bool> {
    let mut emits = vec![false; tree.node_count()];
    let mut stack = vec![(root, false)];
    while let Some((id, expanded)) = stack.pop() {
        if tree.is_empty(id) || tree.weight(id) <= 0.0 {
            continue;
        }
        let children = tree.children_of(id);
        if children.is_empty() {
            emits[slot(id)] = true;
        } else if expanded {
            emits[slot(id)] = children.iter().any(|&c| emits[slot(c)]);
        } else {
            stack.push((id, true));
            stack.extend(children.iter().map(|&c| (c, false)));
        }
    }
    emits
}
