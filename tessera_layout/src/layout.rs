// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The output of a layout pass.

use alloc::vec::Vec;
use kurbo::{Point, Rect};
use tessera_index::HitIndex;
use tessera_tree::{NodeId, Rgb, Tree};

/// One rectangle of a treemap: a live leaf and the area assigned to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    /// The leaf this tile represents.
    pub node: NodeId,
    /// Assigned area, in the coordinate space of the input rectangle.
    pub rect: Rect,
    /// The leaf's color.
    pub color: Rgb,
}

/// Result of a layout pass: the tiles in traversal order plus a hit index over them.
///
/// A `Layout` is a snapshot. It records the [`Tree::revision`] it was computed from, and any
/// later mutation of the tree leaves it stale (see [`Layout::is_stale`]). Hit testing a stale
/// layout is not an error, but it answers for the old geometry: tombstoned leaves may still be
/// returned. Re-run the layout after mutating.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub(crate) tiles: Vec<Tile>,
    pub(crate) hits: HitIndex<NodeId>,
    pub(crate) bounds: Rect,
    pub(crate) revision: u64,
}

impl Layout {
    /// An empty layout, for use with [`LayoutEngine::layout_into`](crate::LayoutEngine::layout_into).
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles for every live leaf with positive weight, in depth-first child order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// `(rect, color)` pairs ready for drawing, in the same order as [`Layout::tiles`].
    pub fn rects(&self) -> impl Iterator<Item = (Rect, Rgb)> + '_ {
        self.tiles.iter().map(|t| (t.rect, t.color))
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true if the pass produced no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The leaf → rectangle index built by this pass.
    pub fn hit_index(&self) -> &HitIndex<NodeId> {
        &self.hits
    }

    /// The leaf under `point`, if any. Edges count as inside; on a shared edge the tile that
    /// comes first in [`Layout::tiles`] wins.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.hits.find(point)
    }

    /// The rectangle assigned to `node` by this pass.
    pub fn rect_of(&self, node: NodeId) -> Option<Rect> {
        self.hits.rect_of(node)
    }

    /// The rectangle this pass partitioned.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The tree revision this pass was computed from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true if `tree` has been mutated since this pass.
    ///
    /// Only meaningful for the tree the layout was computed from.
    pub fn is_stale<L>(&self, tree: &Tree<L>) -> bool {
        tree.revision() != self.revision
    }

    /// Smallest rectangle enclosing every tile, or `None` for an empty layout.
    pub fn union(&self) -> Option<Rect> {
        let mut it = self.tiles.iter().map(|t| t.rect);
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    /// Total area covered by the tiles.
    pub fn area(&self) -> f64 {
        self.tiles.iter().map(|t| t.rect.area()).sum()
    }

    /// Consume the layout and return its tiles.
    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    pub(crate) fn reset(&mut self, bounds: Rect, revision: u64) {
        self.tiles.clear();
        self.hits.clear();
        self.bounds = bounds;
        self.revision = revision;
    }

    pub(crate) fn push(&mut self, tile: Tile) {
        self.hits.insert(tile.node, tile.rect);
        self.tiles.push(tile);
    }
}
