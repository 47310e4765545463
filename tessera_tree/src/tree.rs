// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: construction, mutation, and queries.

use alloc::{string::String, vec, vec::Vec};
use core::fmt::{Display, Write as _};
use smallvec::SmallVec;

use crate::color::{ColorStream, DEFAULT_SEED};
use crate::types::{Adjust, NodeId, Rgb};

/// Fraction of a leaf's current weight added or removed by [`Tree::scale_weight`].
pub const SCALE_STEP: f64 = 0.01;

/// Fraction of its previous weight below which an ancestor is re-summed from its children.
const RESUM_BELOW: f64 = 0.9;

/// An arena of weighted nodes.
///
/// Each node carries an optional label of type `L`, a non-negative weight, an ordered list of
/// children, and a back-reference to its parent. The children lists are the ownership edges;
/// the parent link is a plain lookup.
///
/// A leaf's weight is authoritative. An internal node's weight is the sum of its children's
/// weights: it is computed once when the node is built and then kept up to date by
/// propagating deltas up the ancestor chain on every [`delete`](Tree::delete) and
/// [`scale_weight`](Tree::scale_weight).
///
/// Deleting a node turns it into a *tombstone* (label cleared, weight zeroed). Tombstones stay
/// in their parent's children list, so [`NodeId`]s never dangle.
///
/// ## Example
///
/// ```rust
/// use tessera_tree::Tree;
///
/// let mut tree = Tree::new();
/// let a = tree.leaf("a", 30.0);
/// let b = tree.leaf("b", 70.0);
/// let root = tree.branch("root", [a, b]);
/// assert_eq!(tree.weight(root), 100.0);
///
/// tree.delete(a);
/// assert!(tree.is_empty(a));
/// assert_eq!(tree.weight(root), 70.0);
/// assert_eq!(tree.children_of(root), &[a, b]);
/// ```
pub struct Tree<L> {
    nodes: Vec<Node<L>>,
    colors: ColorStream,
    revision: u64,
}

impl<L> core::fmt::Debug for Tree<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let live = self.nodes.iter().filter(|n| n.label.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_live", &live)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<L> Default for Tree<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node<L> {
    label: Option<L>,
    weight: f64,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    color: Rgb,
}

impl<L> Tree<L> {
    /// Create an empty tree whose node colors come from the default seed.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create an empty tree whose node colors come from `seed`.
    ///
    /// Two trees built with the same seed and the same sequence of constructions assign the
    /// same colors.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            nodes: Vec::new(),
            colors: ColorStream::new(seed),
            revision: 0,
        }
    }

    /// Create a detached leaf with the given label and weight.
    ///
    /// # Panics
    ///
    /// Panics if `weight` is negative or not finite.
    pub fn leaf(&mut self, label: L, weight: f64) -> NodeId {
        self.insert(Some(label), [], weight)
    }

    /// Create an internal node adopting `children`, in order.
    ///
    /// The node's weight is the sum of its children's weights at this point. Every child must
    /// be a detached root (for example a freshly built leaf or branch).
    ///
    /// # Panics
    ///
    /// Panics if a child already has a parent, or appears twice.
    pub fn branch(&mut self, label: L, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.insert(Some(label), children, 0.0)
    }

    /// Create a detached empty node (no label, zero weight, no children).
    pub fn empty(&mut self) -> NodeId {
        self.insert(None, [], 0.0)
    }

    /// General constructor.
    ///
    /// If `children` is non-empty the node's weight is the sum of the children's weights and
    /// `weight` must be left at `0.0`; otherwise `weight` becomes the leaf's weight. Each child
    /// gets its parent link set to the new node.
    ///
    /// # Panics
    ///
    /// - `label` is `None` and `children` is non-empty, or `weight` is non-zero.
    /// - `weight` is negative or not finite.
    /// - a child already has a parent, or appears twice.
    pub fn insert(
        &mut self,
        label: Option<L>,
        children: impl IntoIterator<Item = NodeId>,
        weight: f64,
    ) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        let children: Vec<NodeId> = children.into_iter().collect();
        assert!(
            label.is_some() || children.is_empty(),
            "an empty node cannot have children"
        );
        assert!(
            weight.is_finite() && weight >= 0.0,
            "node weight must be finite and non-negative, got {weight}"
        );
        assert!(
            label.is_some() || weight == 0.0,
            "an empty node must have zero weight, got {weight}"
        );

        let weight = if children.is_empty() {
            weight
        } else {
            debug_assert!(
                weight == 0.0,
                "an explicit weight is ignored when children are given"
            );
            let mut sum = 0.0;
            for &child in &children {
                let c = self.node_mut(child);
                assert!(c.parent.is_none(), "{child:?} already has a parent");
                c.parent = Some(id);
                sum += c.weight;
            }
            sum
        };

        let color = self.colors.next_color();
        self.nodes.push(Node {
            label,
            weight,
            children,
            parent: None,
            color,
        });
        self.revision += 1;
        id
    }

    /// Number of nodes ever created in this tree, tombstones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `id` was issued by a tree of this size.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Monotonic counter bumped by every construction and mutation.
    ///
    /// Layouts record the revision they were computed from, which lets callers detect a hit
    /// index that predates a mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true if `id` is an empty node (never labelled, or deleted).
    pub fn is_empty(&self, id: NodeId) -> bool {
        self.node(id).label.is_none()
    }

    /// Returns true if `id` is a live node without children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        let n = self.node(id);
        n.label.is_some() && n.children.is_empty()
    }

    /// The label of `id`, or `None` for empty nodes.
    pub fn label(&self, id: NodeId) -> Option<&L> {
        self.node(id).label.as_ref()
    }

    /// The current weight of `id`.
    pub fn weight(&self, id: NodeId) -> f64 {
        self.node(id).weight
    }

    /// The color assigned to `id` at construction (or by [`Tree::set_color`]).
    pub fn color(&self, id: NodeId) -> Rgb {
        self.node(id).color
    }

    /// Override the color of `id`.
    pub fn set_color(&mut self, id: NodeId, color: Rgb) {
        let n = self.node_mut(id);
        if n.color != color {
            n.color = color;
            self.revision += 1;
        }
    }

    /// Returns the parent of `id`, or `None` for roots and detached tombstones.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// The children of `id` in stored order, tombstones included.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Walk parent links up to the root of the tree containing `id`.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current
    }

    /// Iterate live leaves under `id` depth-first, in child order.
    ///
    /// If `id` is itself a live leaf it is the only item.
    pub fn leaves(&self, id: NodeId) -> Leaves<'_, L> {
        Leaves {
            tree: self,
            stack: vec![id],
        }
    }

    /// Render the labels on the path from the top of the tree down to `id`, joined by
    /// `separator`.
    ///
    /// The ultimate root is not part of the path: for a tree `World > Europe > France`,
    /// `path_to_root(france, " -> ")` is `"Europe -> France"`.
    ///
    /// Returns `None` when `id` has no ancestor (it is a root) or is empty. Those nodes have no
    /// meaningful path.
    pub fn path_to_root(&self, id: NodeId, separator: &str) -> Option<String>
    where
        L: Display,
    {
        let node = self.node(id);
        let label = node.label.as_ref()?;
        let mut ancestor = node.parent?;

        let mut labels: SmallVec<[&L; 8]> = SmallVec::new();
        labels.push(label);
        while let Some(next) = self.node(ancestor).parent {
            if let Some(l) = self.node(ancestor).label.as_ref() {
                labels.push(l);
            }
            ancestor = next;
        }

        let mut out = String::new();
        for (i, l) in labels.iter().rev().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            let _ = write!(out, "{l}");
        }
        Some(out)
    }

    /// Render the subtree under `id`, one node per line, tab-indented by depth.
    ///
    /// Each line is `label weight`. Empty nodes have no label, so they print as `<empty>`.
    pub fn outline(&self, id: NodeId) -> String
    where
        L: Display,
    {
        let mut out = String::new();
        let mut stack = vec![(id, 0_usize)];
        while let Some((current, depth)) = stack.pop() {
            let n = self.node(current);
            for _ in 0..depth {
                out.push('\t');
            }
            let _ = match &n.label {
                Some(label) => writeln!(out, "{label} {}", n.weight),
                None => writeln!(out, "<empty> {}", n.weight),
            };
            for &child in n.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    /// Delete `id`, leaving a tombstone in its parent's children list.
    ///
    /// The node's label is cleared and its weight zeroed, and its pre-deletion weight is
    /// subtracted from every ancestor. Deleting an internal node deletes its whole subtree;
    /// the children of a deleted node become detached tombstones. Deleting an empty node does
    /// nothing.
    pub fn delete(&mut self, id: NodeId) {
        if self.is_empty(id) {
            return;
        }
        let removed = self.node(id).weight;
        self.tombstone_subtree(id);
        self.propagate(id, -removed);
        self.revision += 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(node = id.index(), removed, "deleted node");
    }

    /// Grow or shrink the leaf `id` by [`SCALE_STEP`] of its current weight.
    ///
    /// The same absolute delta is applied to every ancestor. Repeated calls compound and no
    /// rounding is applied. Does nothing on empty nodes.
    ///
    /// # Panics
    ///
    /// Panics if `id` is an internal node: its weight is derived from its children.
    pub fn scale_weight(&mut self, id: NodeId, adjust: Adjust) {
        let n = self.node(id);
        if n.label.is_none() {
            return;
        }
        assert!(
            n.children.is_empty(),
            "scale_weight is only defined on leaves"
        );
        let step = n.weight * SCALE_STEP;
        let delta = match adjust {
            Adjust::Grow => step,
            Adjust::Shrink => -step,
        };
        let n = self.node_mut(id);
        n.weight = (n.weight + delta).max(0.0);
        self.propagate(id, delta);
        self.revision += 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(node = id.index(), delta, "scaled node weight");
    }

    /// Returns true if every internal node under `id` weighs the sum of its children, within a
    /// small relative tolerance for accumulated float error.
    pub fn weights_consistent(&self, id: NodeId) -> bool {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !self.matches_children(current) {
                return false;
            }
            stack.extend_from_slice(&self.node(current).children);
        }
        true
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node<L> {
        &self.nodes[id.idx()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<L> {
        &mut self.nodes[id.idx()]
    }

    fn tombstone_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let n = self.node_mut(current);
            n.label = None;
            n.weight = 0.0;
            let children = core::mem::take(&mut n.children);
            for child in children {
                self.node_mut(child).parent = None;
                stack.push(child);
            }
        }
    }

    /// Add `delta` to every ancestor of `id`.
    ///
    /// An ancestor that loses more than a tenth of its weight is re-summed from its children
    /// instead, and the change it actually underwent is what moves on to the next ancestor.
    /// Subtracting a weight from a much larger sum leaves rounding error that the smaller
    /// remainder cannot absorb; the children are already up to date, so their sum is exact
    /// for what is left.
    fn propagate(&mut self, id: NodeId, delta: f64) {
        let mut delta = delta;
        let mut current = self.node(id).parent;
        while let Some(ancestor) = current {
            let prev = self.node(ancestor).weight;
            let mut weight = (prev + delta).max(0.0);
            if weight < prev * RESUM_BELOW {
                weight = self.children_weight(ancestor);
                delta = weight - prev;
            }
            let n = self.node_mut(ancestor);
            n.weight = weight;
            current = n.parent;
            debug_assert!(
                self.matches_children(ancestor),
                "{ancestor:?} no longer weighs the sum of its children"
            );
        }
    }

    fn children_weight(&self, id: NodeId) -> f64 {
        self.node(id)
            .children
            .iter()
            .map(|&c| self.node(c).weight)
            .sum()
    }

    fn matches_children(&self, id: NodeId) -> bool {
        let n = self.node(id);
        if n.children.is_empty() {
            return true;
        }
        let sum = self.children_weight(id);
        let scale = sum.abs().max(n.weight.abs()).max(1.0);
        (n.weight - sum).abs() <= scale * 1e-9
    }
}

/// Iterator over live leaves, see [`Tree::leaves`].
#[derive(Debug)]
pub struct Leaves<'a, L> {
    tree: &'a Tree<L>,
    stack: Vec<NodeId>,
}

impl<L> Iterator for Leaves<'_, L> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            let n = self.tree.node(id);
            if n.label.is_none() {
                continue;
            }
            if n.children.is_empty() {
                return Some(id);
            }
            self.stack.extend(n.children.iter().rev().copied());
        }
        None
    }
}
