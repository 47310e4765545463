// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Tree: a weighted hierarchy for treemaps.
//!
//! - Leaves carry an authoritative, non-negative weight; internal nodes weigh the sum of their
//!   children.
//! - The two supported mutations, [`Tree::delete`] and [`Tree::scale_weight`], keep that
//!   invariant by propagating a delta up the ancestor chain. An edit costs O(depth), not
//!   O(subtree).
//! - Deletion leaves a tombstone in place, so child order is stable and [`NodeId`]s never
//!   dangle.
//!
//! The tree does no layout. Hand it to `tessera_layout` to turn the weights into rectangles.
//!
//! ## API overview
//!
//! - [`Tree`]: arena owning every node, generic over the label type.
//! - [`NodeId`]: handle of a node.
//! - [`Rgb`]: the fixed color picked for each node at construction.
//! - [`Adjust`]: grow/shrink direction for [`Tree::scale_weight`].
//!
//! Key operations:
//! - [`Tree::leaf`], [`Tree::branch`], [`Tree::empty`], [`Tree::insert`] → [`NodeId`]
//! - [`Tree::delete`] and [`Tree::scale_weight`]
//! - [`Tree::path_to_root`] for status lines, [`Tree::outline`] for debugging
//! - [`Tree::weight`], [`Tree::label`], [`Tree::color`], [`Tree::children_of`],
//!   [`Tree::parent_of`], [`Tree::leaves`]
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for deletions and resizes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod color;
mod tree;
mod types;

pub use tree::{Leaves, SCALE_STEP, Tree};
pub use types::{Adjust, NodeId, Rgb};
