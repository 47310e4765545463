// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Layout: slice-and-dice treemaps.
//!
//! Given a [`tessera_tree::Tree`] and a bounding rectangle, [`LayoutEngine`] assigns every live
//! leaf a rectangle proportional to its weight and returns them as a [`Layout`].
//!
//! ## Algorithm
//!
//! Starting at the root with the whole rectangle:
//!
//! 1. A node that is empty or has zero weight is pruned with its subtree. It gets no tile,
//!    not even a zero-area one.
//! 2. A leaf takes the rectangle it was given.
//! 3. An internal node cuts its rectangle along the wider side (columns when width exceeds
//!    height, otherwise rows). Children take strips in stored order, each strip's extent being
//!    the child's share of the parent's weight (rounded down by default, see [`Snap`]). The
//!    last child that receives area runs to the trailing edge and absorbs the rounding
//!    remainder.
//!
//! For a tree with positive weight the tiles therefore never overlap and exactly cover the
//! input rectangle.
//!
//! ## Hit testing
//!
//! Each [`Layout`] owns a [`tessera_index::HitIndex`] from leaf to tile, so
//! [`Layout::hit_test`] resolves a pointer position to a leaf without walking the tree.
//! There is no shared registry: two layouts never see each other's entries. A layout is a
//! snapshot, so after [`Tree::delete`](tessera_tree::Tree::delete) or
//! [`Tree::scale_weight`](tessera_tree::Tree::scale_weight) run the layout again before the
//! next hit test. [`Layout::is_stale`] reports when that is needed.
//!
//! ## Features
//!
//! - `std` *(default)* / `libm`: numeric backend for `kurbo`.
//! - `tracing`: emit `tracing` events for each pass and for tree mutations.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod layout;
mod options;

pub use engine::{LayoutEngine, layout};
pub use layout::{Layout, Tile};
pub use options::{LayoutOptions, Snap};
