// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Index: the hit index of a treemap.
//!
//! A [`HitIndex`] maps keys (typically leaf handles) to the rectangle they were last assigned
//! and answers "which key is under this point?" with a linear scan.
//!
//! - Entries keep insertion order. Re-inserting a key updates its rectangle in place.
//! - Point containment is inclusive on all four edges, so a point on a shared edge belongs to
//!   both neighbors. The earliest-inserted entry wins such ties.
//! - There is no global state. Each layout pass owns its own index, so separate trees or
//!   repeated layouts never clobber each other's entries.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use tessera_index::HitIndex;
//!
//! let mut idx = HitIndex::new();
//! idx.insert('a', Rect::new(0.0, 0.0, 30.0, 50.0));
//! idx.insert('b', Rect::new(30.0, 0.0, 100.0, 50.0));
//!
//! assert_eq!(idx.find(Point::new(10.0, 10.0)), Some('a'));
//! // The shared edge resolves to the first entry.
//! assert_eq!(idx.find(Point::new(30.0, 10.0)), Some('a'));
//! assert_eq!(idx.find(Point::new(200.0, 10.0)), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod index;

pub use index::{HitIndex, contains_inclusive};
