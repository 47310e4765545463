// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the weighted tree: node identifiers, colors, and resize directions.

/// Identifier for a node in a [`Tree`](crate::Tree).
///
/// Nodes are never physically removed from the arena (deletion leaves a tombstone), so an
/// identifier stays valid for the lifetime of the tree that issued it. Identifiers are ordered
/// by creation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Raw slot index of this node, useful as a stable key in host-side tables.
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// An opaque RGB color, one byte per channel.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Direction of a relative weight adjustment, see [`Tree::scale_weight`](crate::Tree::scale_weight).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Adjust {
    /// Increase the weight by one percent of its current value.
    Grow,
    /// Decrease the weight by one percent of its current value.
    Shrink,
}

impl Adjust {
    /// Map the `grow` flag used by viewers (up arrow = `true`) to a direction.
    pub const fn from_grow(grow: bool) -> Self {
        if grow { Self::Grow } else { Self::Shrink }
    }
}
