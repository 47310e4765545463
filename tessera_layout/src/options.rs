// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout configuration.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// How each child's share of the split axis is rounded.
///
/// Whatever the mode, the last child that receives area spans from the cursor to the trailing
/// edge of its parent's rectangle, so the rounding remainder is absorbed there and the children
/// tile the parent exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Snap {
    /// Round every share but the last down to a whole unit (pixel-aligned output for
    /// integral input rectangles).
    #[default]
    Floor,
    /// Use exact proportional shares with no rounding.
    Exact,
}

impl Snap {
    #[inline]
    pub(crate) fn apply(self, share: f64) -> f64 {
        match self {
            Self::Floor => share.floor(),
            Self::Exact => share,
        }
    }
}

/// Options for [`LayoutEngine`](crate::LayoutEngine).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Rounding of child shares. Defaults to [`Snap::Floor`].
    pub snap: Snap,
}

impl LayoutOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rounding mode.
    pub fn snap(mut self, snap: Snap) -> Self {
        self.snap = snap;
        self
    }
}
