// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::Rgb;

/// Seed used by [`Tree::new`](crate::Tree::new).
pub(crate) const DEFAULT_SEED: u64 = 0x5EED_7E55_E2A0_0001;

/// Seeded color source, one draw per constructed node.
#[derive(Clone, Debug)]
pub(crate) struct ColorStream {
    rng: SmallRng,
}

impl ColorStream {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub(crate) fn next_color(&mut self) -> Rgb {
        Rgb::from(self.rng.random::<[u8; 3]>())
    }
}
