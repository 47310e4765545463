// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the Tessera crates. See `benches/layout.rs`.
