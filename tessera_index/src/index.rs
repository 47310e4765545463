// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion-ordered key → rectangle map with point queries.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

/// A map from key to its most recently assigned rectangle, queried by point.
///
/// Lookups by point scan entries in insertion order and return the first rectangle that
/// contains the point (see [`contains_inclusive`]). Lookups by key are hashed.
#[derive(Clone, Debug)]
pub struct HitIndex<K> {
    entries: Vec<(K, Rect)>,
    slots: HashMap<K, usize>,
}

impl<K> Default for HitIndex<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> HitIndex<K> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with room for `n` entries.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
            slots: HashMap::with_capacity(n),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `rect` for `key`.
    ///
    /// A new key is appended. A key already present keeps its position and has its rectangle
    /// replaced; the previous rectangle is returned.
    pub fn insert(&mut self, key: K, rect: Rect) -> Option<Rect> {
        if let Some(&slot) = self.slots.get(&key) {
            let previous = core::mem::replace(&mut self.entries[slot].1, rect);
            return Some(previous);
        }
        self.slots.insert(key, self.entries.len());
        self.entries.push((key, rect));
        None
    }

    /// The rectangle last recorded for `key`.
    pub fn rect_of(&self, key: K) -> Option<Rect> {
        self.slots.get(&key).map(|&slot| self.entries[slot].1)
    }

    /// Whether `key` has an entry.
    pub fn contains_key(&self, key: K) -> bool {
        self.slots.contains_key(&key)
    }

    /// Return the first key, in insertion order, whose rectangle contains `point`.
    ///
    /// Returns `None` when the point lies outside every rectangle. That is an ordinary
    /// outcome (for example a click on a gap or outside the map), not an error.
    pub fn find(&self, point: Point) -> Option<K> {
        self.entries
            .iter()
            .find(|(_, rect)| contains_inclusive(*rect, point))
            .map(|&(key, _)| key)
    }

    /// Iterate every key whose rectangle contains `point`, in insertion order.
    pub fn find_all(&self, point: Point) -> impl Iterator<Item = K> + '_ {
        self.entries
            .iter()
            .filter(move |(_, rect)| contains_inclusive(*rect, point))
            .map(|&(key, _)| key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, Rect)> + '_ {
        self.entries.iter().copied()
    }

    /// Remove every entry, keeping allocations.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
    }
}

/// Whether `rect` contains `point`, counting all four edges as inside.
///
/// This differs from [`Rect::contains`], which excludes the right and bottom edges. `rect` is
/// normalized first so inverted rectangles behave like their upright form.
#[inline]
pub fn contains_inclusive(rect: Rect, point: Point) -> bool {
    let r = rect.abs();
    r.x0 <= point.x && point.x <= r.x1 && r.y0 <= point.y && point.y <= r.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn edges_are_inclusive() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        for p in [
            Point::new(10.0, 20.0),
            Point::new(30.0, 40.0),
            Point::new(30.0, 20.0),
            Point::new(10.0, 40.0),
            Point::new(20.0, 30.0),
        ] {
            assert!(contains_inclusive(r, p), "{p:?} should be inside {r:?}");
        }
        assert!(!contains_inclusive(r, Point::new(30.5, 30.0)));
        assert!(!contains_inclusive(r, Point::new(20.0, 19.9)));
    }

    #[test]
    fn first_inserted_wins_on_overlap() {
        let mut idx = HitIndex::new();
        idx.insert(1_u32, Rect::new(0.0, 0.0, 50.0, 50.0));
        idx.insert(2_u32, Rect::new(25.0, 25.0, 75.0, 75.0));
        assert_eq!(idx.find(Point::new(30.0, 30.0)), Some(1));
        assert_eq!(idx.find(Point::new(60.0, 60.0)), Some(2));
        assert_eq!(
            idx.find_all(Point::new(30.0, 30.0)).collect::<Vec<_>>(),
            [1, 2]
        );
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut idx = HitIndex::new();
        idx.insert('a', Rect::new(0.0, 0.0, 10.0, 10.0));
        idx.insert('b', Rect::new(0.0, 0.0, 10.0, 10.0));
        let prev = idx.insert('b', Rect::new(5.0, 5.0, 20.0, 20.0));
        assert_eq!(prev, Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let prev = idx.insert('a', Rect::new(100.0, 100.0, 110.0, 110.0));
        assert!(prev.is_some());
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.iter().map(|(k, _)| k).collect::<Vec<_>>(), ['a', 'b']);
        assert_eq!(idx.find(Point::new(6.0, 6.0)), Some('b'));
        assert_eq!(idx.rect_of('a'), Some(Rect::new(100.0, 100.0, 110.0, 110.0)));
    }

    #[test]
    fn miss_is_none() {
        let mut idx = HitIndex::new();
        assert_eq!(idx.find(Point::ORIGIN), None::<u8>);
        idx.insert(0_u8, Rect::new(1.0, 1.0, 2.0, 2.0));
        assert_eq!(idx.find(Point::ORIGIN), None);
        assert_eq!(idx.rect_of(9), None);
    }

    #[test]
    fn clear_empties() {
        let mut idx = HitIndex::with_capacity(4);
        idx.insert(3_i32, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(idx.contains_key(3));
        idx.clear();
        assert!(idx.is_empty());
        assert!(!idx.contains_key(3));
        assert_eq!(idx.find(Point::new(0.5, 0.5)), None);
    }
}
