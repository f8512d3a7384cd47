//! Per-card copy counts.
//!
//! `CountMap` backs both the owned inventory and the committed deck. A card
//! that is not held has no entry: zero is represented by absence, never by
//! a stored `0`. Iteration is ordered by card ID so serialized output is
//! stable and diffable.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Mapping from card ID to a positive copy count.
///
/// Persistent map underneath, so cloning a snapshot is O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMap {
    counts: OrdMap<CardId, u32>,
}

impl CountMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of `id` held, 0 if none.
    #[must_use]
    pub fn get(&self, id: CardId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// True if at least one copy of `id` is held.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.counts.contains_key(&id)
    }

    /// Overwrite the count for `id`. Zero removes the entry.
    ///
    /// Returns the previous count.
    pub fn set(&mut self, id: CardId, count: u32) -> u32 {
        let previous = if count == 0 {
            self.counts.remove(&id)
        } else {
            self.counts.insert(id, count)
        };
        previous.unwrap_or(0)
    }

    /// Add copies of `id`, saturating. Adding zero is a no-op.
    ///
    /// Returns the new count.
    pub fn add(&mut self, id: CardId, copies: u32) -> u32 {
        let total = self.get(id).saturating_add(copies);
        if total > 0 {
            self.counts.insert(id, total);
        }
        total
    }

    /// Remove up to `copies` of `id`, dropping the entry at zero.
    ///
    /// Returns the new count.
    pub fn take(&mut self, id: CardId, copies: u32) -> u32 {
        let left = self.get(id).saturating_sub(copies);
        self.set(id, left);
        left
    }

    /// Remove `id` entirely, returning its count if it was held.
    pub fn remove(&mut self, id: CardId) -> Option<u32> {
        self.counts.remove(&id)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Keep only entries whose ID satisfies `keep`. Returns how many were removed.
    pub fn retain_ids<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(CardId) -> bool,
    {
        let doomed: Vec<CardId> = self.ids().filter(|&id| !keep(id)).collect();
        for id in &doomed {
            self.counts.remove(id);
        }
        doomed.len()
    }

    /// Number of distinct cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total copies across all cards.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Iterate `(id, count)` in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, u32)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }

    /// Iterate held IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.counts.keys().copied()
    }
}

impl FromIterator<(CardId, u32)> for CountMap {
    /// Collect pairs, summing repeated IDs and skipping zero counts.
    fn from_iter<I: IntoIterator<Item = (CardId, u32)>>(iter: I) -> Self {
        let mut map = CountMap::new();
        for (id, count) in iter {
            map.add(id, count);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut counts = CountMap::new();
        assert_eq!(counts.get(CardId::new(1)), 0);

        assert_eq!(counts.set(CardId::new(1), 3), 0);
        assert_eq!(counts.get(CardId::new(1)), 3);
        assert_eq!(counts.set(CardId::new(1), 5), 3);
    }

    #[test]
    fn test_zero_removes() {
        let mut counts = CountMap::new();
        counts.set(CardId::new(1), 3);
        counts.set(CardId::new(1), 0);
        assert!(!counts.contains(CardId::new(1)));
        assert!(counts.is_empty());

        counts.add(CardId::new(2), 0);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_add_accumulates() {
        let mut counts = CountMap::new();
        counts.add(CardId::new(7), 2);
        assert_eq!(counts.add(CardId::new(7), 3), 5);
        assert_eq!(counts.add(CardId::new(7), u32::MAX), u32::MAX);
    }

    #[test]
    fn test_take() {
        let mut counts = CountMap::new();
        counts.set(CardId::new(7), 3);
        assert_eq!(counts.take(CardId::new(7), 1), 2);
        assert_eq!(counts.take(CardId::new(7), 99), 0);
        assert!(!counts.contains(CardId::new(7)));
    }

    #[test]
    fn test_ordered_iteration() {
        let counts: CountMap = vec![
            (CardId::new(30), 1),
            (CardId::new(10), 2),
            (CardId::new(20), 3),
            (CardId::new(10), 1),
        ]
        .into_iter()
        .collect();

        let pairs: Vec<_> = counts.iter().collect();
        assert_eq!(
            pairs,
            vec![(CardId::new(10), 3), (CardId::new(20), 3), (CardId::new(30), 1)]
        );
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn test_retain_ids() {
        let mut counts: CountMap = (1..=5).map(|i| (CardId::new(i), 1)).collect();
        let removed = counts.retain_ids(|id| id.raw() % 2 == 1);
        assert_eq!(removed, 2);
        assert_eq!(counts.ids().collect::<Vec<_>>(), vec![CardId::new(1), CardId::new(3), CardId::new(5)]);
    }
}
