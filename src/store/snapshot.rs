//! The store's contents as one swappable value.
//!
//! A load builds a fresh `Snapshot` off to the side and the store replaces
//! its current one in a single assignment, so readers only ever see a
//! complete document. Every field is a persistent map, so handing a copy
//! to a consumer costs O(1).

use im::HashMap;

use crate::cards::{CardKind, CardRecord};
use crate::core::CardId;
use crate::player::CountMap;

/// Typed records plus the player state parsed from the same document.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    records: HashMap<CardId, CardRecord>,
    inventory: CountMap,
    deck: CountMap,
    coins: i64,
}

impl Snapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert_record(&mut self, record: CardRecord) -> Option<CardRecord> {
        self.records.insert(record.id(), record)
    }

    /// Add owned copies.
    pub fn add_inventory(&mut self, id: CardId, copies: u32) {
        self.inventory.add(id, copies);
    }

    /// Add deck copies.
    pub fn add_deck(&mut self, id: CardId, copies: u32) {
        self.deck.add(id, copies);
    }

    /// Overwrite the coin balance.
    pub fn set_coins(&mut self, coins: i64) {
        self.coins = coins;
    }

    /// Look up a record.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardRecord> {
        self.records.get(&id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in arbitrary order.
    pub fn records(&self) -> impl Iterator<Item = &CardRecord> {
        self.records.values()
    }

    /// Records of one kind, sorted by ID.
    #[must_use]
    pub fn of_kind(&self, kind: CardKind) -> Vec<CardRecord> {
        let mut out: Vec<CardRecord> = self
            .records
            .values()
            .filter(|r| r.kind() == kind)
            .cloned()
            .collect();
        out.sort_by_key(CardRecord::id);
        out
    }

    /// Every record, sorted by ID.
    #[must_use]
    pub fn all(&self) -> Vec<CardRecord> {
        let mut out: Vec<CardRecord> = self.records.values().cloned().collect();
        out.sort_by_key(CardRecord::id);
        out
    }

    /// Sorted IDs of every record.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self.records.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Owned copies by card.
    #[must_use]
    pub fn inventory(&self) -> &CountMap {
        &self.inventory
    }

    /// Deck copies by card.
    #[must_use]
    pub fn deck(&self) -> &CountMap {
        &self.deck
    }

    /// Coin balance.
    #[must_use]
    pub fn coins(&self) -> i64 {
        self.coins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{MonsterRecord, SpellRecord};

    #[test]
    fn test_insert_replaces() {
        let mut snap = Snapshot::new();
        assert!(snap.insert_record(MonsterRecord::new(CardId::new(1), "A").into()).is_none());
        let old = snap.insert_record(SpellRecord::new(CardId::new(1), "B").into());
        assert_eq!(old.map(|r| r.kind()), Some(CardKind::Monster));
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.get(CardId::new(1)).map(CardRecord::kind), Some(CardKind::Spell));
    }

    #[test]
    fn test_of_kind_sorted() {
        let mut snap = Snapshot::new();
        snap.insert_record(MonsterRecord::new(CardId::new(3), "C").into());
        snap.insert_record(SpellRecord::new(CardId::new(2), "B").into());
        snap.insert_record(MonsterRecord::new(CardId::new(1), "A").into());

        let monsters: Vec<_> = snap.of_kind(CardKind::Monster).iter().map(CardRecord::id).collect();
        assert_eq!(monsters, vec![CardId::new(1), CardId::new(3)]);
        assert_eq!(snap.ids(), vec![CardId::new(1), CardId::new(2), CardId::new(3)]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut snap = Snapshot::new();
        snap.insert_record(MonsterRecord::new(CardId::new(1), "A").into());
        let copy = snap.clone();
        snap.insert_record(MonsterRecord::new(CardId::new(2), "B").into());
        snap.add_inventory(CardId::new(1), 2);

        assert_eq!(copy.len(), 1);
        assert!(copy.inventory().is_empty());
    }
}
