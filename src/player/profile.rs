//! Write-through player state.
//!
//! `PlayerProfile` is the inventory mutation layer: every setter updates
//! the in-memory counts, serializes them with
//! [`serialize`](super::persistence::serialize) and hands the text to its
//! [`SaveSink`] before returning. There is no batching and no dirty flag.

use std::path::{Path, PathBuf};

use crate::core::{CardId, CatalogError};
use crate::store::RecordStore;

use super::counts::CountMap;
use super::persistence::serialize;

/// Destination for saved player data.
pub trait SaveSink {
    /// Persist the full serialized state, replacing what was there.
    fn write_text(&mut self, text: &str) -> Result<(), CatalogError>;
}

/// Writes the save to a file, creating parent directories as needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveSink for FileSink {
    fn write_text(&mut self, text: &str) -> Result<(), CatalogError> {
        let wrap = |source: std::io::Error| CatalogError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(wrap)?;
        }
        std::fs::write(&self.path, text).map_err(wrap)
    }
}

/// Keeps the last save in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySink {
    last: Option<String>,
    writes: usize,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent save, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// How many saves have been written.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SaveSink for MemorySink {
    fn write_text(&mut self, text: &str) -> Result<(), CatalogError> {
        self.last = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Coins, owned copies and deck copies for one player.
#[derive(Clone, Debug)]
pub struct PlayerProfile<S: SaveSink> {
    coins: i64,
    inventory: CountMap,
    deck: CountMap,
    sink: S,
}

impl<S: SaveSink> PlayerProfile<S> {
    /// Create an empty profile. Nothing is written until the first mutation.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            coins: 0,
            inventory: CountMap::new(),
            deck: CountMap::new(),
            sink,
        }
    }

    /// Seed a profile with the player state a store loaded.
    #[must_use]
    pub fn from_store(store: &RecordStore, sink: S) -> Self {
        Self {
            coins: store.coins(),
            inventory: store.inventory().clone(),
            deck: store.deck().clone(),
            sink,
        }
    }

    /// Coin balance.
    #[must_use]
    pub fn coins(&self) -> i64 {
        self.coins
    }

    /// Owned copies.
    #[must_use]
    pub fn inventory(&self) -> &CountMap {
        &self.inventory
    }

    /// Deck copies.
    #[must_use]
    pub fn deck(&self) -> &CountMap {
        &self.deck
    }

    /// Owned copies of one card.
    #[must_use]
    pub fn card_count(&self, id: CardId) -> u32 {
        self.inventory.get(id)
    }

    /// Deck copies of one card.
    #[must_use]
    pub fn deck_count(&self, id: CardId) -> u32 {
        self.deck.get(id)
    }

    /// The save sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the profile, returning its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Current state in save format.
    #[must_use]
    pub fn serialize(&self) -> String {
        serialize(self.coins, &self.inventory, &self.deck)
    }

    /// Write the current state to the sink.
    pub fn save(&mut self) -> Result<(), CatalogError> {
        let text = self.serialize();
        self.sink.write_text(&text)?;
        tracing::info!(
            coins = self.coins,
            cards = self.inventory.len(),
            deck = self.deck.len(),
            "player data saved"
        );
        Ok(())
    }

    /// Overwrite the owned count. Zero removes the card.
    pub fn set_card_count(&mut self, id: CardId, count: u32) -> Result<(), CatalogError> {
        self.inventory.set(id, count);
        self.save()
    }

    /// Add one owned copy per entry in `drawn`.
    ///
    /// An empty slice changes nothing and writes nothing.
    pub fn add_drawn_cards(&mut self, drawn: &[CardId]) -> Result<(), CatalogError> {
        if drawn.is_empty() {
            return Ok(());
        }
        for &id in drawn {
            self.inventory.add(id, 1);
        }
        self.save()
    }

    /// Remove every owned copy of a card. No write if it was not held.
    pub fn remove_card(&mut self, id: CardId) -> Result<(), CatalogError> {
        match self.inventory.remove(id) {
            Some(_) => self.save(),
            None => Ok(()),
        }
    }

    /// Remove every owned card. The deck is left alone.
    pub fn clear_cards(&mut self) -> Result<(), CatalogError> {
        self.inventory.clear();
        self.save()
    }

    /// Overwrite the deck count. Zero removes the card from the deck.
    pub fn set_deck_count(&mut self, id: CardId, count: u32) -> Result<(), CatalogError> {
        self.deck.set(id, count);
        self.save()
    }

    /// Add copies to the deck. Adding zero is a no-op.
    pub fn add_deck_card(&mut self, id: CardId, copies: u32) -> Result<(), CatalogError> {
        if copies == 0 {
            return Ok(());
        }
        self.deck.add(id, copies);
        self.save()
    }

    /// Remove up to `copies` from the deck.
    pub fn remove_deck_card(&mut self, id: CardId, copies: u32) -> Result<(), CatalogError> {
        if !self.deck.contains(id) {
            return Ok(());
        }
        self.deck.take(id, copies);
        self.save()
    }

    /// Overwrite the coin balance.
    pub fn set_coins(&mut self, coins: i64) -> Result<(), CatalogError> {
        self.coins = coins;
        self.save()
    }

    /// Deduct `amount` if the balance covers it.
    ///
    /// Fails with [`CatalogError::InsufficientCoins`] and leaves the balance
    /// untouched otherwise.
    pub fn try_spend_coins(&mut self, amount: i64) -> Result<(), CatalogError> {
        if self.coins < amount {
            return Err(CatalogError::InsufficientCoins {
                have: self.coins,
                need: amount,
            });
        }
        self.coins -= amount;
        self.save()
    }

    /// Drop owned and deck entries for IDs the store does not define.
    ///
    /// Returns how many entries were removed.
    pub fn trim_unknown_ids(&mut self, store: &RecordStore) -> Result<usize, CatalogError> {
        let removed = self.inventory.retain_ids(|id| store.contains(id)) + self.deck.retain_ids(|id| store.contains(id));
        if removed > 0 {
            tracing::info!(removed, "trimmed card ids missing from the catalog");
        }
        self.save()?;
        Ok(removed)
    }
}
