//! Pack opening.
//!
//! A pack costs [`PackConfig::cost`] coins and yields
//! [`PackConfig::cards_per_pack`] cards drawn uniformly, with replacement,
//! from every record in the store. Draws come from a seeded [`DrawRng`], so
//! a saved RNG state replays the same packs.

use crate::core::{CardId, CatalogError, DrawRng, PackConfig};
use crate::store::RecordStore;

use super::profile::{PlayerProfile, SaveSink};

/// Draws packs against a record store.
#[derive(Clone, Debug)]
pub struct PackOpener {
    config: PackConfig,
    rng: DrawRng,
}

impl PackOpener {
    /// Create an opener.
    #[must_use]
    pub fn new(config: PackConfig, rng: DrawRng) -> Self {
        Self { config, rng }
    }

    /// Pack price and size.
    #[must_use]
    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// The draw RNG, for checkpointing.
    #[must_use]
    pub fn rng(&self) -> &DrawRng {
        &self.rng
    }

    /// Draw one pack's worth of IDs without charging for it.
    pub fn draw(&mut self, store: &RecordStore) -> Result<Vec<CardId>, CatalogError> {
        let ids = store.ids();
        if ids.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        let drawn: Vec<CardId> = (0..self.config.cards_per_pack)
            .filter_map(|_| self.rng.choose(&ids).copied())
            .collect();
        Ok(drawn)
    }

    /// Charge the pack cost, draw, and add the cards to the inventory.
    ///
    /// Nothing is charged when the catalog is empty or the balance is too low.
    pub fn open<S: SaveSink>(
        &mut self,
        store: &RecordStore,
        profile: &mut PlayerProfile<S>,
    ) -> Result<Vec<CardId>, CatalogError> {
        if store.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        profile.try_spend_coins(self.config.cost)?;
        let drawn = self.draw(store)?;
        profile.add_drawn_cards(&drawn)?;
        tracing::info!(
            cost = self.config.cost,
            drawn = ?drawn,
            coins = profile.coins(),
            "opened pack"
        );
        Ok(drawn)
    }
}
