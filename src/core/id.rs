//! Card identifiers.
//!
//! Monsters and spells share one identifier space: a `CardId` denotes
//! exactly one record in a [`RecordStore`](crate::store::RecordStore).
//! Inventory and deck counts are keyed by the same identifiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// Unique identifier for a card record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Parse a cell value, tolerating surrounding whitespace.
    ///
    /// Returns `None` for blank, negative or non-numeric text.
    #[must_use]
    pub fn parse_cell(cell: &str) -> Option<Self> {
        cell.trim().parse::<u32>().ok().map(Self)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_cell(s).ok_or_else(|| CatalogError::InvalidCardId(s.to_string()))
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(1001);
        assert_eq!(id.raw(), 1001);
        assert_eq!(format!("{}", id), "1001");
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(CardId::parse_cell(" 42 "), Some(CardId::new(42)));
        assert_eq!(CardId::parse_cell(""), None);
        assert_eq!(CardId::parse_cell("-3"), None);
        assert_eq!(CardId::parse_cell("abc"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "x1".parse::<CardId>().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCardId(ref s) if s == "x1"));
        assert_eq!("7".parse::<CardId>().unwrap(), CardId::new(7));
    }

    #[test]
    fn test_ordering() {
        let mut ids = vec![CardId::new(3), CardId::new(1), CardId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![CardId::new(1), CardId::new(2), CardId::new(3)]);
    }
}
