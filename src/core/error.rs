//! Error type for the fallible collaborator operations.
//!
//! Ingestion itself never fails: problems inside a document are reported
//! as [`Diagnostic`](super::Diagnostic)s. `CatalogError` covers the edges
//! where the engine talks to the outside world (text sources, save sinks)
//! and the inventory operations that can be refused.

use std::path::PathBuf;

use super::id::CardId;

/// Errors raised outside the ingestion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A text source could not be read.
    #[error("failed to read card data from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A save sink could not be written.
    #[error("failed to write player data to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The balance does not cover a purchase.
    #[error("not enough coins: have {have}, need {need}")]
    InsufficientCoins { have: i64, need: i64 },

    /// A pack was opened against a store with no records.
    #[error("cannot draw from an empty catalog")]
    EmptyCatalog,

    /// A card was referenced that the store does not hold.
    #[error("unknown card {0}")]
    UnknownCard(CardId),

    /// Text that should have been a card ID.
    #[error("invalid card id '{0}'")]
    InvalidCardId(String),

    /// Text that should have been a card kind.
    #[error("unknown card kind '{0}'")]
    UnknownKind(String),

    /// Any other I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
