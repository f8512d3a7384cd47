//! # ccg-catalog
//!
//! Tolerant ingestion of card-game CSV sheets into a typed, queryable store.
//!
//! ## Design Principles
//!
//! 1. **Never fail a whole document**: A bad row is dropped with a
//!    `Diagnostic`; every other row still loads.
//!
//! 2. **Headers are optional**: Columns are found by header name when a
//!    header row exists and by position and content shape when it does not.
//!
//! 3. **Readers see whole documents**: A load builds a new `Snapshot` and
//!    swaps it in; there is no partially loaded state to observe.
//!
//! ## Pipeline
//!
//! ```text
//! text -> tokenize -> rows -> resolve_header -> RowClassifier -> RecordStore
//!                                                                   |
//!        PlayerProfile -> serialize -> SaveSink  <------------------+
//! ```
//!
//! The save format is the same tagged line format the loader reads, so
//! `serialize` output loads back to the same coins and counts.
//!
//! ## Modules
//!
//! - `core`: Card IDs, configuration, errors, diagnostics, RNG
//! - `csv`: Tokenizer, header resolver, field accessor
//! - `cards`: Typed records and the row classifier
//! - `store`: Record store, readiness signal, text sources
//! - `player`: Counts, persistence writer, write-through profile, packs

pub mod core;
pub mod csv;
pub mod cards;
pub mod store;
pub mod player;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    CardId,
    LoaderConfig, PackConfig,
    CatalogError,
    Diagnostic, DiagnosticKind,
    DrawRng, DrawRngState,
};

pub use crate::csv::{tokenize, Row, HeaderIndex, FieldSpec, get_field};

pub use crate::cards::{
    CardRecord, MonsterRecord, SpellRecord,
    Attribute, MonsterKind, CardKind, CardCost,
    RowClassifier, classify_and_build,
};

pub use crate::store::{
    RecordStore, LoadState, LoadReport, Snapshot,
    ReadySignal, SubscriptionId,
    TextSource, FileSource,
};

pub use crate::player::{
    CountMap, serialize,
    PlayerProfile, SaveSink, FileSink, MemorySink,
    PackOpener,
};
