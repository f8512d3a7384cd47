//! Card records and the row classifier that builds them.
//!
//! ## Key Types
//!
//! - `CardRecord`: Monster or spell, keyed by `CardId`
//! - `CardKind`: Filter for store queries
//! - `Attribute`, `MonsterKind`, `CardCost`: Typed record fields
//! - `RowClassifier`: Turns tagged rows into records and player state

pub mod record;
pub mod builder;

pub use record::{
    Attribute, CardCost, CardKind, CardRecord, MonsterKind, MonsterRecord, SpellRecord, MAX_LEVEL, MIN_LEVEL,
};
pub use builder::{classify_and_build, parse_flag, RowClassifier, Tag};
