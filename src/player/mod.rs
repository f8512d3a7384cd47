//! Player-owned state: counts, persistence, pack opening.
//!
//! ## Key Types
//!
//! - `CountMap`: Card ID to positive copy count
//! - `PlayerProfile`: Coins, inventory and deck with write-through saves
//! - `SaveSink`: Where saves go (`FileSink`, `MemorySink`)
//! - `PackOpener`: Buys and draws card packs

pub mod counts;
pub mod persistence;
pub mod profile;
pub mod pack;

pub use counts::CountMap;
pub use persistence::serialize;
pub use profile::{FileSink, MemorySink, PlayerProfile, SaveSink};
pub use pack::PackOpener;
