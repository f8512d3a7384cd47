//! The record store and its readiness signal.
//!
//! ## Key Types
//!
//! - `RecordStore`: Typed records plus loaded player state, with queries
//! - `Snapshot`: The store's contents as one cheaply cloned value
//! - `ReadySignal`: One-shot subscribe/notify for "ingestion finished"
//! - `TextSource`: Where raw text comes from

pub mod catalog;
pub mod readiness;
pub mod snapshot;
pub mod source;

pub use catalog::{parse_document, LoadReport, LoadState, RecordStore};
pub use readiness::{ReadySignal, SubscriptionId};
pub use snapshot::Snapshot;
pub use source::{FileSource, TextSource};
