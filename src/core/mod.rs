//! Core types: identifiers, configuration, errors, diagnostics, RNG.
//!
//! Everything here is shared by the parsing, store and player layers.

pub mod id;
pub mod config;
pub mod error;
pub mod diagnostic;
pub mod rng;

pub use id::CardId;
pub use config::{LoaderConfig, PackConfig};
pub use error::CatalogError;
pub use diagnostic::{excerpt, Diagnostic, DiagnosticKind};
pub use rng::{DrawRng, DrawRngState};
