//! Non-fatal ingestion diagnostics.
//!
//! Every row that cannot be turned into a record, and every silent
//! overwrite, produces a `Diagnostic`. They are logged through `tracing`
//! as they happen and collected into the load report so callers can
//! inspect them without scraping logs.

use serde::{Deserialize, Serialize};

use super::id::CardId;

/// Longest cell excerpt carried in a diagnostic or log line.
pub const MAX_EXCERPT: usize = 160;

/// Truncate a cell for logging, on a char boundary.
#[must_use]
pub fn excerpt(s: &str) -> String {
    match s.char_indices().nth(MAX_EXCERPT) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

/// What went wrong with a row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The discriminator tag is not one the classifier knows.
    UnknownTag(String),
    /// The row is too short for its tag.
    TooFewFields { tag: String, found: usize, needed: usize },
    /// The identifier cell is not a non-negative integer.
    MalformedId { tag: String, raw: String },
    /// A `card`/`deck` count cell is not an integer.
    MalformedCount { tag: String, raw: String },
    /// The `coins` balance cell is not an integer.
    MalformedCoins { raw: String },
    /// A monster level was missing or outside 1..=5 and was clamped.
    LevelOutOfRange { id: CardId, raw: String, clamped: u8 },
    /// A non-empty attribute cell matched no known attribute.
    UnknownAttribute { id: CardId, raw: String },
    /// A later record replaced an earlier one with the same identifier.
    DuplicateId(CardId),
}

/// A diagnostic tied to the row that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Zero-based index of the row in the tokenized document.
    pub row: usize,
    /// What happened.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a new diagnostic.
    #[must_use]
    pub fn new(row: usize, kind: DiagnosticKind) -> Self {
        Self { row, kind }
    }

    /// Whether the row was dropped (as opposed to loaded with a fixup).
    #[must_use]
    pub fn dropped_row(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::UnknownTag(_)
                | DiagnosticKind::TooFewFields { .. }
                | DiagnosticKind::MalformedId { .. }
                | DiagnosticKind::MalformedCount { .. }
                | DiagnosticKind::MalformedCoins { .. }
        )
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::UnknownTag(tag) => write!(f, "row {}: unknown tag '{}'", self.row, tag),
            DiagnosticKind::TooFewFields { tag, found, needed } => write!(
                f,
                "row {}: {} row has {} fields, needs {}",
                self.row, tag, found, needed
            ),
            DiagnosticKind::MalformedId { tag, raw } => {
                write!(f, "row {}: {} id '{}' is not a number", self.row, tag, raw)
            }
            DiagnosticKind::MalformedCount { tag, raw } => {
                write!(f, "row {}: {} count '{}' is not a number", self.row, tag, raw)
            }
            DiagnosticKind::MalformedCoins { raw } => {
                write!(f, "row {}: coin balance '{}' is not a number", self.row, raw)
            }
            DiagnosticKind::LevelOutOfRange { id, raw, clamped } => write!(
                f,
                "row {}: card {} level '{}' clamped to {}",
                self.row, id, raw, clamped
            ),
            DiagnosticKind::UnknownAttribute { id, raw } => {
                write!(f, "row {}: card {} has unknown attribute '{}'", self.row, id, raw)
            }
            DiagnosticKind::DuplicateId(id) => {
                write!(f, "row {}: card {} overwrites an earlier record", self.row, id)
            }
        }
    }
}
