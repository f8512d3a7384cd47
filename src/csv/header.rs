//! Header detection and the header index.
//!
//! A header row is optional. When one is present it maps normalized column
//! names to positions; when absent the index is empty and every lookup
//! falls through to positional and heuristic resolution.

use rustc_hash::FxHashMap;

use crate::core::LoaderConfig;

use super::tokenizer::Row;

/// Normalize a header cell or logical field name for matching.
///
/// Strips spaces and the comment marker and case-folds.
#[must_use]
pub fn normalize_key(raw: &str, comment_marker: char) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != comment_marker)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Mapping from normalized header key to column position.
///
/// Entries keep the column order of the header row; on duplicate keys the
/// first column wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    entries: Vec<(String, usize)>,
    exact: FxHashMap<String, usize>,
}

impl HeaderIndex {
    /// Create an empty index (no header row).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a header row.
    #[must_use]
    pub fn from_row(row: &Row, comment_marker: char) -> Self {
        let mut index = Self::new();
        for (column, raw) in row.iter().enumerate() {
            let key = normalize_key(raw, comment_marker);
            if key.is_empty() || index.exact.contains_key(&key) {
                continue;
            }
            index.exact.insert(key.clone(), column);
            index.entries.push((key, column));
        }
        index
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no header was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by an already-normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<usize> {
        self.exact.get(key).copied()
    }

    /// Entries in header column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, i)| (k.as_str(), *i))
    }

    /// Columns whose key contains `needle` (already normalized), in order.
    pub fn columns_containing<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| !needle.is_empty() && key.contains(needle))
            .map(|(_, i)| *i)
    }

    /// First column whose key contains any of the keywords.
    ///
    /// Keys are visited in column order and each key is tested against
    /// every keyword before moving on.
    #[must_use]
    pub fn find_by_keywords<S: AsRef<str>>(&self, keywords: &[S], comment_marker: char) -> Option<usize> {
        let needles: Vec<String> = keywords
            .iter()
            .map(|k| normalize_key(k.as_ref(), comment_marker))
            .filter(|k| !k.is_empty())
            .collect();
        self.entries
            .iter()
            .find(|(key, _)| needles.iter().any(|n| key.contains(n.as_str())))
            .map(|(_, i)| *i)
    }
}

/// Does this row look like a header?
#[must_use]
pub fn is_header_row(row: &Row, config: &LoaderConfig) -> bool {
    let marker = config.comment_marker;
    let markers: Vec<String> = config
        .header_markers
        .iter()
        .map(|m| normalize_key(m, marker))
        .filter(|m| !m.is_empty())
        .collect();
    row.cells().any(|(_, cell)| {
        if cell.is_empty() {
            return false;
        }
        if config.is_comment(cell) {
            return true;
        }
        let key = normalize_key(cell, marker);
        markers.iter().any(|m| key.contains(m.as_str()))
    })
}

/// Index of the first header row, if any.
#[must_use]
pub fn find_header_row(rows: &[Row], config: &LoaderConfig) -> Option<usize> {
    rows.iter().position(|row| is_header_row(row, config))
}

/// Build the index for a header row.
#[must_use]
pub fn build_header_index(row: &Row, config: &LoaderConfig) -> HeaderIndex {
    HeaderIndex::from_row(row, config.comment_marker)
}

/// Locate the header row and build its index in one step.
///
/// Returns the header's row index alongside the index (empty when absent).
#[must_use]
pub fn resolve_header(rows: &[Row], config: &LoaderConfig) -> (Option<usize>, HeaderIndex) {
    match find_header_row(rows, config) {
        Some(at) => (Some(at), build_header_index(&rows[at], config)),
        None => (None, HeaderIndex::new()),
    }
}
