//! Loader configuration.
//!
//! The same logical card sheet has been exported with different column
//! layouts over time. Rather than hardcoding the heuristics that cope with
//! that, the loader reads them from configuration:
//! - `LoaderConfig`: header detection and field-resolution heuristics
//! - `PackConfig`: pack price and size for [`PackOpener`](crate::player::PackOpener)
//!
//! Both deserialize with every field optional, so a config file only needs
//! to name what it changes.

use serde::{Deserialize, Serialize};

/// Header detection and field-resolution heuristics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// A row containing any of these substrings (case-insensitive) is a header.
    pub header_markers: Vec<String>,

    /// Leading character marking comments and header rows.
    pub comment_marker: char,

    /// Keywords identifying the stack-description column or label cell.
    pub stack_keywords: Vec<String>,

    /// A keyword cell at most this many chars long is a label, not content.
    pub label_max_len: usize,

    /// A cell longer than this many chars "looks like content".
    pub content_min_len: usize,

    /// Punctuation that marks a cell as descriptive text regardless of length.
    pub content_punctuation: Vec<char>,

    /// Columns tried, in order, when no stack keyword is found.
    pub stack_fallback_columns: Vec<usize>,

    /// First column considered by the last-resort stack fallback.
    pub stack_min_column: usize,

    /// Inclusive column window scanned for an attribute token when the
    /// attribute field does not resolve.
    pub attribute_scan: (usize, usize),
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            header_markers: vec![
                "卡片ID".to_string(),
                "卡名".to_string(),
                "cardid".to_string(),
                "cardname".to_string(),
            ],
            comment_marker: '#',
            stack_keywords: vec![
                "叠放描述".to_string(),
                "stackdescription".to_string(),
                "stackdesc".to_string(),
                "stack".to_string(),
                "堆叠".to_string(),
                "叠放".to_string(),
            ],
            label_max_len: 8,
            content_min_len: 6,
            content_punctuation: vec!['。', '：', '【', '（', '.', ':', '[', '('],
            stack_fallback_columns: vec![4, 5, 6, 3, 7, 8],
            stack_min_column: 3,
            attribute_scan: (2, 6),
        }
    }
}

impl LoaderConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header marker substring.
    #[must_use]
    pub fn with_header_marker(mut self, marker: impl Into<String>) -> Self {
        self.header_markers.push(marker.into());
        self
    }

    /// Set the comment marker character.
    #[must_use]
    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    /// Add a stack-description keyword.
    #[must_use]
    pub fn with_stack_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.stack_keywords.push(keyword.into());
        self
    }

    /// Replace the stack fallback column order.
    #[must_use]
    pub fn with_stack_fallback_columns(mut self, columns: Vec<usize>) -> Self {
        self.stack_fallback_columns = columns;
        self
    }

    /// Set the label length threshold.
    #[must_use]
    pub fn with_label_max_len(mut self, len: usize) -> Self {
        self.label_max_len = len;
        self
    }

    /// Does this cell look like descriptive text rather than a label or number?
    #[must_use]
    pub fn looks_like_content(&self, cell: &str) -> bool {
        cell.chars().count() > self.content_min_len
            || cell.chars().any(|c| self.content_punctuation.contains(&c))
    }

    /// Does this cell start with the comment marker?
    #[must_use]
    pub fn is_comment(&self, cell: &str) -> bool {
        cell.trim_start().starts_with(self.comment_marker)
    }
}

/// Pack purchase settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Coins charged per pack.
    pub cost: i64,

    /// Cards drawn per pack.
    pub cards_per_pack: usize,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            cost: 10,
            cards_per_pack: 5,
        }
    }
}

impl PackConfig {
    /// Create a pack configuration.
    #[must_use]
    pub fn new(cost: i64, cards_per_pack: usize) -> Self {
        Self { cost, cards_per_pack }
    }
}
