//! Tabular text parsing: tokenizer, header resolver, field accessor.
//!
//! ## Key Types
//!
//! - `Row`: One tokenized line's fields, untrimmed
//! - `HeaderIndex`: Normalized header key to column position
//! - `FieldSpec`: A logical field's header names and positional fallback
//!
//! Nothing in this module knows about card kinds; it only turns text into
//! rows and answers "what is in column X of this row".

pub mod tokenizer;
pub mod header;
pub mod accessor;

pub use tokenizer::{quote_field, tokenize, Fields, Row};
pub use header::{build_header_index, find_header_row, is_header_row, normalize_key, resolve_header, HeaderIndex};
pub use accessor::{find_in_window, get_field, resolve, stack_description, FieldSpec};
