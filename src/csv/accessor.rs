//! Field resolution.
//!
//! The card sheet has been exported with columns reordered, headers
//! dropped, and label/value pairs merged across revisions. Lookups here
//! never fail; each one degrades through a fixed order of strategies and
//! returns `""` when nothing resolves:
//!
//! 1. header match: a key equal to the normalized logical name, else the
//!    first key (in column order) that contains it
//! 2. the caller's positional fallback
//! 3. for the stack description only, a keyword/shape heuristic over
//!    the whole row ([`stack_description`])

use crate::core::LoaderConfig;

use super::header::{normalize_key, HeaderIndex};
use super::tokenizer::Row;

/// A logical field: header names to try, and where it sits when there is no header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Logical names, tried in order against header keys.
    pub names: &'static [&'static str],
    /// Column used when no header key matches.
    pub fallback: usize,
}

impl FieldSpec {
    /// Create a field spec.
    #[must_use]
    pub const fn new(names: &'static [&'static str], fallback: usize) -> Self {
        Self { names, fallback }
    }
}

/// Resolve one logical name against a row.
///
/// A header hit that lands inside the row is authoritative even when the
/// cell is blank; only a miss falls through to `fallback`.
#[must_use]
pub fn get_field<'a>(
    row: &'a Row,
    header: &HeaderIndex,
    logical_name: &str,
    fallback: usize,
    comment_marker: char,
) -> &'a str {
    header_lookup(row, header, logical_name, comment_marker)
        .unwrap_or_else(|| positional(row, fallback))
}

/// Resolve a [`FieldSpec`], trying each of its names before the fallback.
#[must_use]
pub fn resolve<'a>(row: &'a Row, header: &HeaderIndex, spec: &FieldSpec, comment_marker: char) -> &'a str {
    spec.names
        .iter()
        .find_map(|name| header_lookup(row, header, name, comment_marker))
        .unwrap_or_else(|| positional(row, spec.fallback))
}

fn header_lookup<'a>(
    row: &'a Row,
    header: &HeaderIndex,
    logical_name: &str,
    comment_marker: char,
) -> Option<&'a str> {
    let needle = normalize_key(logical_name, comment_marker);
    let exact = header.get(&needle).filter(|&col| col < row.len());
    let found = exact.or_else(|| header.columns_containing(&needle).find(|&col| col < row.len()));
    found.map(|col| row.cell(col))
}

fn positional(row: &Row, column: usize) -> &str {
    row.cell(column)
}

/// First cell in the inclusive column window accepted by `pred`.
pub fn find_in_window<'a, F>(row: &'a Row, window: (usize, usize), mut pred: F) -> Option<(usize, &'a str)>
where
    F: FnMut(&str) -> bool,
{
    let (lo, hi) = window;
    row.cells()
        .skip(lo)
        .take_while(|&(i, _)| i <= hi)
        .find(|&(_, cell)| pred(cell))
}

/// Resolve the free-text stack description of a spell row.
///
/// Tried in order:
/// 1. a header column named by one of the stack keywords, if non-empty
/// 2. the first cell containing a keyword; a short keyword cell is a label,
///    so the cell after it is returned instead when that is non-empty
/// 3. the configured fallback columns, accepting the first cell that looks
///    like descriptive text
/// 4. the first non-empty cell at or after `stack_min_column`
#[must_use]
pub fn stack_description<'a>(row: &'a Row, header: &HeaderIndex, config: &LoaderConfig) -> &'a str {
    if let Some(col) = header.find_by_keywords(&config.stack_keywords, config.comment_marker) {
        let value = row.cell(col);
        if !value.is_empty() {
            tracing::trace!(column = col, "stack description from header");
            return value;
        }
    }

    let keywords: Vec<String> = config.stack_keywords.iter().map(|k| k.to_lowercase()).collect();
    for (i, cell) in row.cells() {
        if cell.is_empty() {
            continue;
        }
        let lower = cell.to_lowercase();
        if !keywords.iter().any(|k| lower.contains(k.as_str())) {
            continue;
        }
        if cell.chars().count() <= config.label_max_len {
            let next = row.cell(i + 1);
            if !next.is_empty() {
                tracing::trace!(label = i, column = i + 1, "stack description after label");
                return next;
            }
        }
        tracing::trace!(column = i, "stack description by keyword");
        return cell;
    }

    for &col in &config.stack_fallback_columns {
        let value = row.cell(col);
        if !value.is_empty() && config.looks_like_content(value) {
            tracing::trace!(column = col, "stack description from fallback column");
            return value;
        }
    }

    row.cells()
        .skip(config.stack_min_column)
        .map(|(_, cell)| cell)
        .find(|cell| !cell.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::tokenizer::tokenize;

    fn row(text: &str) -> Row {
        tokenize(text).remove(0)
    }

    fn header(text: &str) -> HeaderIndex {
        HeaderIndex::from_row(&row(text), '#')
    }

    #[test]
    fn test_get_field_by_header() {
        let h = header("#tag,卡名,卡片ID");
        let r = row("monster, Flamewyrm ,1001");
        assert_eq!(get_field(&r, &h, "卡片ID", 1, '#'), "1001");
        assert_eq!(get_field(&r, &h, "卡名", 2, '#'), "Flamewyrm");
    }

    #[test]
    fn test_get_field_soft_match() {
        let h = header("#tag,Card ID,Card Name");
        let r = row("monster,7,Imp");
        assert_eq!(get_field(&r, &h, "id", 5, '#'), "7");
        assert_eq!(get_field(&r, &h, "Name", 5, '#'), "Imp");
    }

    #[test]
    fn test_get_field_exact_key_beats_earlier_soft_match() {
        let h = header("#tag,Bond Effect,Effect");
        let r = row("monster,bond text,main text");
        assert_eq!(get_field(&r, &h, "effect", 9, '#'), "main text");
        assert_eq!(get_field(&r, &h, "bond", 9, '#'), "bond text");
    }

    #[test]
    fn test_get_field_positional_fallback() {
        let r = row("monster,7,Imp");
        let empty = HeaderIndex::new();
        assert_eq!(get_field(&r, &empty, "卡名", 2, '#'), "Imp");
        assert_eq!(get_field(&r, &empty, "卡名", 9, '#'), "");
    }

    #[test]
    fn test_header_hit_out_of_range_falls_back() {
        let h = header("#tag,a,b,c,d,卡名");
        let r = row("monster,7,Imp");
        assert_eq!(get_field(&r, &h, "卡名", 2, '#'), "Imp");
    }

    #[test]
    fn test_header_hit_blank_is_authoritative() {
        let h = header("#tag,id,bond");
        let r = row("monster,7,,Imp");
        assert_eq!(get_field(&r, &h, "bond", 3, '#'), "");
    }

    #[test]
    fn test_resolve_tries_names_in_order() {
        const NAME: FieldSpec = FieldSpec::new(&["卡名", "cardname"], 2);
        let h = header("#tag,id,Card Name");
        let r = row("monster,7,Imp");
        assert_eq!(resolve(&r, &h, &NAME, '#'), "Imp");
        let r2 = row("monster,7,Imp");
        assert_eq!(resolve(&r2, &HeaderIndex::new(), &NAME, '#'), "Imp");
    }

    #[test]
    fn test_find_in_window() {
        let r = row("monster,1,x,Fire,3");
        let hit = find_in_window(&r, (2, 6), |c| c == "Fire");
        assert_eq!(hit, Some((3, "Fire")));
        assert_eq!(find_in_window(&r, (4, 6), |c| c == "Fire"), None);
    }

    #[test]
    fn test_stack_from_header() {
        let config = LoaderConfig::default();
        let h = header("#tag,卡片ID,卡名,咒术描述,叠放描述");
        let r = row("spell,1,Bolt,Deal damage,Equip to ally.");
        assert_eq!(stack_description(&r, &h, &config), "Equip to ally.");
    }

    #[test]
    fn test_stack_keyword_cell() {
        let config = LoaderConfig::default();
        let r = row("spell,2001,Quickcast,Cast now.,Stacks twice.");
        assert_eq!(stack_description(&r, &HeaderIndex::new(), &config), "Stacks twice.");
    }

    #[test]
    fn test_stack_label_uses_next_cell() {
        let config = LoaderConfig::default();
        let r = row("spell,1,Bolt,Deal damage,叠放,Attach to a monster");
        assert_eq!(stack_description(&r, &HeaderIndex::new(), &config), "Attach to a monster");
    }

    #[test]
    fn test_stack_label_without_next_cell() {
        let config = LoaderConfig::default();
        let r = row("spell,1,Bolt,Hit,Stack");
        assert_eq!(stack_description(&r, &HeaderIndex::new(), &config), "Stack");
    }

    #[test]
    fn test_stack_fallback_columns() {
        let config = LoaderConfig::default();
        let r = row("spell,1,Bolt,x,,y,Grants the bearer +1");
        assert_eq!(stack_description(&r, &HeaderIndex::new(), &config), "Grants the bearer +1");
    }

    #[test]
    fn test_stack_last_resort() {
        let config = LoaderConfig::default();
        let r = row("spell,1,Bolt,,q");
        assert_eq!(stack_description(&r, &HeaderIndex::new(), &config), "q");
        let bare = row("spell,1,Bolt");
        assert_eq!(stack_description(&bare, &HeaderIndex::new(), &config), "");
    }
}
