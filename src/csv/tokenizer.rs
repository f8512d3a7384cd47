//! Quote-aware tokenizer.
//!
//! Splits text into rows of fields in one pass:
//! - rows end on an unquoted `\r\n`, `\r` or `\n`
//! - fields end on an unquoted `,`
//! - `"` toggles quoting; `""` inside quotes is one literal quote
//!
//! Fields are kept exactly as written (minus quoting). Trimming at cell
//! boundaries is the accessor's job, see [`Row::cell`].

use smallvec::SmallVec;

/// Most card rows fit in a dozen columns without spilling to the heap.
pub type Fields = SmallVec<[String; 12]>;

/// One tokenized record: an ordered, immutable list of fields.
///
/// Column order matters: positional fallbacks index into it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    fields: Fields,
}

impl Row {
    /// Create a row from fields.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the row has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw field at `index`, untrimmed.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Field at `index` with boundary whitespace trimmed, or `""` when out of range.
    #[must_use]
    pub fn cell(&self, index: usize) -> &str {
        self.get(index).map_or("", str::trim)
    }

    /// True if every field is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }

    /// Iterate over raw fields.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Iterate over trimmed cells with their column index.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &str)> {
        self.fields.iter().enumerate().map(|(i, f)| (i, f.trim()))
    }
}

/// Tokenize a whole document.
///
/// Never fails: empty input yields no rows, and an unterminated quote simply
/// runs to end of input. A trailing row without a line terminator is kept
/// unless it is completely empty.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Row> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();
    if text.is_empty() {
        return rows;
    }

    let mut fields = Fields::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                fields.push(std::mem::take(&mut field));
                rows.push(Row {
                    fields: std::mem::take(&mut fields),
                });
            }
            _ => field.push(c),
        }
    }

    if !fields.is_empty() || !field.is_empty() {
        fields.push(field);
        rows.push(Row { fields });
    }

    rows
}

/// Quote a value for output if it contains a delimiter, quote or line break.
#[must_use]
pub fn quote_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(row: &Row) -> Vec<&str> {
        row.iter().collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\u{feff}").is_empty());
    }

    #[test]
    fn test_simple_rows() {
        let rows = tokenize("a,b,c\nd,e\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[0]), vec!["a", "b", "c"]);
        assert_eq!(fields(&rows[1]), vec!["d", "e"]);
    }

    #[test]
    fn test_line_endings() {
        let rows = tokenize("a\r\nb\rc\nd");
        let firsts: Vec<_> = rows.iter().map(|r| r.cell(0)).collect();
        assert_eq!(firsts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_strips_bom() {
        let rows = tokenize("\u{feff}monster,1");
        assert_eq!(rows[0].get(0), Some("monster"));
    }

    #[test]
    fn test_quoted_delimiters() {
        let rows = tokenize("spell,\"one, two\nthree\",x\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(fields(&rows[0]), vec!["spell", "one, two\nthree", "x"]);
    }

    #[test]
    fn test_escaped_quotes() {
        let rows = tokenize(r#"a,"say ""hi""",b"#);
        assert_eq!(fields(&rows[0]), vec!["a", r#"say "hi""#, "b"]);
    }

    #[test]
    fn test_fields_not_trimmed() {
        let rows = tokenize("  a , b ");
        assert_eq!(rows[0].get(0), Some("  a "));
        assert_eq!(rows[0].cell(0), "a");
        assert_eq!(rows[0].cell(1), "b");
        assert_eq!(rows[0].cell(7), "");
    }

    #[test]
    fn test_blank_line_is_blank_row() {
        let rows = tokenize("a\n\nb\n");
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_blank());
    }

    #[test]
    fn test_trailing_delimiter_keeps_empty_field() {
        let rows = tokenize("a,");
        assert_eq!(fields(&rows[0]), vec!["a", ""]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        let rows = tokenize("a,\"open\nstill open");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(1), Some("open\nstill open"));
    }

    #[test]
    fn test_quote_field() {
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"x\""), "\"say \"\"x\"\"\"");
        let rows = tokenize(&quote_field("x,\"y\"\nz"));
        assert_eq!(rows[0].get(0), Some("x,\"y\"\nz"));
    }
}
