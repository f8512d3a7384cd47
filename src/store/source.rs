//! Raw-text providers.
//!
//! The store parses text it is handed; where that text comes from is the
//! caller's business. `TextSource` is the seam: in-memory strings for
//! bundled data and tests, [`FileSource`] for a sheet on disk.

use std::path::{Path, PathBuf};

use crate::core::CatalogError;

/// Something that can produce a whole document of card data.
pub trait TextSource {
    /// Read the full text.
    fn read_text(&self) -> Result<String, CatalogError>;

    /// Short label for logs.
    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

impl TextSource for str {
    fn read_text(&self) -> Result<String, CatalogError> {
        Ok(self.to_string())
    }
}

impl TextSource for String {
    fn read_text(&self) -> Result<String, CatalogError> {
        Ok(self.clone())
    }
}

/// A document read from a file on every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileSource {
    fn read_text(&self) -> Result<String, CatalogError> {
        std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_source() {
        let text = String::from("coins,5\n");
        assert_eq!(text.read_text().unwrap(), "coins,5\n");
        assert_eq!("x".read_text().unwrap(), "x");
    }

    #[test]
    fn test_missing_file() {
        let source = FileSource::new("/nonexistent/ccg-catalog/cards.csv");
        let err = source.read_text().unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(source.describe().ends_with("cards.csv"));
    }
}
