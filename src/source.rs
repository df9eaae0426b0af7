//! Page text sources.
//!
//! The engine never reads files itself; a [`PageSource`] hands it the
//! ordered lines of each page. [`TextFileSource`] covers the common case of
//! text dumped by an external extractor, one form feed between pages.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{RawPage, SourceDocument};

/// Page separator written by `pdftotext` and similar tools.
pub const PAGE_SEPARATOR: char = '\u{000C}';

/// Anything that can produce the pages of one document.
pub trait PageSource {
    /// Name of the document, used in output and logs.
    fn name(&self) -> String;

    /// Read all pages in order.
    fn pages(&self) -> Result<Vec<RawPage>>;

    /// Read the whole document.
    fn document(&self) -> Result<SourceDocument> {
        Ok(SourceDocument {
            name: self.name(),
            pages: self.pages()?,
        })
    }
}

/// A UTF-8 text file whose pages are separated by form feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    /// Create a source for a file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for TextFileSource {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn pages(&self) -> Result<Vec<RawPage>> {
        let text = fs::read_to_string(&self.path)?;
        Ok(split_pages(&text))
    }
}

/// Split dumped text into pages at form feeds, numbering from 1.
///
/// A trailing form feed does not open an empty last page.
pub fn split_pages(text: &str) -> Vec<RawPage> {
    let text = text.strip_suffix(PAGE_SEPARATOR).unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }
    text.split(PAGE_SEPARATOR)
        .enumerate()
        .map(|(idx, page)| RawPage::from_text(idx as u32 + 1, page))
        .collect()
}

/// Collect text sources from a file or a directory.
///
/// A file path is taken as is. A directory contributes its `.txt` files
/// (not recursive), sorted by path.
pub fn gather_sources<P: AsRef<Path>>(input: P) -> Result<Vec<TextFileSource>> {
    let input = input.as_ref();
    if input.is_file() {
        return Ok(vec![TextFileSource::new(input)]);
    }
    if !input.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", input.display()),
        )));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        let is_text = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if path.is_file() && is_text {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(Error::NoInput(input.display().to_string()));
    }
    paths.sort();
    Ok(paths.into_iter().map(TextFileSource::new).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_split_pages() {
        let pages = split_pages("a\nb\u{000C}c\u{000C}");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].lines, vec!["a", "b"]);
        assert_eq!(pages[1].lines, vec!["c"]);
        assert!(split_pages("").is_empty());
    }

    #[test]
    fn test_text_file_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roll.txt");
        fs::write(&path, "1 ABCD1234567\u{000C}2 ABCD7654321").unwrap();

        let source = TextFileSource::new(&path);
        let doc = source.document().unwrap();
        assert_eq!(doc.name, "roll.txt");
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_gather_sources_sorted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "x").unwrap();
        fs::write(dir.path().join("a.TXT"), "x").unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();

        let sources = gather_sources(dir.path()).unwrap();
        let names: Vec<_> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["a.TXT", "b.txt"]);
    }

    #[test]
    fn test_gather_sources_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(gather_sources(dir.path()), Err(Error::NoInput(_))));
        assert!(matches!(
            gather_sources(dir.path().join("missing")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = TextFileSource::new("/nonexistent/roll.txt");
        assert!(matches!(source.pages(), Err(Error::Io(_))));
    }
}
