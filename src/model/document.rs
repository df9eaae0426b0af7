//! Document-level types.

use super::{HeaderMetadata, RawPage, VoterRecord};
use crate::extract::DialectKind;
use crate::render::ExtractionStats;
use serde::{Deserialize, Serialize};

/// The page text of one source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Document name (usually the file name)
    pub name: String,

    /// Pages in reading order
    pub pages: Vec<RawPage>,
}

impl SourceDocument {
    /// Create an empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
        }
    }

    /// Create a document from page texts, numbering pages from 1.
    pub fn from_page_texts<I, S>(name: impl Into<String>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(idx, text)| RawPage::from_text(idx as u32 + 1, text.as_ref()))
            .collect();
        Self {
            name: name.into(),
            pages,
        }
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: RawPage) {
        self.pages.push(page);
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Lines of the first `count` pages, in order.
    pub fn leading_lines(&self, count: usize) -> Vec<&str> {
        self.pages
            .iter()
            .take(count)
            .flat_map(|page| page.lines.iter().map(String::as_str))
            .collect()
    }
}

/// The outcome of extracting one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Source document name
    pub name: String,

    /// Header metadata shared by all records
    pub header: HeaderMetadata,

    /// Dialect used for field extraction
    pub dialect: DialectKind,

    /// Records in page and block order
    pub records: Vec<VoterRecord>,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl ExtractedDocument {
    /// Get the number of records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Check if no record was extracted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_page_texts_numbers_pages() {
        let doc = SourceDocument::from_page_texts("roll.txt", ["a\nb", "c"]);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].number, 1);
        assert_eq!(doc.pages[1].number, 2);
        assert_eq!(doc.pages[1].lines, vec!["c".to_string()]);
    }

    #[test]
    fn test_leading_lines() {
        let doc = SourceDocument::from_page_texts("roll.txt", ["a\nb", "c", "d"]);
        assert_eq!(doc.leading_lines(2), vec!["a", "b", "c"]);
        assert_eq!(doc.leading_lines(10).len(), 4);
    }
}
