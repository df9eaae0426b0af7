//! Page-level types.

use serde::{Deserialize, Serialize};

/// The text lines of one page, as produced by an external text extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Lines in reading order
    pub lines: Vec<String>,
}

impl RawPage {
    /// Create a page from already split lines.
    pub fn new(number: u32, lines: Vec<String>) -> Self {
        Self { number, lines }
    }

    /// Create a page by splitting text on line breaks.
    pub fn from_text(number: u32, text: &str) -> Self {
        Self {
            number,
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Check whether the page carries any non-blank line.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    /// Get the number of lines on the page.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// The lines belonging to a single voter entry.
///
/// A block is bounded by two anchor lines (or the end of its page). It only
/// lives between segmentation and field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    /// Page the block was cut from
    pub page: u32,

    /// Normalized lines, the anchor line first
    pub lines: Vec<String>,
}

impl TextBlock {
    /// Create a block starting with the given line.
    pub fn new(page: u32, first_line: impl Into<String>) -> Self {
        Self {
            page,
            lines: vec![first_line.into()],
        }
    }

    /// The line that opened this block.
    pub fn first_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// Lines after the first one.
    pub fn body_lines(&self) -> &[String] {
        self.lines.get(1..).unwrap_or(&[])
    }

    /// Get the number of lines in the block.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_page_from_text() {
        let page = RawPage::from_text(2, "first\nsecond\n\nfourth");
        assert_eq!(page.number, 2);
        assert_eq!(page.line_count(), 4);
        assert!(!page.is_blank());
        assert!(RawPage::from_text(1, " \n\t\n").is_blank());
    }

    #[test]
    fn test_text_block_parts() {
        let mut block = TextBlock::new(1, "1 ABC1234567");
        block.lines.push("Voter Name: Ram".to_string());
        assert_eq!(block.first_line(), Some("1 ABC1234567"));
        assert_eq!(block.body_lines(), &["Voter Name: Ram".to_string()]);
        assert_eq!(block.line_count(), 2);
    }

    #[test]
    fn test_empty_block_body() {
        let block = TextBlock {
            page: 1,
            lines: Vec::new(),
        };
        assert!(block.first_line().is_none());
        assert!(block.body_lines().is_empty());
    }
}
