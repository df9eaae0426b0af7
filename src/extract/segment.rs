//! Block segmentation: cutting a page into one block per voter entry.

use regex::Regex;

use super::normalize::{desplit_identifier, normalize};
use crate::error::Result;
use crate::model::{RawPage, TextBlock};

/// Serial number, whitespace, identifier code, at the start of a line.
const ANCHOR_PATTERN: &str = r"^([0-9]{1,4})\s+([A-Z]{2,}[/A-Z0-9-]*[0-9]{3,})\b";

/// Result of segmenting one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmented {
    /// Anchored blocks in page order
    pub blocks: Vec<TextBlock>,

    /// Non-blank lines that belong to no block: text before the first
    /// anchor and lines past a block's cap
    pub skipped_lines: usize,
}

/// Splits page lines into voter blocks at anchor lines.
///
/// Every line is normalized and, when it looks like an anchor with a split
/// identifier, repaired before matching. Each anchor closes the running
/// block and opens a new one; blocks never grow past `max_lines`.
#[derive(Debug, Clone)]
pub struct BlockSegmenter {
    anchor: Regex,
    max_lines: usize,
}

impl BlockSegmenter {
    /// Create a segmenter with a per-block line cap.
    pub fn new(max_lines: usize) -> Result<Self> {
        Ok(Self {
            anchor: Regex::new(ANCHOR_PATTERN)?,
            max_lines: max_lines.max(1),
        })
    }

    /// Get the per-block line cap.
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Split an anchor line into serial, identifier and the rest of the line.
    pub fn split_anchor<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str, &'a str)> {
        let caps = self.anchor.captures(line)?;
        let whole = caps.get(0)?;
        Some((
            caps.get(1)?.as_str(),
            caps.get(2)?.as_str(),
            line[whole.end()..].trim(),
        ))
    }

    /// Check whether a normalized line opens a voter block.
    pub fn is_anchor(&self, line: &str) -> bool {
        self.anchor.is_match(line)
    }

    /// Segment a page into anchored blocks.
    pub fn segment(&self, page: &RawPage) -> Vec<TextBlock> {
        self.segment_page(page).blocks
    }

    /// Segment a page, also counting lines that fell outside every block.
    pub fn segment_page(&self, page: &RawPage) -> Segmented {
        let mut result = Segmented::default();
        let mut current: Option<TextBlock> = None;

        for raw in &page.lines {
            let line = normalize(raw);
            if line.is_empty() {
                continue;
            }
            let line = desplit_identifier(&line).into_owned();

            if self.is_anchor(&line) {
                if let Some(block) = current.take() {
                    result.blocks.push(block);
                }
                current = Some(TextBlock::new(page.number, line));
                continue;
            }

            match current.as_mut() {
                Some(block) if block.line_count() < self.max_lines => block.lines.push(line),
                Some(_) => result.skipped_lines += 1,
                None => result.skipped_lines += 1,
            }
        }

        if let Some(block) = current {
            result.blocks.push(block);
        }

        if result.skipped_lines > 0 {
            log::trace!(
                "page {}: {} blocks, {} lines outside blocks",
                page.number,
                result.blocks.len(),
                result.skipped_lines
            );
        }
        result
    }
}
