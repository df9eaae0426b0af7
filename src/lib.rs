//! # unroll
//!
//! Structured voter records from electoral-roll page text.
//!
//! This library takes the text of scanned electoral rolls (mixed Devanagari
//! and Latin, multi-column, OCR-damaged) and turns it into one fixed-shape
//! record per voter entry.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unroll::{extract_file, render, ExtractOptions};
//!
//! fn main() -> unroll::Result<()> {
//!     let doc = extract_file("roll.txt", ExtractOptions::default())?;
//!
//!     println!("{} records, dialect {}", doc.record_count(), doc.dialect);
//!     let json = render::records_to_json(&doc.records, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block segmentation**: one block per voter, anchored on serial + identifier
//! - **Header resolution**: state, constituency and booth once per document
//! - **Two dialects**: label-driven and heuristic extraction in one engine
//! - **Data-driven vocabulary**: spelling and OCR variants are configuration
//! - **Total extraction**: missing fields become sentinels, never errors
//! - **Parallel processing**: Uses Rayon across pages and documents

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use detect::{probe_dialect, DialectProbe};
pub use error::{Error, Result};
pub use extract::{
    normalize, AgeBounds, DialectChoice, DialectKind, ExtractOptions, LookupTables,
    RollExtractor, Vocabulary,
};
pub use model::{
    ExtractedDocument, Gender, HeaderMetadata, RawPage, RelationType, SourceDocument, TextBlock,
    VoterRecord, NOT_FOUND, UNKNOWN,
};
pub use render::{ExtractionStats, JsonFormat};
pub use source::{gather_sources, PageSource, TextFileSource};

use std::path::Path;

/// Extract records from page texts.
///
/// # Arguments
///
/// * `name` - Document name carried into the result
/// * `pages` - Text of each page, in order
///
/// # Example
///
/// ```
/// use unroll::extract_pages;
///
/// let doc = extract_pages("roll", ["12 ABCD1234567\nVoter Name: Ram Kumar"]).unwrap();
/// assert_eq!(doc.records[0].voter_name, "Ram Kumar");
/// ```
pub fn extract_pages<I, S>(name: &str, pages: I) -> Result<ExtractedDocument>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let extractor = RollExtractor::new(ExtractOptions::default())?;
    Ok(extractor.extract(&SourceDocument::from_page_texts(name, pages)))
}

/// Extract records from a form-feed separated text file.
///
/// # Arguments
///
/// * `path` - Path to the text file
/// * `options` - Extraction options
///
/// # Example
///
/// ```no_run
/// use unroll::{extract_file, ExtractOptions};
///
/// let doc = extract_file("roll.txt", ExtractOptions::default().sequential()).unwrap();
/// println!("Records: {}", doc.record_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<ExtractedDocument> {
    let extractor = RollExtractor::new(options)?;
    let doc = TextFileSource::new(path.as_ref()).document()?;
    Ok(extractor.extract(&doc))
}

/// Extract every text document found at a path.
///
/// A file is extracted on its own; a directory contributes all its `.txt`
/// files in sorted order. Documents are processed in parallel when enabled.
pub fn extract_path<P: AsRef<Path>>(
    input: P,
    options: ExtractOptions,
) -> Result<Vec<ExtractedDocument>> {
    let extractor = RollExtractor::new(options)?;
    let docs = gather_sources(input)?
        .iter()
        .map(PageSource::document)
        .collect::<Result<Vec<_>>>()?;
    Ok(extractor.extract_batch(&docs))
}

/// Builder for configuring and running extraction.
///
/// # Example
///
/// ```no_run
/// use unroll::{Unroll, DialectKind};
///
/// let docs = Unroll::new()
///     .with_tables_file("tables.json")?
///     .dialect(DialectKind::Heuristic)
///     .sequential()
///     .extract_path("rolls/")?;
/// # Ok::<(), unroll::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unroll {
    options: ExtractOptions,
}

impl Unroll {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Use a fixed dialect instead of probing each document.
    pub fn dialect(mut self, kind: DialectKind) -> Self {
        self.options = self.options.with_dialect(DialectChoice::Fixed(kind));
        self
    }

    /// Set the accepted age range.
    pub fn with_age_bounds(mut self, min: u16, max: u16) -> Self {
        self.options = self.options.with_age_bounds(AgeBounds::new(min, max));
        self
    }

    /// Merge lookup tables from a JSON file over the built-in ones.
    pub fn with_tables_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.options.tables.merge(LookupTables::from_path(path)?);
        Ok(self)
    }

    /// Merge vocabulary additions from a JSON file.
    pub fn with_vocabulary_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.options.vocabulary.merge(Vocabulary::from_path(path)?);
        Ok(self)
    }

    /// Get the options collected so far.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Compile the extractor.
    pub fn build(self) -> Result<RollExtractor> {
        RollExtractor::new(self.options)
    }

    /// Extract one text file.
    pub fn extract_file<P: AsRef<Path>>(self, path: P) -> Result<ExtractedDocument> {
        extract_file(path, self.options)
    }

    /// Extract every text document at a path.
    pub fn extract_path<P: AsRef<Path>>(self, input: P) -> Result<Vec<ExtractedDocument>> {
        extract_path(input, self.options)
    }
}
