//! Per-document extraction.

use rayon::prelude::*;

use super::assemble::RecordAssembler;
use super::dialect::{Dialect, DialectKind};
use super::fields::FieldExtractor;
use super::header::HeaderResolver;
use super::options::{DialectChoice, ExtractOptions};
use super::patterns::Patterns;
use super::segment::BlockSegmenter;
use crate::detect::{probe_dialect, DialectProbe};
use crate::error::Result;
use crate::model::{ExtractedDocument, HeaderMetadata, RawPage, SourceDocument, VoterRecord};
use crate::render::ExtractionStats;

/// Records and counters from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    /// Page number
    pub page: u32,
    /// Records in block order
    pub records: Vec<VoterRecord>,
    /// Counters for this page
    pub stats: ExtractionStats,
}

/// The extraction engine.
///
/// Built once from [`ExtractOptions`]; all compiled patterns are read-only
/// afterwards, so one extractor can serve many threads and documents.
///
/// # Example
///
/// ```
/// use unroll::{RollExtractor, ExtractOptions, SourceDocument};
///
/// let extractor = RollExtractor::new(ExtractOptions::default())?;
/// let doc = SourceDocument::from_page_texts(
///     "roll.txt",
///     ["12 ABCD1234567\nVoter Name: राम कुमार\nउम्र: 45 लिंग: पुरुष"],
/// );
/// let extracted = extractor.extract(&doc);
/// assert_eq!(extracted.records[0].age, "45");
/// # Ok::<(), unroll::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RollExtractor {
    options: ExtractOptions,
    segmenter: BlockSegmenter,
    resolver: HeaderResolver,
    fields: FieldExtractor,
}

impl RollExtractor {
    /// Compile an extractor from options.
    ///
    /// Fails only if a configured label cannot be compiled.
    pub fn new(options: ExtractOptions) -> Result<Self> {
        let segmenter = BlockSegmenter::new(options.max_block_lines)?;
        let patterns = Patterns::new(&options.vocabulary)?;
        let resolver = HeaderResolver::new(options.tables.clone(), &patterns)?;
        let fields = FieldExtractor::new(segmenter.clone(), patterns, options.age_bounds);
        Ok(Self {
            options,
            segmenter,
            resolver,
            fields,
        })
    }

    /// Get the options the extractor was built with.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Get the block segmenter.
    pub fn segmenter(&self) -> &BlockSegmenter {
        &self.segmenter
    }

    /// Resolve a document's header from its leading pages.
    pub fn resolve_header(&self, doc: &SourceDocument) -> HeaderMetadata {
        self.resolver
            .resolve(&doc.leading_lines(self.options.header_pages))
    }

    /// Probe a document's labeling style.
    pub fn probe(&self, doc: &SourceDocument) -> DialectProbe {
        probe_dialect(
            &doc.pages,
            &self.segmenter,
            self.fields.patterns(),
            self.options.header_pages,
        )
    }

    /// Choose the dialect for a document.
    pub fn choose_dialect(&self, doc: &SourceDocument) -> DialectKind {
        match self.options.dialect {
            DialectChoice::Fixed(kind) => kind,
            DialectChoice::Auto => self.probe(doc).kind,
        }
    }

    /// Extract one page with an already resolved header.
    ///
    /// Pages are independent of each other once the header is known.
    pub fn extract_page(
        &self,
        page: &RawPage,
        header: &HeaderMetadata,
        dialect: DialectKind,
    ) -> PageExtraction {
        let assembler = RecordAssembler::new(header);
        self.extract_page_with(page, &assembler, dialect.dialect())
    }

    fn extract_page_with(
        &self,
        page: &RawPage,
        assembler: &RecordAssembler<'_>,
        dialect: &dyn Dialect,
    ) -> PageExtraction {
        let segmented = self.segmenter.segment_page(page);
        let mut out = PageExtraction {
            page: page.number,
            records: Vec::with_capacity(segmented.blocks.len()),
            stats: ExtractionStats::new(),
        };
        out.stats.add_page();
        out.stats
            .add_segmentation(segmented.blocks.len(), segmented.skipped_lines);

        for block in &segmented.blocks {
            match self.fields.extract(block, dialect) {
                Some(fields) => {
                    assembler.assemble_into(fields, &mut out.records);
                    if let Some(record) = out.records.last() {
                        out.stats.add_record(record);
                    }
                }
                None => {
                    log::trace!("page {}: dropped unanchored block", page.number);
                    out.stats.add_dropped_block();
                }
            }
        }
        out
    }

    /// Extract every record of a document.
    ///
    /// The header is resolved first; pages are then processed in parallel
    /// when enabled. Records always come out in page and block order.
    pub fn extract(&self, doc: &SourceDocument) -> ExtractedDocument {
        let header = self.resolve_header(doc);
        if !header.has_constituency() {
            log::debug!("{}: no constituency in leading pages", doc.name);
        }
        if !header.has_booth() {
            log::debug!("{}: no booth in leading pages", doc.name);
        }
        let kind = self.choose_dialect(doc);
        let dialect = kind.dialect();
        let assembler = RecordAssembler::new(&header);

        let pages: Vec<PageExtraction> = if self.options.parallel {
            doc.pages
                .par_iter()
                .map(|page| self.extract_page_with(page, &assembler, dialect))
                .collect()
        } else {
            doc.pages
                .iter()
                .map(|page| self.extract_page_with(page, &assembler, dialect))
                .collect()
        };

        let mut records = Vec::new();
        let mut stats = ExtractionStats::new();
        for page in pages {
            stats.merge(&page.stats);
            records.extend(page.records);
        }

        log::debug!(
            "{}: dialect {}, {} pages, {} records, {} dropped blocks",
            doc.name,
            kind,
            stats.page_count,
            stats.record_count,
            stats.dropped_block_count
        );
        if records.is_empty() && doc.pages.iter().any(|p| !p.is_blank()) {
            log::warn!("{}: no voter entries found", doc.name);
        }

        ExtractedDocument {
            name: doc.name.clone(),
            header,
            dialect: kind,
            records,
            stats,
        }
    }

    /// Extract many documents, each independently.
    ///
    /// Output order equals input order.
    pub fn extract_batch(&self, docs: &[SourceDocument]) -> Vec<ExtractedDocument> {
        if self.options.parallel {
            docs.par_iter().map(|doc| self.extract(doc)).collect()
        } else {
            docs.iter().map(|doc| self.extract(doc)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, RelationType};

    const PAGE_ONE: &str = "निर्वाचक नामावली बिहार
विधानसभा निर्वाचन क्षेत्र की संख्या एवं नाम : 182 - पटना साहिब (सामान्य)
भाग संख्या : 45 - प्राथमिक विद्यालय
12 ABCD1234567
निर्वाचक का नाम : राम कुमार
पिता का नाम : श्याम कुमार
मकान संख्या : 7 फोटो
उम्र : 45 लिंग : पुरुष
13 ABCD7654321
निर्वाचक का नाम : सीता देवी
पति का नाम : राम कुमार
मकान संख्या : 7
उम्र : 40 लिंग : महिला";

    fn document() -> SourceDocument {
        SourceDocument::from_page_texts("roll.txt", [PAGE_ONE])
    }

    #[test]
    fn test_extract_document() {
        let extractor = RollExtractor::new(ExtractOptions::default()).unwrap();
        let doc = extractor.extract(&document());

        assert_eq!(doc.dialect, DialectKind::Labeled);
        assert_eq!(doc.header.state_name, "Bihar");
        assert_eq!(doc.record_count(), 2);

        let first = &doc.records[0];
        assert_eq!(first.constituency, "182-पटना साहिब");
        assert_eq!(first.booth, "45-प्राथमिक विद्यालय");
        assert_eq!(first.voter_name, "राम कुमार");
        assert_eq!(first.relation_type, RelationType::Father);
        assert_eq!(first.house_number, "7");

        let second = &doc.records[1];
        assert_eq!(second.relation_type, RelationType::Husband);
        assert_eq!(second.relation_name, "राम कुमार");
        assert_eq!(second.gender, Gender::Female);

        assert_eq!(doc.stats.page_count, 1);
        assert_eq!(doc.stats.block_count, 2);
        assert_eq!(doc.stats.skipped_line_count, 3);
        assert_eq!(doc.stats.record_count as usize, doc.records.len());
        assert_eq!(doc.stats.missing_relation, 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = RollExtractor::new(ExtractOptions::default()).unwrap();
        let sequential = RollExtractor::new(ExtractOptions::default().sequential()).unwrap();
        let doc = SourceDocument::from_page_texts("roll.txt", [PAGE_ONE, PAGE_ONE, PAGE_ONE]);
        assert_eq!(parallel.extract(&doc).records, sequential.extract(&doc).records);
    }

    #[test]
    fn test_fixed_dialect() {
        let options = ExtractOptions::default()
            .with_dialect(DialectChoice::Fixed(DialectKind::Heuristic));
        let extractor = RollExtractor::new(options).unwrap();
        assert_eq!(extractor.extract(&document()).dialect, DialectKind::Heuristic);
    }

    #[test]
    fn test_empty_document() {
        let extractor = RollExtractor::new(ExtractOptions::default()).unwrap();
        let doc = extractor.extract(&SourceDocument::new("empty"));
        assert!(doc.is_empty());
        assert_eq!(doc.header, HeaderMetadata::unresolved());
    }

    #[test]
    fn test_batch_keeps_order() {
        let extractor = RollExtractor::new(ExtractOptions::default()).unwrap();
        let docs = vec![
            SourceDocument::from_page_texts("a", [PAGE_ONE]),
            SourceDocument::new("b"),
            SourceDocument::from_page_texts("c", [PAGE_ONE]),
        ];
        let out = extractor.extract_batch(&docs);
        let names: Vec<_> = out.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(out[1].record_count(), 0);
    }
}
