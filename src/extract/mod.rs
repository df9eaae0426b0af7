//! The extraction engine.
//!
//! Control flow per document: resolve the header once, then for each page
//! segment lines into blocks, extract fields from each block with the
//! document's dialect, and assemble records.

mod assemble;
mod dialect;
mod engine;
mod fields;
mod header;
mod normalize;
mod options;
mod patterns;
mod rules;
mod segment;
mod tables;
mod vocabulary;

pub use assemble::RecordAssembler;
pub use dialect::{first_match, Dialect, DialectKind, HeuristicDialect, LabeledDialect};
pub use engine::{PageExtraction, RollExtractor};
pub use fields::{ExtractedFields, FieldExtractor};
pub use header::HeaderResolver;
pub use normalize::{
    desplit_identifier, digit_runs, is_identifier_code, normalize, reduce_house_number,
    to_ascii_digits, GenderTable,
};
pub use options::{AgeBounds, DialectChoice, ExtractOptions};
pub use patterns::{LabelMatch, LabelMatcher, Patterns};
pub use rules::{AgeGender, FieldRule, Relation, RuleContext};
pub use segment::{BlockSegmenter, Segmented};
pub use tables::LookupTables;
pub use vocabulary::{GenderTerm, LabelStyle, RelationKeyword, Vocabulary};
