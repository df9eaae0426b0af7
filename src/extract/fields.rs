//! Field extraction for one voter block.

use super::dialect::Dialect;
use super::normalize::desplit_identifier;
use super::options::AgeBounds;
use super::patterns::Patterns;
use super::rules::RuleContext;
use super::segment::BlockSegmenter;
use crate::model::{Gender, RelationType, TextBlock};

/// The fields recovered from one block, before header data is attached.
///
/// Every field is optional; unresolved text fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Serial number from the anchor line
    pub serial: String,
    /// Identifier code from the anchor line
    pub identifier: String,
    /// Voter name
    pub name: String,
    /// Relation class
    pub relation_type: RelationType,
    /// Relation's name
    pub relation_name: String,
    /// House number text as captured, before reduction
    pub house_number: String,
    /// Age in ASCII digits
    pub age: String,
    /// Normalized gender
    pub gender: Gender,
}

/// Runs a dialect's rule chains over blocks.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    segmenter: BlockSegmenter,
    patterns: Patterns,
    age_bounds: AgeBounds,
}

impl FieldExtractor {
    /// Create an extractor.
    pub fn new(segmenter: BlockSegmenter, patterns: Patterns, age_bounds: AgeBounds) -> Self {
        Self {
            segmenter,
            patterns,
            age_bounds,
        }
    }

    /// Get the compiled patterns.
    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    /// Extract fields from a block.
    ///
    /// Returns `None` when the block's first line is not an anchor; such a
    /// block never becomes a record. Otherwise every field is best effort.
    pub fn extract(&self, block: &TextBlock, dialect: &dyn Dialect) -> Option<ExtractedFields> {
        let first = desplit_identifier(block.first_line()?);
        let (serial, identifier, tail) = self.segmenter.split_anchor(&first)?;

        let mut text = String::new();
        if !tail.is_empty() {
            text.push_str(tail);
        }
        for line in block.body_lines() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&desplit_identifier(line));
        }

        let ctx = RuleContext::new(&text, &self.patterns, self.age_bounds);
        let mut fields = ExtractedFields {
            serial: serial.to_string(),
            identifier: identifier.to_string(),
            ..ExtractedFields::default()
        };

        if let Some(name) = dialect.name(&ctx) {
            fields.name = name;
        }
        if let Some(relation) = dialect.relation(&ctx) {
            fields.relation_type = relation.relation_type;
            fields.relation_name = relation.name;
        }
        if let Some(house) = dialect.house(&ctx) {
            fields.house_number = house;
        }
        if let Some(found) = dialect.age_gender(&ctx) {
            fields.age = found.age.unwrap_or_default();
            fields.gender = found.gender;
        }
        Some(fields)
    }
}
