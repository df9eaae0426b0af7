//! Extraction statistics.

use serde::{Deserialize, Serialize};

use crate::model::{VoterRecord, NOT_FOUND};

/// Counters collected while extracting one or more documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Total number of pages processed
    pub page_count: u32,

    /// Anchored blocks found by segmentation
    pub block_count: u32,

    /// Records assembled
    pub record_count: u32,

    /// Blocks that did not yield a record
    pub dropped_block_count: u32,

    /// Non-blank lines outside every block
    pub skipped_line_count: u32,

    /// Records without a voter name
    pub missing_name: u32,

    /// Records without a relation keyword
    pub missing_relation: u32,

    /// Records without a house number
    pub missing_house_number: u32,

    /// Records without an age
    pub missing_age: u32,

    /// Records with an unknown gender
    pub missing_gender: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment page count.
    pub fn add_page(&mut self) {
        self.page_count += 1;
    }

    /// Count a segmented page's blocks and stray lines.
    pub fn add_segmentation(&mut self, blocks: usize, skipped_lines: usize) {
        self.block_count += blocks as u32;
        self.skipped_line_count += skipped_lines as u32;
    }

    /// Increment dropped block count.
    pub fn add_dropped_block(&mut self) {
        self.dropped_block_count += 1;
    }

    /// Count an assembled record and its unresolved fields.
    pub fn add_record(&mut self, record: &VoterRecord) {
        self.record_count += 1;
        if record.voter_name.is_empty() {
            self.missing_name += 1;
        }
        if record.relation_type == crate::model::RelationType::Unknown {
            self.missing_relation += 1;
        }
        if record.house_number == NOT_FOUND {
            self.missing_house_number += 1;
        }
        if record.age.is_empty() {
            self.missing_age += 1;
        }
        if !record.gender.is_known() {
            self.missing_gender += 1;
        }
    }

    /// Share of records with every block field resolved, in `[0, 1]`.
    pub fn completeness(&self) -> f64 {
        if self.record_count == 0 {
            return 0.0;
        }
        let missing = self.missing_name
            + self.missing_relation
            + self.missing_house_number
            + self.missing_age
            + self.missing_gender;
        let slots = f64::from(self.record_count) * 5.0;
        (slots - f64::from(missing)) / slots
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.page_count += other.page_count;
        self.block_count += other.block_count;
        self.record_count += other.record_count;
        self.dropped_block_count += other.dropped_block_count;
        self.skipped_line_count += other.skipped_line_count;
        self.missing_name += other.missing_name;
        self.missing_relation += other.missing_relation;
        self.missing_house_number += other.missing_house_number;
        self.missing_age += other.missing_age;
        self.missing_gender += other.missing_gender;
    }
}
