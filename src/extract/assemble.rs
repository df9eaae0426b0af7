//! Record assembly: block fields plus document header into output rows.

use super::fields::ExtractedFields;
use super::normalize::reduce_house_number;
use crate::model::{HeaderMetadata, VoterRecord, NOT_FOUND};

/// Builds [`VoterRecord`]s for one document.
///
/// The header's compound display fields are formatted once and copied into
/// every record.
#[derive(Debug, Clone)]
pub struct RecordAssembler<'h> {
    header: &'h HeaderMetadata,
    constituency: String,
    booth: String,
}

impl<'h> RecordAssembler<'h> {
    /// Create an assembler for a document's header.
    pub fn new(header: &'h HeaderMetadata) -> Self {
        Self {
            header,
            constituency: header.constituency_display(),
            booth: header.booth_display(),
        }
    }

    /// Get the header records are assembled with.
    pub fn header(&self) -> &HeaderMetadata {
        self.header
    }

    /// Build one record.
    ///
    /// The house number is reduced to its last digit run; an empty house
    /// number becomes [`NOT_FOUND`].
    pub fn assemble(&self, fields: ExtractedFields) -> VoterRecord {
        let house_number = match reduce_house_number(&fields.house_number) {
            reduced if reduced.is_empty() => NOT_FOUND.to_string(),
            reduced => reduced,
        };

        VoterRecord {
            state_name: self.header.state_name.clone(),
            constituency: self.constituency.clone(),
            booth: self.booth.clone(),
            serial_number: fields.serial,
            voter_name: fields.name,
            identifier: fields.identifier,
            relation_name: fields.relation_name,
            relation_type: fields.relation_type,
            house_number,
            age: fields.age,
            gender: fields.gender,
        }
    }

    /// Build a record and append it to `records`.
    pub fn assemble_into(&self, fields: ExtractedFields, records: &mut Vec<VoterRecord>) {
        records.push(self.assemble(fields));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, RelationType};

    fn fields() -> ExtractedFields {
        ExtractedFields {
            serial: "12".to_string(),
            identifier: "ABCD1234567".to_string(),
            name: "राम कुमार".to_string(),
            relation_type: RelationType::Father,
            relation_name: "श्याम कुमार".to_string(),
            house_number: "H-12/7".to_string(),
            age: "45".to_string(),
            gender: Gender::Male,
        }
    }

    #[test]
    fn test_assemble_with_header() {
        let header = HeaderMetadata {
            state_name: "Bihar".to_string(),
            constituency_number: "182".to_string(),
            constituency_name: "पटना साहिब".to_string(),
            booth_number: "45".to_string(),
            booth_name: "प्राथमिक विद्यालय".to_string(),
        };
        let record = RecordAssembler::new(&header).assemble(fields());
        assert_eq!(record.state_name, "Bihar");
        assert_eq!(record.constituency, "182-पटना साहिब");
        assert_eq!(record.booth, "45-प्राथमिक विद्यालय");
        assert_eq!(record.house_number, "7");
        assert_eq!(record.serial_number, "12");
    }

    #[test]
    fn test_unresolved_header_uses_sentinels() {
        let header = HeaderMetadata::unresolved();
        let record = RecordAssembler::new(&header).assemble(ExtractedFields::default());
        assert_eq!(record.state_name, "Unknown");
        assert_eq!(record.constituency, NOT_FOUND);
        assert_eq!(record.booth, NOT_FOUND);
        assert_eq!(record.house_number, NOT_FOUND);
        assert_eq!(record.relation_type, RelationType::Unknown);
        assert_eq!(record.gender, Gender::Unknown);
        assert_eq!(record.voter_name, "");
    }

    #[test]
    fn test_assemble_into_appends() {
        let header = HeaderMetadata::unresolved();
        let assembler = RecordAssembler::new(&header);
        let mut records = Vec::new();
        assembler.assemble_into(fields(), &mut records);
        assembler.assemble_into(fields(), &mut records);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].house_number, "7");
    }
}
