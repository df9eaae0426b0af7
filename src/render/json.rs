//! JSON rendering for records and extracted documents.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{ExtractedDocument, VoterRecord};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Render records as a JSON array of rows keyed by column name.
pub fn records_to_json(records: &[VoterRecord], format: JsonFormat) -> Result<String> {
    to_json(records, format)
}

/// Render a whole extracted document, header and stats included.
pub fn document_to_json(doc: &ExtractedDocument, format: JsonFormat) -> Result<String> {
    to_json(doc, format)
}

/// Rows of several documents, concatenated in document order.
pub fn merged_rows(docs: &[ExtractedDocument]) -> Vec<&VoterRecord> {
    docs.iter().flat_map(|doc| doc.records.iter()).collect()
}

/// Render the rows of several documents as one JSON array.
pub fn documents_to_rows_json(docs: &[ExtractedDocument], format: JsonFormat) -> Result<String> {
    to_json(&merged_rows(docs), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::DialectKind;
    use crate::model::{Gender, HeaderMetadata, RelationType};
    use crate::render::ExtractionStats;

    fn record(serial: &str) -> VoterRecord {
        VoterRecord {
            state_name: "Bihar".to_string(),
            constituency: "182-पटना साहिब".to_string(),
            booth: "Not Found".to_string(),
            serial_number: serial.to_string(),
            voter_name: "राम कुमार".to_string(),
            identifier: "ABCD1234567".to_string(),
            relation_name: "श्याम कुमार".to_string(),
            relation_type: RelationType::Father,
            house_number: "7".to_string(),
            age: "45".to_string(),
            gender: Gender::Male,
        }
    }

    fn document(serials: &[&str]) -> ExtractedDocument {
        ExtractedDocument {
            name: "roll.txt".to_string(),
            header: HeaderMetadata::unresolved(),
            dialect: DialectKind::Labeled,
            records: serials.iter().map(|s| record(s)).collect(),
            stats: ExtractionStats::default(),
        }
    }

    #[test]
    fn test_records_to_json_pretty() {
        let json = records_to_json(&[record("1")], JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"Voter Name\": \"राम कुमार\""));
        assert!(json.contains("\"Relation Type\": \"Father\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_records_to_json_compact() {
        let json = records_to_json(&[record("1")], JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        let rows: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(rows[0]["Gender"], "Male");
    }

    #[test]
    fn test_document_to_json() {
        let json = document_to_json(&document(&["1"]), JsonFormat::Compact).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dialect"], "labeled");
        assert_eq!(value["header"]["state_name"], "Unknown");
        assert_eq!(value["records"][0]["Serial Number"], "1");
    }

    #[test]
    fn test_rows_keep_document_order() {
        let docs = [document(&["1", "2"]), document(&["1"])];
        let rows = merged_rows(&docs);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].serial_number, "2");
        let json = documents_to_rows_json(&docs, JsonFormat::Compact).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 3);
    }
}
