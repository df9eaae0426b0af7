//! Rendering extracted records to output formats.

mod json;
mod result;

pub use json::{
    document_to_json, documents_to_rows_json, merged_rows, records_to_json, JsonFormat,
};
pub use result::ExtractionStats;
