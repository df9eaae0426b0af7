//! Per-document header metadata.

use serde::{Deserialize, Serialize};

/// Placeholder for a state that could not be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a constituency, booth or other field that could not be found.
pub const NOT_FOUND: &str = "Not Found";

/// State, constituency and booth of one document.
///
/// Resolved once from the first pages of a document and shared read-only by
/// every record assembled from that document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMetadata {
    /// State name, or [`UNKNOWN`]
    pub state_name: String,

    /// Constituency number, empty when absent
    pub constituency_number: String,

    /// Constituency name, or [`NOT_FOUND`]
    pub constituency_name: String,

    /// Polling booth number, empty when absent
    pub booth_number: String,

    /// Polling booth name, or [`NOT_FOUND`]
    pub booth_name: String,
}

impl HeaderMetadata {
    /// Metadata with every field at its fallback value.
    pub fn unresolved() -> Self {
        Self {
            state_name: UNKNOWN.to_string(),
            constituency_number: String::new(),
            constituency_name: NOT_FOUND.to_string(),
            booth_number: String::new(),
            booth_name: NOT_FOUND.to_string(),
        }
    }

    /// Constituency as `number-name`, or [`NOT_FOUND`] without a number.
    pub fn constituency_display(&self) -> String {
        compound_display(&self.constituency_number, &self.constituency_name)
    }

    /// Booth as `number-name`, or [`NOT_FOUND`] without a number.
    pub fn booth_display(&self) -> String {
        compound_display(&self.booth_number, &self.booth_name)
    }

    /// Whether a constituency line was found.
    pub fn has_constituency(&self) -> bool {
        !self.constituency_number.is_empty()
    }

    /// Whether a booth line was found.
    pub fn has_booth(&self) -> bool {
        !self.booth_number.is_empty()
    }
}

impl Default for HeaderMetadata {
    fn default() -> Self {
        Self::unresolved()
    }
}

fn compound_display(number: &str, name: &str) -> String {
    if number.is_empty() {
        return NOT_FOUND.to_string();
    }
    let name = if name.is_empty() { NOT_FOUND } else { name };
    format!("{}-{}", number, name)
}
