//! Code-to-name lookup tables for header resolution.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::normalize::normalize;
use crate::error::{Error, Result};

/// Lookup tables mapping printed codes and keywords to canonical names.
///
/// Keys are matched after normalization. Unmapped keys fall back to the
/// literal captured text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTables {
    /// State code (e.g. `S04`) to state name
    #[serde(default)]
    pub states: BTreeMap<String, String>,

    /// State keyword as printed (any script or garbling) to state name
    #[serde(default)]
    pub state_keywords: BTreeMap<String, String>,

    /// Constituency number to canonical constituency name
    #[serde(default)]
    pub constituencies: BTreeMap<String, String>,
}

impl LookupTables {
    /// Create the built-in tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables with no entries.
    pub fn empty() -> Self {
        Self {
            states: BTreeMap::new(),
            state_keywords: BTreeMap::new(),
            constituencies: BTreeMap::new(),
        }
    }

    /// Parse tables from JSON. Missing maps are empty.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("lookup tables: {}", e)))
    }

    /// Read a lookup table JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Add another set of tables; its entries replace existing ones.
    pub fn merge(&mut self, other: LookupTables) {
        self.states.extend(other.states);
        self.state_keywords.extend(other.state_keywords);
        self.constituencies.extend(other.constituencies);
    }

    /// Add or replace a constituency entry.
    pub fn with_constituency(mut self, number: impl Into<String>, name: impl Into<String>) -> Self {
        self.constituencies.insert(number.into(), name.into());
        self
    }

    /// Add or replace a state code entry.
    pub fn with_state(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.states.insert(code.into(), name.into());
        self
    }

    /// Look up a state name by code (case-insensitive).
    pub fn state_for_code(&self, code: &str) -> Option<&str> {
        let code = code.trim().to_uppercase();
        self.states
            .iter()
            .find(|(key, _)| key.trim().to_uppercase() == code)
            .map(|(_, name)| name.as_str())
    }

    /// Look up a constituency name by number, ignoring leading zeros.
    pub fn constituency_name(&self, number: &str) -> Option<&str> {
        let wanted = strip_zeros(number.trim());
        self.constituencies
            .iter()
            .find(|(key, _)| strip_zeros(key.trim()) == wanted)
            .map(|(_, name)| name.as_str())
    }

    /// State keywords normalized, longest first.
    pub fn normalized_state_keywords(&self) -> Vec<(String, String)> {
        let mut keywords: Vec<(String, String)> = self
            .state_keywords
            .iter()
            .map(|(keyword, name)| (normalize(keyword), name.clone()))
            .filter(|(keyword, _)| !keyword.is_empty())
            .collect();
        keywords.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        keywords
    }
}

fn strip_zeros(number: &str) -> &str {
    let stripped = number.trim_start_matches('0');
    if stripped.is_empty() && !number.is_empty() {
        "0"
    } else {
        stripped
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        let states = [
            ("S01", "Andhra Pradesh"),
            ("S02", "Arunachal Pradesh"),
            ("S03", "Assam"),
            ("S04", "Bihar"),
            ("S05", "Goa"),
            ("S06", "Gujarat"),
            ("S07", "Haryana"),
            ("S08", "Himachal Pradesh"),
            ("S09", "Jammu & Kashmir"),
            ("S10", "Karnataka"),
            ("S11", "Kerala"),
            ("S12", "Madhya Pradesh"),
            ("S13", "Maharashtra"),
            ("S14", "Manipur"),
            ("S15", "Meghalaya"),
            ("S16", "Mizoram"),
            ("S17", "Nagaland"),
            ("S18", "Odisha"),
            ("S19", "Punjab"),
            ("S20", "Rajasthan"),
            ("S21", "Sikkim"),
            ("S22", "Tamil Nadu"),
            ("S23", "Tripura"),
            ("S24", "Uttar Pradesh"),
            ("S25", "West Bengal"),
            ("S26", "Chhattisgarh"),
            ("S27", "Jharkhand"),
            ("S28", "Uttarakhand"),
            ("S29", "Telangana"),
        ];
        let state_keywords = [
            ("बिहार", "Bihar"),
            ("िबहार", "Bihar"),
            ("उत्तर प्रदेश", "Uttar Pradesh"),
            ("मध्य प्रदेश", "Madhya Pradesh"),
            ("राजस्थान", "Rajasthan"),
            ("झारखंड", "Jharkhand"),
            ("झारखण्ड", "Jharkhand"),
            ("छत्तीसगढ़", "Chhattisgarh"),
            ("हरियाणा", "Haryana"),
            ("हिमाचल प्रदेश", "Himachal Pradesh"),
            ("उत्तराखंड", "Uttarakhand"),
            ("उत्तराखण्ड", "Uttarakhand"),
            ("दिल्ली", "Delhi"),
            ("BIHAR", "Bihar"),
            ("UTTAR PRADESH", "Uttar Pradesh"),
        ];

        Self {
            states: owned(&states),
            state_keywords: owned(&state_keywords),
            constituencies: BTreeMap::new(),
        }
    }
}

fn owned(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_for_code() {
        let tables = LookupTables::default();
        assert_eq!(tables.state_for_code("S04"), Some("Bihar"));
        assert_eq!(tables.state_for_code("s24"), Some("Uttar Pradesh"));
        assert_eq!(tables.state_for_code("S99"), None);
    }

    #[test]
    fn test_constituency_ignores_leading_zeros() {
        let tables = LookupTables::empty().with_constituency("182", "Patna Sahib");
        assert_eq!(tables.constituency_name("182"), Some("Patna Sahib"));
        assert_eq!(tables.constituency_name("0182"), Some("Patna Sahib"));
        assert_eq!(tables.constituency_name("18"), None);
    }

    #[test]
    fn test_merge_overrides() {
        let mut tables = LookupTables::default();
        let json = r#"{"states": {"S04": "BIHAR STATE"}, "constituencies": {"7": "Alpha"}}"#;
        tables.merge(LookupTables::from_json_str(json).unwrap());
        assert_eq!(tables.state_for_code("S04"), Some("BIHAR STATE"));
        assert_eq!(tables.constituency_name("7"), Some("Alpha"));
        assert_eq!(tables.state_for_code("S01"), Some("Andhra Pradesh"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            LookupTables::from_json_str(r#"{"states": 3}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_keywords_longest_first() {
        let keywords = LookupTables::default().normalized_state_keywords();
        for pair in keywords.windows(2) {
            assert!(pair[0].0.len() >= pair[1].0.len());
        }
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        std::fs::write(&path, r#"{"constituencies": {"12": "Beta"}}"#).unwrap();
        let tables = LookupTables::from_path(&path).unwrap();
        assert_eq!(tables.constituency_name("12"), Some("Beta"));
        assert!(tables.states.is_empty());
    }
}
