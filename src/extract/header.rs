//! Header metadata resolution.
//!
//! State, constituency and booth are each resolved independently from the
//! first pages of a document. Every sub-resolution takes the first line
//! that matches, not the best one.

use regex::Regex;

use super::normalize::{normalize, to_ascii_digits};
use super::patterns::{trim_value, LabelMatcher, Patterns};
use super::tables::LookupTables;
use crate::error::Result;
use crate::model::{HeaderMetadata, NOT_FOUND, UNKNOWN};

/// `<number> - <name>`, ASCII or Devanagari digits.
const NUMBERED_NAME_PATTERN: &str = r"([0-9०-९]{1,4})\s*[-–]\s*([^\n(]+)";

/// Election Commission state code, e.g. `S04`.
const STATE_CODE_PATTERN: &str = r"\b([Ss][0-9]{2})\b";

/// Resolves [`HeaderMetadata`] from a document's leading lines.
#[derive(Debug, Clone)]
pub struct HeaderResolver {
    tables: LookupTables,
    constituency: LabelMatcher,
    booth: LabelMatcher,
    state_keywords: LabelMatcher,
    state_names: Vec<String>,
    numbered_name: Regex,
    state_code: Regex,
}

impl HeaderResolver {
    /// Create a resolver from lookup tables and compiled header keywords.
    pub fn new(tables: LookupTables, patterns: &Patterns) -> Result<Self> {
        let (keywords, state_names): (Vec<String>, Vec<String>) =
            tables.normalized_state_keywords().into_iter().unzip();

        Ok(Self {
            constituency: patterns.constituency.clone(),
            booth: patterns.booth.clone(),
            state_keywords: LabelMatcher::new(&keywords)?,
            state_names,
            numbered_name: Regex::new(NUMBERED_NAME_PATTERN)?,
            state_code: Regex::new(STATE_CODE_PATTERN)?,
            tables,
        })
    }

    /// Get the lookup tables in use.
    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    /// Resolve header metadata from raw leading lines.
    pub fn resolve<S: AsRef<str>>(&self, lines: &[S]) -> HeaderMetadata {
        let lines: Vec<String> = lines
            .iter()
            .map(|line| normalize(line.as_ref()))
            .filter(|line| !line.is_empty())
            .collect();

        let mut header = HeaderMetadata::unresolved();
        header.state_name = self.resolve_state(&lines);

        let constituency = self.resolve_numbered(&lines, &self.constituency, &self.booth);
        if let Some((number, name)) = constituency {
            header.constituency_name = self
                .tables
                .constituency_name(&number)
                .map(str::to_string)
                .unwrap_or(name);
            header.constituency_number = number;
        }

        let booth = self.resolve_numbered(&lines, &self.booth, &self.constituency);
        if let Some((number, name)) = booth {
            header.booth_number = number;
            header.booth_name = name;
        }

        log::debug!(
            "header: state={}, constituency={}, booth={}",
            header.state_name,
            header.constituency_display(),
            header.booth_display()
        );
        header
    }

    /// The first line carrying a state code or a state keyword decides.
    ///
    /// Codes map through the state table; an unmapped code is kept as
    /// printed.
    fn resolve_state(&self, lines: &[String]) -> String {
        for line in lines {
            if let Some(caps) = self.state_code.captures(line) {
                if let Some(code) = caps.get(1) {
                    let code = code.as_str().to_uppercase();
                    return match self.tables.state_for_code(&code) {
                        Some(name) => name.to_string(),
                        None => code,
                    };
                }
            }
            if let Some(found) = self.state_keywords.find(line) {
                if let Some(name) = self.state_names.get(found.index) {
                    return name.clone();
                }
            }
        }
        UNKNOWN.to_string()
    }

    /// Find the first keyword line whose tail, or the line after it, holds
    /// a `<number> - <name>` pair.
    ///
    /// The line after is only read when it does not open the `other`
    /// header field.
    fn resolve_numbered(
        &self,
        lines: &[String],
        keyword: &LabelMatcher,
        other: &LabelMatcher,
    ) -> Option<(String, String)> {
        for (idx, line) in lines.iter().enumerate() {
            let Some(found) = keyword.find(line) else {
                continue;
            };
            if let Some(pair) = self.numbered_name(&line[found.label_end..]) {
                return Some(pair);
            }
            let next = lines
                .get(idx + 1)
                .filter(|next| other.find(next).is_none());
            if let Some(pair) = next.and_then(|next| self.numbered_name(next)) {
                return Some(pair);
            }
        }
        None
    }

    fn numbered_name(&self, text: &str) -> Option<(String, String)> {
        let caps = self.numbered_name.captures(text)?;
        let number = to_ascii_digits(caps.get(1)?.as_str());
        let name = trim_value(caps.get(2)?.as_str());
        let name = if name.is_empty() { NOT_FOUND } else { name };
        Some((number, name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Vocabulary;

    fn resolver(tables: LookupTables) -> HeaderResolver {
        let patterns = Patterns::new(&Vocabulary::default()).unwrap();
        HeaderResolver::new(tables, &patterns).unwrap()
    }

    #[test]
    fn test_resolve_full_header() {
        let header = resolver(LookupTables::default()).resolve(&[
            "निर्वाचक नामावली, बिहार",
            "विधानसभा निर्वाचन क्षेत्र की संख्या एवं नाम : 182 - पटना साहिब (सामान्य)",
            "भाग संख्या : 45 - प्राथमिक विद्यालय, गाय घाट",
        ]);
        assert_eq!(header.state_name, "Bihar");
        assert_eq!(header.constituency_number, "182");
        assert_eq!(header.constituency_name, "पटना साहिब");
        assert_eq!(header.booth_number, "45");
        assert_eq!(header.booth_name, "प्राथमिक विद्यालय, गाय घाट");
    }

    #[test]
    fn test_constituency_name_from_table() {
        let tables = LookupTables::default().with_constituency("182", "Patna Sahib");
        let header = resolver(tables).resolve(&["Assembly Constituency : 182 - PATNA SAHIB"]);
        assert_eq!(header.constituency_number, "182");
        assert_eq!(header.constituency_name, "Patna Sahib");
    }

    #[test]
    fn test_booth_on_next_line() {
        let header = resolver(LookupTables::default()).resolve(&[
            "मतदान केंद्र का नाम एवं पता",
            "12 - पंचायत भवन",
        ]);
        assert_eq!(header.booth_number, "12");
        assert_eq!(header.booth_name, "पंचायत भवन");
    }

    #[test]
    fn test_next_line_of_other_field_not_borrowed() {
        let header = resolver(LookupTables::default()).resolve(&[
            "विधानसभा निर्वाचन क्षेत्र",
            "भाग संख्या : 45 - प्राथमिक विद्यालय",
        ]);
        assert_eq!(header.constituency_number, "");
        assert_eq!(header.constituency_name, NOT_FOUND);
        assert_eq!(header.booth_number, "45");
        assert_eq!(header.booth_name, "प्राथमिक विद्यालय");
    }

    #[test]
    fn test_state_code_wins_on_earlier_line() {
        let header = resolver(LookupTables::default()).resolve(&["S24 Part 3", "बिहार"]);
        assert_eq!(header.state_name, "Uttar Pradesh");
    }

    #[test]
    fn test_unmapped_state_code_kept_literal() {
        let header = resolver(LookupTables::empty()).resolve(&["State: S31"]);
        assert_eq!(header.state_name, "S31");
    }

    #[test]
    fn test_nothing_resolved() {
        let header = resolver(LookupTables::default()).resolve(&["random text", "more"]);
        assert_eq!(header, HeaderMetadata::unresolved());
        assert_eq!(header.constituency_display(), NOT_FOUND);
    }

    #[test]
    fn test_devanagari_digits() {
        let header = resolver(LookupTables::default()).resolve(&["भाग संख्या : ४५ - स्कूल"]);
        assert_eq!(header.booth_number, "45");
    }
}
