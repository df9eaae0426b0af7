//! Text and value normalization.
//!
//! Every other stage works on text passed through [`normalize`]. The value
//! normalizers ([`reduce_house_number`], [`GenderTable`]) turn captured
//! field text into the values written to records.

use std::borrow::Cow;
use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use super::vocabulary::GenderTerm;
use crate::model::Gender;

/// Upper bound on pieces merged back into one identifier.
const MAX_SPLIT_PIECES: usize = 8;

/// Normalize a string for matching.
///
/// Removes zero-width characters, composes to NFC, collapses runs of spaces,
/// tabs and non-breaking spaces into one space and trims the ends. Line
/// breaks are kept. The function is idempotent.
pub fn normalize(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !is_zero_width(*c)).collect();
    let composed: String = stripped.nfc().collect();
    collapse_spaces(&composed).trim().to_string()
}

fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}')
}

fn is_inline_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

fn collapse_spaces(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if is_inline_space(c) {
            if !in_run {
                result.push(' ');
            }
            in_run = true;
        } else {
            result.push(c);
            in_run = false;
        }
    }
    result
}

/// Check whether a token is a complete identifier code.
///
/// Two or more uppercase ASCII letters, then letters, digits, `/` or `-`,
/// ending in at least three digits.
pub fn is_identifier_code(token: &str) -> bool {
    let bytes = token.as_bytes();
    let leading = bytes.iter().take_while(|b| b.is_ascii_uppercase()).count();
    let trailing = bytes.iter().rev().take_while(|b| b.is_ascii_digit()).count();
    leading >= 2 && trailing >= 3 && bytes.iter().all(|b| is_code_byte(*b))
}

fn is_code_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'/' || b == b'-'
}

fn is_code_piece(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(is_code_byte)
}

fn is_serial(token: &str) -> bool {
    (1..=4).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_digit())
}

fn starts_identifier(token: &str) -> bool {
    token.bytes().take(2).filter(u8::is_ascii_uppercase).count() == 2
}

/// Rejoin an identifier code that OCR split with stray spaces.
///
/// Works on a normalized anchor-style line (`<serial> <code> ...`). When the
/// token after the serial is not already a complete code, the following
/// code-like pieces are merged until they form one. Trailing digit pieces
/// are then absorbed, even after a complete code, unless they open the next
/// column's entry. Lines that need no repair are returned unchanged.
pub fn desplit_identifier(line: &str) -> Cow<'_, str> {
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() < 3 || !is_serial(tokens[0]) {
        return Cow::Borrowed(line);
    }

    let mut merged = String::new();
    let mut end = None;
    for (idx, token) in tokens.iter().enumerate().skip(1).take(MAX_SPLIT_PIECES) {
        if !is_code_piece(token) {
            break;
        }
        merged.push_str(token);
        if is_identifier_code(&merged) {
            end = Some(idx);
            break;
        }
    }
    let Some(code_end) = end else {
        return Cow::Borrowed(line);
    };

    let mut end = code_end;
    while let Some(next) = tokens.get(end + 1) {
        if next.is_empty() || !next.bytes().all(|b| b.is_ascii_digit()) {
            break;
        }
        if tokens.get(end + 2).is_some_and(|after| starts_identifier(after)) {
            break;
        }
        merged.push_str(next);
        end += 1;
    }
    if end == 1 {
        return Cow::Borrowed(line);
    }

    let mut result = String::with_capacity(line.len());
    result.push_str(tokens[0]);
    result.push(' ');
    result.push_str(&merged);
    for token in &tokens[end + 1..] {
        result.push(' ');
        result.push_str(token);
    }
    Cow::Owned(result)
}

/// Check for an ASCII or Devanagari decimal digit.
pub fn is_digit_char(c: char) -> bool {
    c.is_ascii_digit() || ('\u{0966}'..='\u{096F}').contains(&c)
}

/// Maximal runs of digits in `text`, in order.
pub fn digit_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = None;
    for (idx, c) in text.char_indices() {
        match (is_digit_char(c), start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                runs.push(&text[s..idx]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(&text[s..]);
    }
    runs
}

/// Map Devanagari digits to their ASCII forms.
pub fn to_ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{0966}'..='\u{096F}' => char::from(b'0' + (c as u32 - 0x0966) as u8),
            _ => c,
        })
        .collect()
}

/// Reduce captured house-number text.
///
/// Keeps the last embedded digit run when there is one, otherwise the
/// trimmed text as is.
pub fn reduce_house_number(text: &str) -> String {
    let trimmed = text.trim();
    match digit_runs(trimmed).last() {
        Some(run) => run.to_string(),
        None => trimmed.to_string(),
    }
}

/// Synonym table mapping gender tokens to [`Gender`].
///
/// ASCII terms and very short terms must match a whole token
/// (case-insensitive); longer Devanagari terms also match inside a token,
/// which absorbs OCR debris around them.
#[derive(Debug, Clone)]
pub struct GenderTable {
    exact: HashMap<String, Gender>,
    contained: Vec<(String, Gender)>,
}

impl GenderTable {
    /// Build a table from synonym terms.
    pub fn from_terms(terms: &[GenderTerm]) -> Self {
        let mut exact = HashMap::new();
        let mut contained = Vec::new();
        for term in terms {
            let key = normalize(&term.term).to_lowercase();
            if key.is_empty() || !term.gender.is_known() {
                continue;
            }
            if key.is_ascii() || key.chars().count() <= 2 {
                exact.entry(key).or_insert(term.gender);
            } else {
                contained.push((key, term.gender));
            }
        }
        contained.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self { exact, contained }
    }

    /// Normalize a raw gender capture. Unrecognized input yields
    /// [`Gender::Unknown`].
    pub fn normalize(&self, raw: &str) -> Gender {
        let raw = normalize(raw);
        let token = raw
            .split_whitespace()
            .map(|token| {
                token.trim_matches(|c: char| c.is_ascii_punctuation() || c == '।' || c == '：')
            })
            .find(|token| !token.is_empty());
        match token {
            Some(token) => self.lookup(&token.to_lowercase()).unwrap_or(Gender::Unknown),
            None => Gender::Unknown,
        }
    }

    /// Look up a single cleaned token.
    pub fn lookup(&self, token: &str) -> Option<Gender> {
        if let Some(gender) = self.exact.get(token) {
            return Some(*gender);
        }
        self.contained
            .iter()
            .find(|(term, _)| token.contains(term.as_str()))
            .map(|(_, gender)| *gender)
    }

    /// Whether a token is a whole-word Devanagari or spelled-out synonym.
    ///
    /// Single letters such as `M` are excluded; they are only trusted after
    /// an explicit gender label.
    pub fn is_spelled_term(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        token.chars().count() > 2 && self.lookup(&token).is_some()
    }
}

impl Default for GenderTable {
    fn default() -> Self {
        Self::from_terms(&super::vocabulary::Vocabulary::default().gender_terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_and_strips() {
        assert_eq!(normalize("  राम\u{200C}  \t कुमार\u{00A0}\u{00A0}"), "राम कुमार");
        assert_eq!(normalize("a\u{200B}b"), "ab");
        assert_eq!(normalize("line one  \nline\ttwo"), "line one \nline two");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "  12   ABCD1234567  ",
            "Voter Name :\u{00A0}राम\u{200D} कुमार\n\tपिता का नाम: श्याम",
            "e\u{200B}\u{0301} x",
            "\u{00A0}\u{200C}",
            "उम्र : ४५  लिंग : पुरुष",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_is_identifier_code() {
        assert!(is_identifier_code("ABCD1234567"));
        assert!(is_identifier_code("BR/12/345/678901"));
        assert!(is_identifier_code("XY-0012345"));
        assert!(!is_identifier_code("A1234567"));
        assert!(!is_identifier_code("ABCD12"));
        assert!(!is_identifier_code("abcd1234567"));
    }

    #[test]
    fn test_desplit_single_space() {
        assert_eq!(desplit_identifier("12 ABCD 1234567"), "12 ABCD1234567");
        assert_eq!(desplit_identifier("12 ABCD12 34567"), "12 ABCD1234567");
        assert_eq!(desplit_identifier("12 A BCD1234567"), "12 ABCD1234567");
    }

    #[test]
    fn test_desplit_after_complete_prefix() {
        assert_eq!(desplit_identifier("12 ABC123 4567"), "12 ABC1234567");
        assert_eq!(desplit_identifier("12 ABC12345 67"), "12 ABC1234567");
        assert_eq!(
            desplit_identifier("12 ABCD12345 67 राम कुमार"),
            "12 ABCD1234567 राम कुमार"
        );
        assert_eq!(
            desplit_identifier("12 ABC123 4567 13 EFG7654321"),
            "12 ABC1234567 13 EFG7654321"
        );
    }

    #[test]
    fn test_desplit_every_single_space_position() {
        let code = "ABC1234567";
        for split in 1..code.len() {
            let line = format!("7 {} {}", &code[..split], &code[split..]);
            assert_eq!(desplit_identifier(&line), "7 ABC1234567", "split at {}", split);
        }
    }

    #[test]
    fn test_desplit_absorbs_trailing_digits() {
        assert_eq!(desplit_identifier("3 ABC D123 4567"), "3 ABCD1234567");
    }

    #[test]
    fn test_desplit_keeps_next_column_anchor() {
        assert_eq!(
            desplit_identifier("12 ABCD 1234567 13 EFGH7654321"),
            "12 ABCD1234567 13 EFGH7654321"
        );
    }

    #[test]
    fn test_desplit_leaves_intact_lines() {
        assert!(matches!(
            desplit_identifier("12 ABCD1234567 राम"),
            Cow::Borrowed(_)
        ));
        assert!(matches!(
            desplit_identifier("Voter Name: Ram Kumar"),
            Cow::Borrowed(_)
        ));
        assert!(matches!(desplit_identifier("12 ABCD"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_reduce_house_number() {
        assert_eq!(reduce_house_number("12/3"), "3");
        assert_eq!(reduce_house_number(" H-45 B "), "45");
        assert_eq!(reduce_house_number("७"), "७");
        assert_eq!(reduce_house_number("  बिना नंबर "), "बिना नंबर");
        assert_eq!(reduce_house_number(""), "");
    }

    #[test]
    fn test_digit_helpers() {
        assert_eq!(digit_runs("a12b3४५"), vec!["12", "3४५"]);
        assert_eq!(to_ascii_digits("४५"), "45");
        assert_eq!(to_ascii_digits("a1"), "a1");
    }

    #[test]
    fn test_gender_table_synonyms() {
        let table = GenderTable::default();
        for male in ["पुरुष", "परुष", "परुुष", "पुरूष", "M", "m", "Male", "MALE"] {
            assert_eq!(table.normalize(male), Gender::Male, "{}", male);
        }
        for female in ["महिला", "मिहला", "महीला", "स्त्री", "F", "f", "Female"] {
            assert_eq!(table.normalize(female), Gender::Female, "{}", female);
        }
    }

    #[test]
    fn test_gender_table_unknown() {
        let table = GenderTable::default();
        assert_eq!(table.normalize(""), Gender::Unknown);
        assert_eq!(table.normalize("X"), Gender::Unknown);
        assert_eq!(table.normalize("अन्य"), Gender::Unknown);
        assert_eq!(table.normalize("Males"), Gender::Unknown);
    }

    #[test]
    fn test_gender_table_trims_debris() {
        let table = GenderTable::default();
        assert_eq!(table.normalize(": पुरुष फोटो"), Gender::Male);
        assert_eq!(table.normalize("पुरुष, फोटो"), Gender::Male);
        assert_eq!(table.normalize("F."), Gender::Female);
    }
}
