//! Compiled label matchers built from a [`Vocabulary`].

use std::collections::HashSet;

use regex::Regex;

use super::normalize::{normalize, GenderTable};
use super::vocabulary::{RelationKeyword, Vocabulary};
use crate::error::Result;

/// A label occurrence found in block text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMatch {
    /// Index of the label in the list the matcher was built from
    pub index: usize,
    /// Byte offset where the label starts
    pub start: usize,
    /// Byte offset just past the label text
    pub label_end: usize,
    /// Byte offset where the value starts (after separator and spaces)
    pub value_start: usize,
    /// Whether a `:`/`-` separator followed the label
    pub separated: bool,
}

/// Finds any of a set of labels, tolerant of spacing, case and separators.
///
/// Labels only match on word boundaries: a letter or vowel sign directly
/// before or after the label rejects the occurrence, so `Age` does not fire
/// inside `Page` and `पति` does not fire inside `गणपति`. Digits may touch a
/// label (`उम्र45`).
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    regex: Option<Regex>,
    /// Capture group number -> label index
    groups: Vec<usize>,
    separator_group: usize,
}

impl LabelMatcher {
    /// Compile a matcher. Longer labels win over their prefixes.
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let mut entries: Vec<(usize, String)> = labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (idx, label_pattern(label.as_ref())))
            .filter(|(_, pattern)| !pattern.is_empty())
            .collect();
        if entries.is_empty() {
            return Ok(Self {
                regex: None,
                groups: Vec::new(),
                separator_group: 0,
            });
        }
        entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(&b.0)));

        let alternatives: Vec<String> = entries.iter().map(|(_, p)| format!("({})", p)).collect();
        let pattern = format!(r"(?i)(?:{})(\s*[:：\-–])?", alternatives.join("|"));
        let regex = Regex::new(&pattern)?;

        let mut groups = vec![usize::MAX];
        groups.extend(entries.iter().map(|(idx, _)| *idx));
        let separator_group = groups.len();

        Ok(Self {
            regex: Some(regex),
            groups,
            separator_group,
        })
    }

    /// Whether the matcher was built from at least one label.
    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// Find the first label occurrence in `text`.
    pub fn find(&self, text: &str) -> Option<LabelMatch> {
        self.find_at(text, 0)
    }

    /// Find the first label occurrence starting at or after `pos`.
    pub fn find_at(&self, text: &str, mut pos: usize) -> Option<LabelMatch> {
        let regex = self.regex.as_ref()?;
        while pos <= text.len() {
            let caps = regex.captures_at(text, pos)?;
            let whole = caps.get(0)?;
            let group = (1..self.separator_group).find(|g| caps.get(*g).is_some())?;
            let label = caps.get(group)?;

            if on_boundary(text, label.start(), label.end()) {
                let separator = caps.get(self.separator_group);
                let after = separator.map_or(label.end(), |m| m.end());
                let value_start = after + leading_spaces(&text[after..]);
                return Some(LabelMatch {
                    index: self.groups[group],
                    start: label.start(),
                    label_end: label.end(),
                    value_start,
                    separated: separator.is_some(),
                });
            }
            pos = next_char_boundary(text, whole.start());
        }
        None
    }

    /// Iterate over all label occurrences in order.
    pub fn find_iter<'m, 't>(&'m self, text: &'t str) -> impl Iterator<Item = LabelMatch> + 'm
    where
        't: 'm,
    {
        let mut pos = 0;
        std::iter::from_fn(move || {
            let found = self.find_at(text, pos)?;
            pos = found.label_end;
            Some(found)
        })
    }
}

/// Regex source for one label: words escaped, any spacing between them,
/// optional apostrophes.
fn label_pattern(label: &str) -> String {
    normalize(label)
        .split_whitespace()
        .map(|word| regex::escape(word).replace(['\'', '’'], "['’]?"))
        .collect::<Vec<_>>()
        .join(r"\s*")
}

/// Letters and Devanagari signs; digits and punctuation do not count.
pub fn is_letter_like(c: char) -> bool {
    if c.is_ascii_digit() || ('\u{0964}'..='\u{096F}').contains(&c) {
        return false;
    }
    c.is_alphabetic() || ('\u{0900}'..='\u{097F}').contains(&c)
}

fn on_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_letter_like) && !after.is_some_and(is_letter_like)
}

fn leading_spaces(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t']).len()
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| pos + c.len_utf8())
}

/// All matchers and tables the extraction rules need, compiled once per
/// extractor and shared read-only across threads.
#[derive(Debug, Clone)]
pub struct Patterns {
    /// Voter name labels
    pub name: LabelMatcher,
    /// Relation keywords
    pub relation: LabelMatcher,
    /// Relation keywords indexed like `relation`'s labels
    pub relation_keywords: Vec<RelationKeyword>,
    /// House number labels
    pub house: LabelMatcher,
    /// Age labels
    pub age: LabelMatcher,
    /// Gender labels
    pub gender: LabelMatcher,
    /// Photo captions
    pub photo: LabelMatcher,
    /// Every field label; values stop where one begins
    pub stop: LabelMatcher,
    /// Constituency header keywords
    pub constituency: LabelMatcher,
    /// Booth header keywords
    pub booth: LabelMatcher,
    /// Gender synonyms
    pub genders: GenderTable,
    /// Lowercased label words and gender terms, never part of a name
    pub stopwords: HashSet<String>,
}

impl Patterns {
    /// Compile all matchers from a vocabulary.
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        let relation_labels: Vec<&str> = vocabulary
            .relation_keywords
            .iter()
            .map(|k| k.keyword.as_str())
            .collect();

        let mut stopwords: HashSet<String> = vocabulary
            .all_field_labels()
            .iter()
            .flat_map(|label| {
                normalize(label)
                    .split_whitespace()
                    .map(|w| w.trim_matches(['\'', '’', ':']).to_lowercase())
                    .collect::<Vec<_>>()
            })
            .filter(|w| !w.is_empty())
            .collect();
        stopwords.extend(
            vocabulary
                .gender_terms
                .iter()
                .map(|t| normalize(&t.term).to_lowercase()),
        );
        stopwords.extend(["का", "की", "के", "सं", "नं", "no", "of"].map(String::from));

        Ok(Self {
            name: LabelMatcher::new(&vocabulary.name_labels)?,
            relation: LabelMatcher::new(&relation_labels)?,
            relation_keywords: vocabulary.relation_keywords.clone(),
            house: LabelMatcher::new(&vocabulary.house_labels)?,
            age: LabelMatcher::new(&vocabulary.age_labels)?,
            gender: LabelMatcher::new(&vocabulary.gender_labels)?,
            photo: LabelMatcher::new(&vocabulary.photo_markers)?,
            stop: LabelMatcher::new(&vocabulary.all_field_labels())?,
            constituency: LabelMatcher::new(&vocabulary.constituency_keywords)?,
            booth: LabelMatcher::new(&vocabulary.booth_keywords)?,
            genders: GenderTable::from_terms(&vocabulary.gender_terms),
            stopwords,
        })
    }

    /// Capture a field value starting at `from`.
    ///
    /// The value runs to the next field label or line break, whichever comes
    /// first, and is trimmed of spaces and separators.
    pub fn capture_value<'t>(&self, text: &'t str, from: usize) -> &'t str {
        let rest = &text[from..];
        let line_end = rest.find('\n').unwrap_or(rest.len());
        let line = &rest[..line_end];
        let end = self.stop.find(line).map_or(line.len(), |m| m.start);
        trim_value(&line[..end])
    }

    /// Check whether a token is a label word or gender term.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(&token.to_lowercase())
    }
}

/// Trim spaces and stray separators from a captured value.
pub fn trim_value(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '：' | '-' | '–' | ',' | '|'))
}
