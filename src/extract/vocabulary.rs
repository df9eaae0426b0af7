//! Label and synonym vocabulary.
//!
//! Every keyword the extraction rules look for lives here as data. Spelling
//! and OCR variants (garbled vowel-sign order, dropped nasal marks, English
//! forms) are added by extending these lists, not by touching the rules.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Gender, RelationType};

/// How a relation keyword introduces the relation's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// A field label; the name runs to the next label or line end
    #[default]
    Label,
    /// An abbreviation such as `S/O`; the name is the following run of
    /// same-script words
    Abbreviation,
}

/// A relation keyword and the relation it denotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationKeyword {
    /// Keyword text as printed
    pub keyword: String,

    /// Relation class
    pub relation: RelationType,

    /// How the relation name follows the keyword
    #[serde(default)]
    pub style: LabelStyle,
}

impl RelationKeyword {
    /// A field-label style keyword.
    pub fn label(keyword: impl Into<String>, relation: RelationType) -> Self {
        Self {
            keyword: keyword.into(),
            relation,
            style: LabelStyle::Label,
        }
    }

    /// An abbreviation style keyword.
    pub fn abbreviation(keyword: impl Into<String>, relation: RelationType) -> Self {
        Self {
            keyword: keyword.into(),
            relation,
            style: LabelStyle::Abbreviation,
        }
    }

    /// Whether the keyword is a bare relation word (no "name" part).
    ///
    /// Bare words need an explicit separator to count as a label.
    pub fn is_bare(&self) -> bool {
        self.style == LabelStyle::Label
            && !self.keyword.contains("नाम")
            && !self.keyword.to_lowercase().contains("name")
    }
}

/// A gender synonym.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderTerm {
    /// Token as printed
    pub term: String,

    /// Gender it denotes
    pub gender: Gender,
}

impl GenderTerm {
    /// Create a synonym entry.
    pub fn new(term: impl Into<String>, gender: Gender) -> Self {
        Self {
            term: term.into(),
            gender,
        }
    }
}

/// All labels and synonyms used by the extraction rules.
///
/// When deserialized, absent lists are empty: a vocabulary file describes
/// additions, merged onto the built-in lists with [`Vocabulary::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Labels introducing the voter's own name
    #[serde(default)]
    pub name_labels: Vec<String>,

    /// Relation keywords, any order; precedence comes from the relation type
    #[serde(default)]
    pub relation_keywords: Vec<RelationKeyword>,

    /// Labels introducing the house number
    #[serde(default)]
    pub house_labels: Vec<String>,

    /// Labels introducing the age
    #[serde(default)]
    pub age_labels: Vec<String>,

    /// Labels introducing the gender
    #[serde(default)]
    pub gender_labels: Vec<String>,

    /// Embedded photo captions that trail field values
    #[serde(default)]
    pub photo_markers: Vec<String>,

    /// Gender synonyms
    #[serde(default)]
    pub gender_terms: Vec<GenderTerm>,

    /// Header keywords preceding the constituency
    #[serde(default)]
    pub constituency_keywords: Vec<String>,

    /// Header keywords preceding the polling booth
    #[serde(default)]
    pub booth_keywords: Vec<String>,
}

impl Vocabulary {
    /// Create the built-in vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty vocabulary, the starting point for fully custom lists.
    pub fn empty() -> Self {
        Self {
            name_labels: Vec::new(),
            relation_keywords: Vec::new(),
            house_labels: Vec::new(),
            age_labels: Vec::new(),
            gender_labels: Vec::new(),
            photo_markers: Vec::new(),
            gender_terms: Vec::new(),
            constituency_keywords: Vec::new(),
            booth_keywords: Vec::new(),
        }
    }

    /// Parse a vocabulary from JSON. Missing lists are empty.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("vocabulary: {}", e)))
    }

    /// Read a vocabulary JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Append another vocabulary's entries, skipping duplicates.
    pub fn merge(&mut self, other: Vocabulary) {
        extend_unique(&mut self.name_labels, other.name_labels);
        extend_unique(&mut self.relation_keywords, other.relation_keywords);
        extend_unique(&mut self.house_labels, other.house_labels);
        extend_unique(&mut self.age_labels, other.age_labels);
        extend_unique(&mut self.gender_labels, other.gender_labels);
        extend_unique(&mut self.photo_markers, other.photo_markers);
        extend_unique(&mut self.gender_terms, other.gender_terms);
        extend_unique(&mut self.constituency_keywords, other.constituency_keywords);
        extend_unique(&mut self.booth_keywords, other.booth_keywords);
    }

    /// Every label of every field, used as stop tokens when capturing values.
    pub fn all_field_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        labels.extend(self.name_labels.iter().cloned());
        labels.extend(self.relation_keywords.iter().map(|k| k.keyword.clone()));
        labels.extend(self.house_labels.iter().cloned());
        labels.extend(self.age_labels.iter().cloned());
        labels.extend(self.gender_labels.iter().cloned());
        labels.extend(self.photo_markers.iter().cloned());
        labels
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        use RelationType::*;

        Self {
            name_labels: strings(&[
                "निर्वाचक का नाम",
                "िनवार्चक का नाम",
                "निवार्चक का नाम",
                "निर्वाचक नाम",
                "मतदाता का नाम",
                "Voter's Name",
                "Voter Name",
                "Elector's Name",
                "Elector Name",
            ]),
            relation_keywords: vec![
                RelationKeyword::label("पिता का नाम", Father),
                RelationKeyword::label("पित का नाम", Father),
                RelationKeyword::label("िपता का नाम", Father),
                RelationKeyword::label("पिता", Father),
                RelationKeyword::label("पित", Father),
                RelationKeyword::label("Father's Name", Father),
                RelationKeyword::label("Father Name", Father),
                RelationKeyword::label("Father", Father),
                RelationKeyword::abbreviation("S/O", Father),
                RelationKeyword::abbreviation("D/O", Father),
                RelationKeyword::label("पति का नाम", Husband),
                RelationKeyword::label("पति", Husband),
                RelationKeyword::label("Husband's Name", Husband),
                RelationKeyword::label("Husband Name", Husband),
                RelationKeyword::label("Husband", Husband),
                RelationKeyword::abbreviation("W/O", Husband),
                RelationKeyword::label("पत्नी का नाम", Wife),
                RelationKeyword::label("पत्नी", Wife),
                RelationKeyword::label("Wife's Name", Wife),
                RelationKeyword::label("Wife Name", Wife),
                RelationKeyword::label("Wife", Wife),
                RelationKeyword::abbreviation("H/O", Wife),
                RelationKeyword::label("माता का नाम", Mother),
                RelationKeyword::label("माता", Mother),
                RelationKeyword::label("Mother's Name", Mother),
                RelationKeyword::label("Mother Name", Mother),
                RelationKeyword::label("Mother", Mother),
            ],
            house_labels: strings(&[
                "मकान संख्या",
                "मकान सख्या",
                "मकान संख",
                "मकान सखं",
                "मकान सं",
                "मकान नं",
                "गृह संख्या",
                "House Number",
                "House No",
                "H.No",
                "H No",
            ]),
            age_labels: strings(&["उम्र", "उमर", "आयु", "Age"]),
            gender_labels: strings(&["लिंग", "िलंग", "लिग", "लंग", "Gender", "Sex"]),
            photo_markers: strings(&["फोटो", "Photo"]),
            gender_terms: vec![
                GenderTerm::new("पुरुष", Gender::Male),
                GenderTerm::new("परुष", Gender::Male),
                GenderTerm::new("परुुष", Gender::Male),
                GenderTerm::new("पुरूष", Gender::Male),
                GenderTerm::new("पूरुष", Gender::Male),
                GenderTerm::new("पु", Gender::Male),
                GenderTerm::new("M", Gender::Male),
                GenderTerm::new("Male", Gender::Male),
                GenderTerm::new("महिला", Gender::Female),
                GenderTerm::new("मिहला", Gender::Female),
                GenderTerm::new("महीला", Gender::Female),
                GenderTerm::new("स्त्री", Gender::Female),
                GenderTerm::new("स्री", Gender::Female),
                GenderTerm::new("म", Gender::Female),
                GenderTerm::new("F", Gender::Female),
                GenderTerm::new("Female", Gender::Female),
            ],
            constituency_keywords: strings(&[
                "विधानसभा",
                "िवधानसभा",
                "विधान सभा",
                "निर्वाचन क्षेत्र",
                "Assembly Constituency",
                "Constituency",
            ]),
            booth_keywords: strings(&[
                "भाग संख्या",
                "भाग सं",
                "मतदान केंद्र",
                "मतदान केन्द्र",
                "मतदान केद्र",
                "मतदान स्थल",
                "Booth No",
                "Part No",
                "Polling Station",
            ]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn extend_unique<T: PartialEq>(target: &mut Vec<T>, items: Vec<T>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
