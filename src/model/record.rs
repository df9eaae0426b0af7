//! Voter record types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the relation named on a voter entry relates to the voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RelationType {
    /// Father (also used for "S/O" and "D/O")
    Father,
    /// Husband (also used for "W/O")
    Husband,
    /// Wife (also used for "H/O")
    Wife,
    /// Mother
    Mother,
    /// No relation keyword was found
    #[default]
    Unknown,
}

impl RelationType {
    /// Get the display name of the relation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Father => "Father",
            RelationType::Husband => "Husband",
            RelationType::Wife => "Wife",
            RelationType::Mother => "Mother",
            RelationType::Unknown => "Unknown",
        }
    }

    /// Precedence when one keyword belongs to several classes (lower wins).
    pub fn precedence(&self) -> u8 {
        match self {
            RelationType::Father => 0,
            RelationType::Husband => 1,
            RelationType::Wife => 2,
            RelationType::Mother => 3,
            RelationType::Unknown => 4,
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized gender of a voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Missing or unrecognized token
    #[default]
    Unknown,
}

impl Gender {
    /// Get the display name of the gender.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }

    /// Check whether the gender was recognized.
    pub fn is_known(&self) -> bool {
        !matches!(self, Gender::Unknown)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row: a voter entry merged with its document's header.
///
/// Serializes with the fixed column names consumed by tabular exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    /// State name from the header, or `Unknown`
    #[serde(rename = "State Name")]
    pub state_name: String,

    /// Constituency as `number-name`, or `Not Found`
    #[serde(rename = "Constituency Name & Number")]
    pub constituency: String,

    /// Polling booth as `number-name`, or `Not Found`
    #[serde(rename = "Booth Name & Number")]
    pub booth: String,

    /// Serial number printed before the identifier
    #[serde(rename = "Serial Number")]
    pub serial_number: String,

    /// Voter's own name, empty when not found
    #[serde(rename = "Voter Name")]
    pub voter_name: String,

    /// Voter identity code with split pieces rejoined
    #[serde(rename = "Identifier Code")]
    pub identifier: String,

    /// Name of the related person, empty when not found
    #[serde(rename = "Relation Name")]
    pub relation_name: String,

    /// Relation to that person
    #[serde(rename = "Relation Type")]
    pub relation_type: RelationType,

    /// Reduced house number, or `Not Found`
    #[serde(rename = "House Number")]
    pub house_number: String,

    /// Age in ASCII digits, empty when not found
    #[serde(rename = "Age")]
    pub age: String,

    /// Normalized gender
    #[serde(rename = "Gender")]
    pub gender: Gender,
}

impl VoterRecord {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 11] = [
        "State Name",
        "Constituency Name & Number",
        "Booth Name & Number",
        "Serial Number",
        "Voter Name",
        "Identifier Code",
        "Relation Name",
        "Relation Type",
        "House Number",
        "Age",
        "Gender",
    ];

    /// Field values in [`VoterRecord::COLUMNS`] order.
    pub fn values(&self) -> [&str; 11] {
        [
            &self.state_name,
            &self.constituency,
            &self.booth,
            &self.serial_number,
            &self.voter_name,
            &self.identifier,
            &self.relation_name,
            self.relation_type.as_str(),
            &self.house_number,
            &self.age,
            self.gender.as_str(),
        ]
    }
}
