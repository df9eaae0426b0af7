//! Extraction dialects.
//!
//! Rolls come in two labeling styles. Some print an explicit label before
//! every field; others print bare values, sometimes with English
//! abbreviations. A [`Dialect`] decides which rule chain runs for each field,
//! so both styles share one engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rules::{self, AgeGender, FieldRule, Relation, RuleContext};
use crate::error::{Error, Result};

/// Names the available dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectKind {
    /// Every field carries an explicit label
    Labeled,
    /// Labels are sparse; fall back to scanning words and numbers
    Heuristic,
}

impl DialectKind {
    /// All dialects.
    pub const ALL: [DialectKind; 2] = [DialectKind::Labeled, DialectKind::Heuristic];

    /// Get the dialect name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialectKind::Labeled => "labeled",
            DialectKind::Heuristic => "heuristic",
        }
    }

    /// Get the rule chains for this dialect.
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            DialectKind::Labeled => &LabeledDialect,
            DialectKind::Heuristic => &HeuristicDialect,
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "labeled" | "labelled" => Ok(DialectKind::Labeled),
            "heuristic" => Ok(DialectKind::Heuristic),
            other => Err(Error::Config(format!("unknown dialect: {}", other))),
        }
    }
}

/// A strategy for extracting fields from one block.
///
/// Each method lists the rules tried for a field, in order.
pub trait Dialect: Send + Sync {
    /// Which dialect this is.
    fn kind(&self) -> DialectKind;

    /// Rules for the voter's name.
    fn name_rules(&self) -> &'static [FieldRule<String>];

    /// Rules for relation type and name.
    fn relation_rules(&self) -> &'static [FieldRule<Relation>];

    /// Rules for the raw house number.
    fn house_rules(&self) -> &'static [FieldRule<String>];

    /// Rules for age and gender.
    fn age_gender_rules(&self) -> &'static [FieldRule<AgeGender>];

    /// Run the name chain.
    fn name(&self, ctx: &RuleContext<'_>) -> Option<String> {
        first_match(self.name_rules(), ctx)
    }

    /// Run the relation chain.
    fn relation(&self, ctx: &RuleContext<'_>) -> Option<Relation> {
        first_match(self.relation_rules(), ctx)
    }

    /// Run the house number chain.
    fn house(&self, ctx: &RuleContext<'_>) -> Option<String> {
        first_match(self.house_rules(), ctx)
    }

    /// Run the age and gender chain.
    fn age_gender(&self, ctx: &RuleContext<'_>) -> Option<AgeGender> {
        first_match(self.age_gender_rules(), ctx)
    }
}

/// The first candidate any rule yields.
pub fn first_match<T>(rules: &[FieldRule<T>], ctx: &RuleContext<'_>) -> Option<T> {
    rules.iter().find_map(|rule| rule(ctx))
}

/// Strict label-driven extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledDialect;

/// Label rules first, then word and number scanning.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicDialect;

const LABELED_NAME: &[FieldRule<String>] = &[rules::labeled_name];
const HEURISTIC_NAME: &[FieldRule<String>] = &[
    rules::labeled_name,
    rules::latin_name_pair,
    rules::devanagari_name_pair,
];
const RELATION: &[FieldRule<Relation>] = &[rules::labeled_relation];
const HOUSE: &[FieldRule<String>] = &[rules::labeled_house];
const LABELED_AGE_GENDER: &[FieldRule<AgeGender>] = &[rules::labeled_age_gender];
const HEURISTIC_AGE_GENDER: &[FieldRule<AgeGender>] =
    &[rules::labeled_age_gender, rules::loose_age_gender];

impl Dialect for LabeledDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Labeled
    }

    fn name_rules(&self) -> &'static [FieldRule<String>] {
        LABELED_NAME
    }

    fn relation_rules(&self) -> &'static [FieldRule<Relation>] {
        RELATION
    }

    fn house_rules(&self) -> &'static [FieldRule<String>] {
        HOUSE
    }

    fn age_gender_rules(&self) -> &'static [FieldRule<AgeGender>] {
        LABELED_AGE_GENDER
    }
}

impl Dialect for HeuristicDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Heuristic
    }

    fn name_rules(&self) -> &'static [FieldRule<String>] {
        HEURISTIC_NAME
    }

    fn relation_rules(&self) -> &'static [FieldRule<Relation>] {
        RELATION
    }

    fn house_rules(&self) -> &'static [FieldRule<String>] {
        HOUSE
    }

    fn age_gender_rules(&self) -> &'static [FieldRule<AgeGender>] {
        HEURISTIC_AGE_GENDER
    }
}
