//! Field extraction rules.
//!
//! A rule looks at one block's text and either yields a candidate or
//! nothing. Dialects chain rules per field; the first candidate wins.

use super::normalize::{digit_runs, is_digit_char, to_ascii_digits};
use super::options::AgeBounds;
use super::patterns::{is_letter_like, LabelMatch, Patterns};
use super::vocabulary::LabelStyle;
use crate::model::{Gender, RelationType};

/// Most words taken for a name found without a label.
const MAX_NAME_WORDS: usize = 4;

/// A field rule: inspect the block, maybe yield a value.
pub type FieldRule<T> = fn(&RuleContext<'_>) -> Option<T>;

/// Everything a rule may look at for one block.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Normalized block text without serial and identifier, one entry
    /// line per text line
    pub text: &'a str,

    /// Compiled labels and synonym tables
    pub patterns: &'a Patterns,

    /// Accepted age range
    pub age_bounds: AgeBounds,
}

impl<'a> RuleContext<'a> {
    /// Create a context for one block's text.
    pub fn new(text: &'a str, patterns: &'a Patterns, age_bounds: AgeBounds) -> Self {
        Self {
            text,
            patterns,
            age_bounds,
        }
    }

    /// Capture the value following a label.
    ///
    /// When the label ends its line the value is taken from the next line.
    fn value_after(&self, label: LabelMatch) -> &'a str {
        let value = self.patterns.capture_value(self.text, label.value_start);
        if !value.is_empty() {
            return value;
        }
        let rest = &self.text[label.value_start..];
        match rest.find('\n') {
            Some(nl) if rest[..nl].trim().is_empty() => {
                self.patterns.capture_value(self.text, label.value_start + nl + 1)
            }
            _ => value,
        }
    }
}

/// A relation keyword and the name it introduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Relation class of the keyword
    pub relation_type: RelationType,
    /// Relation's name, possibly empty
    pub name: String,
}

/// Age and gender, found together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeGender {
    /// Age in ASCII digits
    pub age: Option<String>,
    /// Normalized gender
    pub gender: Gender,
}

/// Writing system of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Devanagari,
}

impl Script {
    fn of(word: &str) -> Option<Script> {
        if word.is_empty() {
            None
        } else if word.chars().all(|c| c.is_ascii_alphabetic() || c == '.') {
            Some(Script::Latin)
        } else if word.chars().all(is_devanagari_letter) {
            Some(Script::Devanagari)
        } else {
            None
        }
    }
}

fn is_devanagari_letter(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c) && is_letter_like(c)
}

fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_ascii_punctuation() || matches!(c, '।' | '：' | '–'))
}

fn is_capitalized_latin(word: &str) -> bool {
    let mut chars = word.chars();
    word.len() >= 2
        && chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphabetic())
}

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

/// Name after an explicit voter-name label.
pub fn labeled_name(ctx: &RuleContext<'_>) -> Option<String> {
    let label = ctx.patterns.name.find(ctx.text)?;
    let value = ctx.value_after(label);
    (!value.is_empty()).then(|| value.to_string())
}

/// Words that could be a name: the unlabeled head of each line, cleaned,
/// with label words and gender terms removed.
fn name_candidates<'a>(ctx: &RuleContext<'a>) -> Vec<Vec<&'a str>> {
    ctx.text
        .lines()
        .map(|line| {
            let head = ctx.patterns.stop.find(line).map_or(line, |m| &line[..m.start]);
            head.split_whitespace()
                .map(clean_token)
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
        })
        .collect()
}

fn first_pair<'a>(lines: &[Vec<&'a str>], accept: impl Fn(&str) -> bool) -> Option<String> {
    for words in lines {
        for pair in words.windows(2) {
            if accept(pair[0]) && accept(pair[1]) {
                return Some(format!("{} {}", pair[0], pair[1]));
            }
        }
    }
    None
}

/// Two consecutive capitalized Latin words, when the block has at least
/// two such words.
pub fn latin_name_pair(ctx: &RuleContext<'_>) -> Option<String> {
    let lines = name_candidates(ctx);
    let accept = |w: &str| is_capitalized_latin(w) && !ctx.patterns.is_stopword(w);
    let count = lines.iter().flatten().filter(|w| accept(w)).count();
    if count < 2 {
        return None;
    }
    first_pair(&lines, accept)
}

/// Two consecutive Devanagari words.
pub fn devanagari_name_pair(ctx: &RuleContext<'_>) -> Option<String> {
    let lines = name_candidates(ctx);
    first_pair(&lines, |w| {
        Script::of(w) == Some(Script::Devanagari)
            && !ctx.patterns.is_stopword(w)
            && !ctx.patterns.genders.is_spelled_term(w)
    })
}

// ---------------------------------------------------------------------------
// Relation
// ---------------------------------------------------------------------------

/// The highest-precedence relation keyword in the block and the name after
/// it.
///
/// Father keywords beat husband, then wife, then mother; among equals the
/// earliest occurrence wins. Bare relation words (`पिता`, `Father`) only
/// count when a separator follows them.
pub fn labeled_relation(ctx: &RuleContext<'_>) -> Option<Relation> {
    let patterns = ctx.patterns;
    let (found, keyword) = patterns
        .relation
        .find_iter(ctx.text)
        .filter_map(|m| {
            let keyword = patterns.relation_keywords.get(m.index)?;
            (m.separated || !keyword.is_bare()).then_some((m, keyword))
        })
        .min_by_key(|(m, keyword)| (keyword.relation.precedence(), m.start))?;

    let name = match keyword.style {
        LabelStyle::Label => ctx.value_after(found).to_string(),
        LabelStyle::Abbreviation => script_run(ctx, found.value_start),
    };
    Some(Relation {
        relation_type: keyword.relation,
        name,
    })
}

/// Consecutive same-script words starting at `from`, up to a label word.
fn script_run(ctx: &RuleContext<'_>, from: usize) -> String {
    let rest = &ctx.text[from..];
    let line = rest.lines().next().unwrap_or("");

    let mut words = Vec::new();
    let mut script = None;
    for token in line.split_whitespace() {
        let word = clean_token(token);
        if word.is_empty() || ctx.patterns.is_stopword(word) {
            break;
        }
        let Some(current) = Script::of(word) else {
            break;
        };
        if script.is_some_and(|s| s != current) {
            break;
        }
        script = Some(current);
        words.push(word);
        if words.len() == MAX_NAME_WORDS {
            break;
        }
    }
    words.join(" ")
}

// ---------------------------------------------------------------------------
// House number
// ---------------------------------------------------------------------------

/// Raw text after a house-number label, cut at the next label or photo
/// caption.
pub fn labeled_house(ctx: &RuleContext<'_>) -> Option<String> {
    let label = ctx.patterns.house.find(ctx.text)?;
    let value = ctx.value_after(label);
    let value = match ctx.patterns.photo.find(value) {
        Some(photo) => value[..photo.start].trim(),
        None => value,
    };
    (!value.is_empty()).then(|| value.to_string())
}

// ---------------------------------------------------------------------------
// Age and gender
// ---------------------------------------------------------------------------

/// First 1-3 digit number in `text` that falls inside the bounds.
///
/// Implausible numbers are skipped, not accepted.
fn plausible_age(text: &str, bounds: AgeBounds) -> Option<String> {
    digit_runs(text)
        .into_iter()
        .filter(|run| run.chars().count() <= 3)
        .filter_map(|run| to_ascii_digits(run).parse::<u16>().ok())
        .find(|age| bounds.contains(*age))
        .map(|age| age.to_string())
}

fn line_end(text: &str, from: usize) -> usize {
    text[from..].find('\n').map_or(text.len(), |i| from + i)
}

/// Age after an age label, gender after the gender label that follows it.
///
/// The age is looked for between the age label and the gender label (or
/// the end of the line). When no plausible age follows one age label the
/// next one is tried.
pub fn labeled_age_gender(ctx: &RuleContext<'_>) -> Option<AgeGender> {
    let patterns = ctx.patterns;
    let gender_at = |label: LabelMatch| patterns.genders.normalize(ctx.value_after(label));

    for age_label in patterns.age.find_iter(ctx.text) {
        let gender_label = patterns.gender.find_at(ctx.text, age_label.value_start);
        let eol = line_end(ctx.text, age_label.value_start);
        let end = gender_label
            .filter(|g| g.start < eol)
            .map_or(eol, |g| g.start);

        if let Some(age) = plausible_age(&ctx.text[age_label.value_start..end], ctx.age_bounds) {
            let gender = gender_label
                .or_else(|| patterns.gender.find(ctx.text))
                .map_or(Gender::Unknown, gender_at);
            return Some(AgeGender {
                age: Some(age),
                gender,
            });
        }
    }

    let gender_label = patterns.gender.find(ctx.text)?;
    Some(AgeGender {
        age: None,
        gender: gender_at(gender_label),
    })
}

/// Unlabeled age and gender: a spelled-out gender term and a standalone
/// 2-3 digit number, preferring a number on the gender term's line.
pub fn loose_age_gender(ctx: &RuleContext<'_>) -> Option<AgeGender> {
    let genders = &ctx.patterns.genders;
    let standalone_age = |line: &str| {
        line.split_whitespace()
            .map(clean_token)
            .filter(|t| (2..=3).contains(&t.chars().count()) && t.chars().all(is_digit_char))
            .find_map(|t| plausible_age(t, ctx.age_bounds))
    };

    let mut gender = Gender::Unknown;
    let mut age = None;
    for line in ctx.text.lines() {
        let term = line
            .split_whitespace()
            .map(clean_token)
            .find(|t| genders.is_spelled_term(t));
        if let Some(term) = term {
            gender = genders.normalize(term);
            age = standalone_age(line);
            break;
        }
    }
    if age.is_none() {
        age = ctx.text.lines().find_map(standalone_age);
    }

    if age.is_none() && !gender.is_known() {
        return None;
    }
    Some(AgeGender { age, gender })
}
