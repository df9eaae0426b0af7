//! Extraction options and configuration.

use super::{DialectKind, LookupTables, Vocabulary};

/// Options for extracting voter records.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Number of leading pages scanned for header metadata
    pub header_pages: usize,

    /// Maximum lines kept per voter block
    pub max_block_lines: usize,

    /// Accepted age range
    pub age_bounds: AgeBounds,

    /// How the extraction dialect is chosen
    pub dialect: DialectChoice,

    /// Whether to use parallel processing
    pub parallel: bool,

    /// Code-to-name lookup tables
    pub tables: LookupTables,

    /// Labels and synonyms
    pub vocabulary: Vocabulary,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many leading pages feed header resolution.
    pub fn with_header_pages(mut self, pages: usize) -> Self {
        self.header_pages = pages;
        self
    }

    /// Set the per-block line cap.
    pub fn with_max_block_lines(mut self, lines: usize) -> Self {
        self.max_block_lines = lines.max(1);
        self
    }

    /// Set the accepted age range.
    pub fn with_age_bounds(mut self, bounds: AgeBounds) -> Self {
        self.age_bounds = bounds;
        self
    }

    /// Set the dialect choice.
    pub fn with_dialect(mut self, dialect: DialectChoice) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Replace the lookup tables.
    pub fn with_tables(mut self, tables: LookupTables) -> Self {
        self.tables = tables;
        self
    }

    /// Replace the vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            header_pages: 3,
            max_block_lines: 20,
            age_bounds: AgeBounds::default(),
            dialect: DialectChoice::Auto,
            parallel: true,
            tables: LookupTables::default(),
            vocabulary: Vocabulary::default(),
        }
    }
}

/// Inclusive range of plausible voter ages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBounds {
    /// Youngest accepted age
    pub min: u16,
    /// Oldest accepted age
    pub max: u16,
}

impl AgeBounds {
    /// Create bounds; the ends are swapped if given in reverse.
    pub fn new(min: u16, max: u16) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Check whether an age falls inside the bounds.
    pub fn contains(&self, age: u16) -> bool {
        (self.min..=self.max).contains(&age)
    }
}

impl Default for AgeBounds {
    fn default() -> Self {
        Self { min: 18, max: 120 }
    }
}

/// How the extraction dialect is selected for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialectChoice {
    /// Probe the document's early pages for explicit field labels
    #[default]
    Auto,
    /// Always use the given dialect
    Fixed(DialectKind),
}
