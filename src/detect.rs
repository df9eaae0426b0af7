//! Dialect detection.
//!
//! A quick probe over a document's first pages decides whether its entries
//! carry explicit field labels.

use crate::extract::{BlockSegmenter, DialectKind, Patterns};
use crate::model::RawPage;

/// Share of sampled blocks that must carry a name label for the labeled
/// dialect to be chosen.
const LABELED_SHARE: f64 = 0.5;

/// Outcome of probing a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectProbe {
    /// Chosen dialect
    pub kind: DialectKind,
    /// Blocks inspected
    pub sampled_blocks: usize,
    /// Inspected blocks holding a voter-name label
    pub labeled_blocks: usize,
}

impl std::fmt::Display for DialectProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}/{} blocks labeled)",
            self.kind, self.labeled_blocks, self.sampled_blocks
        )
    }
}

/// Probe the first `sample_pages` pages of a document.
///
/// # Arguments
/// * `pages` - Document pages in order
/// * `segmenter` - Segmenter used to cut the sampled pages into blocks
/// * `patterns` - Compiled labels
/// * `sample_pages` - How many leading pages to inspect
///
/// # Returns
/// [`DialectKind::Labeled`] when at least half of the sampled blocks carry a
/// voter-name label. Without any block, the presence of a name label
/// anywhere in the sampled text decides.
pub fn probe_dialect(
    pages: &[RawPage],
    segmenter: &BlockSegmenter,
    patterns: &Patterns,
    sample_pages: usize,
) -> DialectProbe {
    let sample = &pages[..sample_pages.max(1).min(pages.len())];

    let mut sampled_blocks = 0;
    let mut labeled_blocks = 0;
    for page in sample {
        for block in segmenter.segment(page) {
            sampled_blocks += 1;
            if block.lines.iter().any(|line| patterns.name.find(line).is_some()) {
                labeled_blocks += 1;
            }
        }
    }

    let labeled = if sampled_blocks == 0 {
        has_name_label(sample, patterns)
    } else {
        labeled_blocks as f64 / sampled_blocks as f64 >= LABELED_SHARE
    };

    DialectProbe {
        kind: if labeled {
            DialectKind::Labeled
        } else {
            DialectKind::Heuristic
        },
        sampled_blocks,
        labeled_blocks,
    }
}

/// Check whether any sampled line holds a voter-name label.
fn has_name_label(pages: &[RawPage], patterns: &Patterns) -> bool {
    pages
        .iter()
        .flat_map(|page| page.lines.iter())
        .any(|line| patterns.name.find(&crate::extract::normalize(line)).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Vocabulary;

    fn setup() -> (BlockSegmenter, Patterns) {
        (
            BlockSegmenter::new(20).unwrap(),
            Patterns::new(&Vocabulary::default()).unwrap(),
        )
    }

    fn page(text: &str) -> RawPage {
        RawPage::from_text(1, text)
    }

    #[test]
    fn test_probe_labeled() {
        let (seg, patterns) = setup();
        let pages = [page(
            "1 ABCD0000001\nनिर्वाचक का नाम : राम\n2 ABCD0000002\nनिर्वाचक का नाम : सीता",
        )];
        let probe = probe_dialect(&pages, &seg, &patterns, 3);
        assert_eq!(probe.kind, DialectKind::Labeled);
        assert_eq!(probe.sampled_blocks, 2);
        assert_eq!(probe.labeled_blocks, 2);
    }

    #[test]
    fn test_probe_heuristic() {
        let (seg, patterns) = setup();
        let pages = [page("1 ABCD0000001\nRam Kumar\nS/O Shyam\n2 ABCD0000002\nSita Devi")];
        let probe = probe_dialect(&pages, &seg, &patterns, 3);
        assert_eq!(probe.kind, DialectKind::Heuristic);
        assert_eq!(probe.labeled_blocks, 0);
    }

    #[test]
    fn test_probe_only_samples_leading_pages() {
        let (seg, patterns) = setup();
        let pages = [
            page("1 ABCD0000001\nRam Kumar"),
            page("2 ABCD0000002\nVoter Name: Sita"),
        ];
        assert_eq!(
            probe_dialect(&pages, &seg, &patterns, 1).kind,
            DialectKind::Heuristic
        );
        assert_eq!(
            probe_dialect(&pages, &seg, &patterns, 2).kind,
            DialectKind::Labeled
        );
    }

    #[test]
    fn test_probe_without_blocks() {
        let (seg, patterns) = setup();
        assert_eq!(
            probe_dialect(&[], &seg, &patterns, 3).kind,
            DialectKind::Heuristic
        );
        let pages = [page("Voter Name: Ram")];
        assert_eq!(
            probe_dialect(&pages, &seg, &patterns, 3).kind,
            DialectKind::Labeled
        );
    }
}
