//! Data model for electoral-roll extraction.
//!
//! Raw page text flows in as [`RawPage`]s grouped in a [`SourceDocument`];
//! fixed-shape [`VoterRecord`] rows flow out, grouped in an
//! [`ExtractedDocument`] together with the document's [`HeaderMetadata`].

mod document;
mod header;
mod page;
mod record;

pub use document::{ExtractedDocument, SourceDocument};
pub use header::{HeaderMetadata, NOT_FOUND, UNKNOWN};
pub use page::{RawPage, TextBlock};
pub use record::{Gender, RelationType, VoterRecord};
