#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Date and time extraction from mixed English/Korean note text.
//!
//! ```text
//! "내일 오후 3시 팀 회의"  ->  [{ text: "내일 오후 3시", startDate: 2024-01-02T15:00:00, index: 0 }]
//! ```

pub mod english;
mod extractor;
pub mod korean;
pub mod merge;

pub use english::EnglishRecognizer;
pub use extractor::{DateExtractor, ExtractorConfig};
pub use korean::KoreanRecognizer;

use nalja_core::{ExtractedMatch, LocalInstant};
use once_cell::sync::Lazy;

static DEFAULT_EXTRACTOR: Lazy<DateExtractor> = Lazy::new(DateExtractor::default);

/// Every date reference in `text`, resolved against the current local time.
#[must_use]
pub fn extract_dates(text: &str) -> Vec<ExtractedMatch> {
    DEFAULT_EXTRACTOR.extract(text)
}

/// Every date reference in `text`, resolved against `reference`.
#[must_use]
pub fn extract_dates_at(text: &str, reference: LocalInstant) -> Vec<ExtractedMatch> {
    DEFAULT_EXTRACTOR.extract_at(text, reference)
}

/// Whether `text` mentions any date; agrees with [`extract_dates`].
#[must_use]
pub fn has_date_references(text: &str) -> bool {
    DEFAULT_EXTRACTOR.has_date_references(text)
}
