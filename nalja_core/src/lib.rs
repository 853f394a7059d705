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

pub mod calendar;
mod error;
pub mod instant;
pub mod memo;
pub mod recognizer;
pub mod util;

pub use calendar::{EventDraft, EventRequest, MemoRef, strip_date_expressions};
pub use error::{Error, Result};
pub use instant::LocalInstant;
pub use memo::MemoDates;
pub use recognizer::{Candidate, Clock, FixedClock, Recognizer, Source, SystemClock};
pub use util::{CharOffsets, char_offset, content_hash};

use serde::{Deserialize, Serialize};

/// A date/time expression recognized in free text.
///
/// Serialized with the field names the note store persists
/// (`text`, `startDate`, `endDate`, `index`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedMatch {
    /// The substring that triggered the match.
    pub text: String,

    /// Resolved start, in local wall-clock fields.
    #[serde(rename = "startDate")]
    pub start: LocalInstant,

    /// Resolved end, only for explicit ranges.
    #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<LocalInstant>,

    /// Character offset of the first matched character.
    pub index: usize,
}

impl ExtractedMatch {
    #[must_use]
    pub fn new(text: impl Into<String>, start: LocalInstant, index: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end: None,
            index,
        }
    }

    #[must_use]
    pub const fn with_end(mut self, end: LocalInstant) -> Self {
        self.end = Some(end);
        self
    }
}
