//! The seam between individual recognizers and the merge step.
//!
//! A recognizer scans text for one family of expressions and returns
//! matches resolved against an explicit reference instant. Nothing here
//! reads the system clock except [`SystemClock`].

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{ExtractedMatch, LocalInstant};

/// Which recognizer produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Source {
    /// General English date grammar.
    English = 0,
    /// Korean rule set.
    Korean = 1,
}

/// A match tagged with the recognizer that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub source: Source,
    pub found: ExtractedMatch,
}

impl Candidate {
    #[must_use]
    pub const fn new(source: Source, found: ExtractedMatch) -> Self {
        Self { source, found }
    }

    /// Offset the merge step de-duplicates on.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.found.index
    }

    #[must_use]
    pub fn into_match(self) -> ExtractedMatch {
        self.found
    }
}

/// One family of date/time expressions.
pub trait Recognizer: Send + Sync {
    /// Which family this is; used to tag candidates.
    fn source(&self) -> Source;

    /// All matches in `text`, in scan order, resolved against `reference`.
    fn recognize(&self, text: &str, reference: LocalInstant) -> Vec<ExtractedMatch>;

    /// Whether `recognize` would return anything.
    fn detects(&self, text: &str, reference: LocalInstant) -> bool {
        !self.recognize(text, reference).is_empty()
    }

    /// `recognize`, with every match tagged by [`Recognizer::source`].
    fn candidates(&self, text: &str, reference: LocalInstant) -> Vec<Candidate> {
        let source = self.source();
        self.recognize(text, reference)
            .into_iter()
            .map(|found| Candidate::new(source, found))
            .collect()
    }
}

/// Source of the reference instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> LocalInstant;
}

/// The machine's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> LocalInstant {
        LocalInstant::from_zoned(&Local::now())
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub LocalInstant);

impl Clock for FixedClock {
    fn now(&self) -> LocalInstant {
        self.0
    }
}
