//! English recognizer: the general grammar plus a compact-time override.

pub mod grammar;

use chrono::Datelike;
use nalja_core::util::static_regex;
use nalja_core::{CharOffsets, ExtractedMatch, LocalInstant, Recognizer, Source};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use grammar::{ParsedComponents, ParsedResult, to_24h};

/// `pm3`, `am11`: a time written without a space or colon.
static COMPACT_TIME_RE: Lazy<Regex> = Lazy::new(|| static_regex(r"(?i)(am|pm)([0-9]{1,2})"));

/// Wraps the English grammar and rebuilds each result as a [`LocalInstant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishRecognizer;

impl EnglishRecognizer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn to_match(text: &str, result: &ParsedResult, index: usize) -> Option<ExtractedMatch> {
        let matched = result.text(text);
        let mut start = result.start;

        if let Some(hour) = compact_hour(matched).filter(|_| start.hour_implied) {
            debug!("Compact time in '{}' overrides implied hour with {}", matched, hour);
            start.hour = hour;
            start.minute = 0;
            start.hour_implied = false;
        }

        let mut found = ExtractedMatch::new(matched, local_instant(&start)?, index);
        if let Some(end) = result.end.as_ref().and_then(local_instant) {
            found = found.with_end(end);
        }
        Some(found)
    }
}

impl Recognizer for EnglishRecognizer {
    fn source(&self) -> Source {
        Source::English
    }

    fn recognize(&self, text: &str, reference: LocalInstant) -> Vec<ExtractedMatch> {
        let mut offsets = CharOffsets::new(text);
        grammar::parse(text, reference.naive())
            .iter()
            .filter_map(|result| Self::to_match(text, result, offsets.at(result.start_byte)))
            .collect()
    }
}

/// Hour named by the first `amN`/`pmN` token in `matched`, if N is 0..=12.
fn compact_hour(matched: &str) -> Option<u32> {
    let caps = COMPACT_TIME_RE.captures(matched)?;
    let n: u32 = caps[2].parse().ok()?;
    if n > 12 {
        return None;
    }
    let is_pm = caps[1].eq_ignore_ascii_case("pm");
    Some(to_24h(n, is_pm))
}

/// Rebuild from individual fields so the value is the same wall-clock time
/// the grammar produced, whatever the host timezone.
fn local_instant(c: &ParsedComponents) -> Option<LocalInstant> {
    LocalInstant::new(
        c.date.year(),
        c.date.month(),
        c.date.day(),
        c.hour,
        c.minute,
        c.second,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn reference() -> LocalInstant {
        LocalInstant::new(2024, 1, 1, 10, 0, 0).expect("valid instant")
    }

    #[test]
    fn test_compact_hour() {
        assert_eq!(compact_hour("pm3"), Some(15));
        assert_eq!(compact_hour("PM12"), Some(12));
        assert_eq!(compact_hour("am12"), Some(0));
        assert_eq!(compact_hour("am11"), Some(11));
        assert_eq!(compact_hour("pm13"), None);
        assert_eq!(compact_hour("tomorrow"), None);
    }

    #[test]
    fn test_compact_time_overrides_implied_noon() {
        let found = EnglishRecognizer.recognize("tomorrow pm3 meeting", reference());

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "tomorrow pm3");
        assert_eq!(found[0].start.to_local_iso(), "2024-01-02T15:00:00");
    }

    #[test]
    fn test_explicit_time_is_not_overridden() {
        let found = EnglishRecognizer.recognize("tomorrow at 4pm", reference());
        assert_eq!(found[0].start.to_local_iso(), "2024-01-02T16:00:00");
    }

    #[test]
    fn test_index_counts_characters() {
        let found = EnglishRecognizer.recognize("회의 tomorrow", reference());
        assert_eq!(found[0].index, 3);
        assert_eq!(found[0].start.to_local_iso(), "2024-01-02T12:00:00");
    }

    #[test]
    fn test_range_carries_end() {
        let found = EnglishRecognizer.recognize("Nov 5 - Nov 7", reference());
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].end.map(|e| e.to_local_iso()).as_deref(),
            Some("2024-11-07T12:00:00")
        );
    }
}
