//! Turning a recognized date into a calendar event.
//!
//! Event timestamps travel as local ISO strings (`YYYY-MM-DDTHH:mm:ss`) and
//! are rebuilt field by field with [`LocalInstant::parse_local_iso`], never
//! through an offset-aware parser.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::util::static_regex;
use crate::{ExtractedMatch, LocalInstant};

/// How many characters of note content stand in for a missing title.
const TITLE_FALLBACK_CHARS: usize = 50;

static DATE_EXPRESSIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"오늘\s*",
        r"내일\s*",
        r"모레\s*",
        r"[0-9]+일\s*후\s*",
        r"다음\s*주\s*[월화수목금토일]요일\s*",
        r"[0-9]{1,2}월\s*[0-9]{1,2}일\s*",
        r"[0-9]{1,2}[./\-][0-9]{1,2}\s*",
    ]
    .into_iter()
    .map(static_regex)
    .collect()
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| static_regex(r"\s+"));

/// Remove Korean date expressions from a title or description.
///
/// Time-of-day phrases (오전/오후 N시) are kept, since the event carries the
/// date but a reader still wants the time in the text.
#[must_use]
pub fn strip_date_expressions(text: &str) -> String {
    let mut cleaned = text.to_string();
    for re in DATE_EXPRESSIONS.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    WHITESPACE_RUN.replace_all(&cleaned, " ").trim().to_string()
}

/// The note a match was extracted from.
#[derive(Debug, Clone, Copy)]
pub struct MemoRef<'a> {
    pub id: Option<&'a str>,
    pub title: Option<&'a str>,
    pub content: &'a str,
}

/// Event creation request as it arrives from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub calendar_id: String,
    #[serde(default)]
    pub memo_id: Option<String>,
}

/// A validated event, ready to hand to the calendar store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "startDate")]
    pub start: LocalInstant,
    #[serde(rename = "endDate")]
    pub end: Option<LocalInstant>,
    pub all_day: bool,
    pub calendar_id: String,
    pub memo_id: Option<String>,
}

impl EventDraft {
    /// Validate a client request and rebuild its timestamps locally.
    pub fn from_request(request: &EventRequest) -> Result<Self> {
        if request.title.trim().is_empty()
            || request.start_date.trim().is_empty()
            || request.calendar_id.trim().is_empty()
        {
            return Err(Error::InvalidEvent("missing required fields".to_string()));
        }

        let start = LocalInstant::parse_local_iso(&request.start_date)?;
        let end = request
            .end_date
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(LocalInstant::parse_local_iso)
            .transpose()?;

        Ok(Self {
            id: Uuid::now_v7(),
            title: request.title.clone(),
            description: request.description.clone(),
            start,
            end,
            all_day: request.all_day,
            calendar_id: request.calendar_id.clone(),
            memo_id: request.memo_id.clone(),
        })
    }

    /// Build the request a note's "add to calendar" action sends, then
    /// validate it.
    ///
    /// The title is the note title (or the start of its content) with date
    /// expressions removed; when nothing is left the original is used.
    pub fn from_match(found: &ExtractedMatch, calendar_id: &str, memo: MemoRef<'_>) -> Result<Self> {
        let original_title = memo
            .title
            .filter(|t| !t.is_empty())
            .map_or_else(
                || memo.content.chars().take(TITLE_FALLBACK_CHARS).collect(),
                str::to_string,
            );
        let title = non_empty_or(strip_date_expressions(&original_title), &original_title);
        let description = non_empty_or(strip_date_expressions(memo.content), memo.content);

        debug!(
            "Building event '{}' at {} from match '{}'",
            title, found.start, found.text
        );

        Self::from_request(&EventRequest {
            title,
            description: Some(description),
            start_date: found.start.to_local_iso(),
            end_date: found.end.map(|e| e.to_local_iso()),
            all_day: false,
            calendar_id: calendar_id.to_string(),
            memo_id: memo.id.map(str::to_string),
        })
    }
}

fn non_empty_or(cleaned: String, original: &str) -> String {
    if cleaned.is_empty() {
        original.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_keeps_time_of_day() {
        assert_eq!(strip_date_expressions("내일 오후 3시 팀 회의"), "오후 3시 팀 회의");
        assert_eq!(strip_date_expressions("11월 5일 병원"), "병원");
        assert_eq!(strip_date_expressions("다음 주 금요일  발표 준비"), "발표 준비");
        assert_eq!(strip_date_expressions("3일 후 마감, 11/20 제출"), "마감, 제출");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_from_match_uses_cleaned_title() {
        let start = LocalInstant::new(2024, 1, 2, 15, 0, 0).expect("valid instant");
        let found = ExtractedMatch::new("내일 오후 3시", start, 0);
        let memo = MemoRef {
            id: Some("memo-1"),
            title: Some("내일 팀 회의"),
            content: "내일 오후 3시 팀 회의",
        };

        let event = EventDraft::from_match(&found, "cal-1", memo).expect("event should build");
        assert_eq!(event.title, "팀 회의");
        assert_eq!(event.description.as_deref(), Some("오후 3시 팀 회의"));
        assert_eq!(event.start, start);
        assert_eq!(event.end, None);
        assert_eq!(event.calendar_id, "cal-1");
        assert_eq!(event.memo_id.as_deref(), Some("memo-1"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_from_match_falls_back_to_original_title() {
        let start = LocalInstant::new(2024, 1, 3, 9, 0, 0).expect("valid instant");
        let found = ExtractedMatch::new("모레", start, 0);
        let memo = MemoRef {
            id: None,
            title: None,
            content: "모레",
        };

        let event = EventDraft::from_match(&found, "cal-1", memo).expect("event should build");
        assert_eq!(event.title, "모레");
        assert_eq!(event.description.as_deref(), Some("모레"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_request_timestamps_are_not_shifted() {
        let request = EventRequest {
            title: "Standup".to_string(),
            description: None,
            start_date: "2024-01-02T09:00:00.000Z".to_string(),
            end_date: Some("2024-01-02T09:30:00".to_string()),
            all_day: false,
            calendar_id: "cal-1".to_string(),
            memo_id: None,
        };

        let event = EventDraft::from_request(&request).expect("event should build");
        assert_eq!(event.start.to_local_iso(), "2024-01-02T09:00:00");
        assert_eq!(
            event.end.map(|e| e.to_local_iso()).as_deref(),
            Some("2024-01-02T09:30:00")
        );
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let request = EventRequest {
            title: "Standup".to_string(),
            description: None,
            start_date: "2024-01-02T09:00:00".to_string(),
            end_date: None,
            all_day: false,
            calendar_id: String::new(),
            memo_id: None,
        };
        assert!(matches!(
            EventDraft::from_request(&request),
            Err(Error::InvalidEvent(_))
        ));
    }
}
