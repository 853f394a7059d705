//! Integration tests for date extraction from note text
//!
//! Every scenario uses a fixed reference instant so results do not depend on
//! when the suite runs:
//! 1. Korean relative and absolute dates
//! 2. English dates and the compact time override
//! 3. Merging the two recognizers
//! 4. Existence check agreeing with extraction
//! 5. Persisted note records and event drafts
//! 6. Long notes near the input limit

#![expect(clippy::expect_used, reason = "Test failure should panic with context")]

use nalja_core::{
    EventDraft, FixedClock, LocalInstant, MemoDates, MemoRef, Recognizer, strip_date_expressions,
};
use nalja_extract::{
    DateExtractor, EnglishRecognizer, ExtractorConfig, KoreanRecognizer, extract_dates_at,
};

fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> LocalInstant {
    LocalInstant::new(y, m, d, h, mi, 0).expect("valid test instant")
}

fn starts(text: &str, reference: LocalInstant) -> Vec<String> {
    extract_dates_at(text, reference)
        .into_iter()
        .map(|m| m.start.to_local_iso())
        .collect()
}

/// Scenario 1: Korean dates
///
/// Day words default to 09:00, the first 오전/오후 phrase overrides the time
/// for every rule, and month/day dates roll into next year once past.
#[test]
fn test_scenario_1_korean_dates() {
    let monday = at(2024, 1, 1, 10, 0);

    assert_eq!(starts("내일", monday), vec!["2024-01-02T09:00:00"]);

    let found = extract_dates_at("내일 오후 3시", monday);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].start.to_local_iso(), "2024-01-02T15:00:00");
    assert!(found[0].text.contains("오후 3시"));

    assert_eq!(
        starts("모레 오전 11시 30분", at(2024, 6, 1, 10, 0)),
        vec!["2024-06-03T11:30:00"]
    );
    assert_eq!(
        starts("3일 후", at(2024, 6, 1, 0, 0)),
        vec!["2024-06-04T09:00:00"]
    );
    assert_eq!(starts("다음 주 월요일", monday), vec!["2024-01-08T09:00:00"]);

    assert_eq!(
        starts("11월 5일", at(2024, 11, 6, 10, 0)),
        vec!["2025-11-05T09:00:00"]
    );
    assert_eq!(
        starts("11월 5일", at(2024, 11, 4, 10, 0)),
        vec!["2024-11-05T09:00:00"]
    );

    assert_eq!(starts("11-5", monday), vec!["2024-11-05T09:00:00"]);

    let found = extract_dates_at("１1/5", monday);
    assert_eq!(found.len(), 1);
    assert_eq!((found[0].text.as_str(), found[0].index), ("1/5", 1));
    assert_eq!(found[0].start.to_local_iso(), "2024-01-05T09:00:00");
}

/// Scenario 2: English dates
///
/// Dates without a time imply noon; a trailing `pm3` replaces the implied
/// hour but never an explicit one.
#[test]
fn test_scenario_2_english_dates() {
    let reference = at(2024, 1, 1, 10, 0);

    assert_eq!(starts("tomorrow", reference), vec!["2024-01-02T12:00:00"]);
    assert_eq!(
        starts("dinner tomorrow at 7:30pm", reference),
        vec!["2024-01-02T19:30:00"]
    );
    assert_eq!(
        starts("meeting tomorrow pm3", reference),
        vec!["2024-01-02T15:00:00"]
    );

    let found = extract_dates_at("conference Mar 4 - Mar 6", reference);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].text, "Mar 4 - Mar 6");
    assert_eq!(
        found[0].end.map(|e| e.to_local_iso()).as_deref(),
        Some("2024-03-06T12:00:00")
    );

    // Friday 15:00: nothing resolves before the reference.
    let friday = at(2024, 1, 5, 15, 0);
    assert_eq!(
        starts("report due friday", friday),
        vec!["2024-01-12T12:00:00"]
    );
    assert_eq!(starts("on friday", friday), vec!["2024-01-12T12:00:00"]);
    assert_eq!(starts("finish today", friday), vec!["2024-01-05T15:00:00"]);
    assert_eq!(starts("call at 9am", friday), vec!["2024-01-06T09:00:00"]);
    for text in ["report due friday", "finish today", "call at 9am", "tonight"] {
        for found in extract_dates_at(text, friday) {
            assert!(found.start >= friday, "{text:?} resolved to {}", found.start);
        }
    }
}

/// Scenario 3: Merge
///
/// When both recognizers match at the same offset only the English match is
/// kept; English results come first, then the remaining Korean ones.
#[test]
fn test_scenario_3_merge() {
    let reference = at(2024, 1, 1, 10, 0);

    let english = EnglishRecognizer::new().recognize("11/5", reference);
    let korean = KoreanRecognizer::new().recognize("11/5", reference);
    assert_eq!(english[0].index, korean[0].index);

    let merged = extract_dates_at("11/5", reference);
    assert_eq!(merged, english);

    let merged = extract_dates_at("내일 회의, report due friday", reference);
    let texts: Vec<&str> = merged.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["friday", "내일"]);

    // Offsets, not spans, decide collisions: the Korean date inside the
    // English range starts elsewhere and is kept.
    let merged = extract_dates_at("from Nov 5 to 11/7", reference);
    let found: Vec<(&str, usize, String)> = merged
        .iter()
        .map(|m| (m.text.as_str(), m.index, m.start.to_local_iso()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("from Nov 5 to 11/7", 0, "2024-11-05T12:00:00".to_string()),
            ("11/7", 14, "2024-11-07T09:00:00".to_string()),
        ]
    );
}

/// Scenario 4: Existence check
///
/// `has_date_references` is true exactly when extraction finds something.
#[test]
fn test_scenario_4_existence_matches_extraction() {
    let extractor = DateExtractor::with_clock(
        ExtractorConfig::default(),
        FixedClock(at(2024, 1, 1, 10, 0)),
    )
    .expect("default config is valid");

    for text in [
        "",
        "장보기 목록",
        "buy milk",
        "내일",
        "다음주 수요일 오후 2시",
        "next tuesday",
        "12/25 크리스마스",
        "13/45",
        "2월 30일",
    ] {
        assert_eq!(
            extractor.has_date_references(text),
            !extractor.extract(text).is_empty(),
            "disagreement on {text:?}"
        );
    }

    assert!(!extractor.has_date_references("장보기 목록"));
    assert!(extractor.extract("buy milk").is_empty());
}

/// Scenario 5: Note record and event draft
///
/// A note's extracted dates survive a JSON round trip unchanged, and the
/// event built from a match keeps its wall-clock time.
#[test]
fn test_scenario_5_memo_and_event() {
    let extractor = DateExtractor::with_clock(
        ExtractorConfig::default(),
        FixedClock(at(2024, 1, 1, 10, 0)),
    )
    .expect("default config is valid");

    let content = "내일 오후 3시 팀 회의";
    let record = extractor.annotate_memo(content).expect("content is present");
    let json = serde_json::to_string(&record).expect("record should serialize");
    assert!(json.contains("\"startDate\":\"2024-01-02T15:00:00\""));

    let back: MemoDates = serde_json::from_str(&json).expect("record should deserialize");
    assert_eq!(back, record);
    assert!(!back.is_stale(content));

    let event = EventDraft::from_match(
        &back.matches()[0],
        "cal-1",
        MemoRef {
            id: Some("memo-1"),
            title: None,
            content,
        },
    )
    .expect("event should build");
    assert_eq!(event.title, strip_date_expressions(content));
    assert_eq!(event.start.to_local_iso(), "2024-01-02T15:00:00");
    assert_eq!(event.start.format_compact(), "1.2 15:00");
}

/// Scenario 6: Long notes
///
/// A note just under the default 64 KiB limit is scanned in full, and the
/// existence check enforces the same limit as extraction.
#[test]
fn test_scenario_6_long_notes() {
    let extractor = DateExtractor::with_clock(
        ExtractorConfig::default(),
        FixedClock(at(2024, 1, 1, 10, 0)),
    )
    .expect("default config is valid");

    let text = "tomorrow 3pm, ".repeat(4000);
    let found = extractor.extract_checked(&text).expect("under the limit");
    assert_eq!(found.len(), 4000);
    assert_eq!(found[3999].index, 14 * 3999);
    assert!(
        found
            .iter()
            .all(|m| m.start.to_local_iso() == "2024-01-02T15:00:00")
    );
    assert_eq!(extractor.has_date_references_checked(&text).ok(), Some(true));

    let too_long = "내일 ".repeat(20_000);
    assert!(extractor.extract_checked(&too_long).is_err());
    assert!(extractor.has_date_references_checked(&too_long).is_err());
}
