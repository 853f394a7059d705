//! Korean date rules.
//!
//! The text's first 오전/오후 phrase sets the time for every date found; with
//! no phrase the recognizer's default time (09:00 unless configured) is used.
//! Rules run in a fixed order and their matches are appended in that order:
//! day words, N일 후, 다음 주 요일, M월 D일, then numeric M.D.

pub mod rules;
pub mod time_of_day;

use chrono::{Datelike, Days};
use nalja_core::util::static_regex;
use nalja_core::{CharOffsets, ExtractedMatch, LocalInstant, Recognizer, Source, char_offset};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use rules::{days_until_next_week, month_day_forward, plausible_month_day, weekday_from_syllable};
use time_of_day::{TimePhrase, first_time_phrase};

/// Day words and their offset from today. Each yields at most one match.
const DAY_WORDS: [(&str, u64); 3] = [("오늘", 0), ("내일", 1), ("모레", 2)];

static DAYS_LATER_RE: Lazy<Regex> = Lazy::new(|| static_regex(r"([0-9]+)일?\s?후"));
static NEXT_WEEK_RE: Lazy<Regex> =
    Lazy::new(|| static_regex(r"다음\s?주\s?(월|화|수|목|금|토|일)요일"));
static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| static_regex(r"([0-9]{1,2})월\s?([0-9]{1,2})일"));
static NUMERIC_DATE_RE: Lazy<Regex> = Lazy::new(|| static_regex(r"([0-9]{1,2})[./-]([0-9]{1,2})"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KoreanRecognizer {
    default_hour: u32,
    default_minute: u32,
}

impl Default for KoreanRecognizer {
    fn default() -> Self {
        Self {
            default_hour: 9,
            default_minute: 0,
        }
    }
}

impl KoreanRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different time for dates written without 오전/오후.
    ///
    /// `None` if the time is not a valid hour and minute.
    #[must_use]
    pub const fn with_default_time(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            default_hour: hour,
            default_minute: minute,
        })
    }

    fn day_words(
        text: &str,
        reference: LocalInstant,
        phrase: Option<TimePhrase<'_>>,
        (hour, minute): (u32, u32),
        out: &mut Vec<ExtractedMatch>,
    ) {
        for (word, offset) in DAY_WORDS {
            let Some(byte_idx) = text.find(word) else {
                continue;
            };
            let Some(start) = reference
                .date()
                .checked_add_days(Days::new(offset))
                .and_then(|date| LocalInstant::at(date, hour, minute))
            else {
                continue;
            };
            let matched = phrase.map_or_else(|| word.to_string(), |p| format!("{word} {}", p.text));
            out.push(ExtractedMatch::new(matched, start, char_offset(text, byte_idx)));
        }
    }

    fn days_later(
        text: &str,
        reference: LocalInstant,
        (hour, minute): (u32, u32),
        out: &mut Vec<ExtractedMatch>,
    ) {
        let mut offsets = CharOffsets::new(text);
        for caps in DAYS_LATER_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let start = caps[1]
                .parse::<u64>()
                .ok()
                .and_then(|n| reference.date().checked_add_days(Days::new(n)))
                .and_then(|date| LocalInstant::at(date, hour, minute));
            match start {
                Some(start) => out.push(ExtractedMatch::new(
                    whole.as_str(),
                    start,
                    offsets.at(whole.start()),
                )),
                None => debug!("Skipping out-of-range offset '{}'", whole.as_str()),
            }
        }
    }

    fn next_week(
        text: &str,
        reference: LocalInstant,
        (hour, minute): (u32, u32),
        out: &mut Vec<ExtractedMatch>,
    ) {
        let today = reference.date();
        let mut offsets = CharOffsets::new(text);
        for caps in NEXT_WEEK_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let Some(target) = weekday_from_syllable(&caps[1]) else {
                continue;
            };
            let days = days_until_next_week(target, today.weekday());
            let Some(start) = today
                .checked_add_days(Days::new(days))
                .and_then(|date| LocalInstant::at(date, hour, minute))
            else {
                continue;
            };
            out.push(ExtractedMatch::new(
                whole.as_str(),
                start,
                offsets.at(whole.start()),
            ));
        }
    }

    fn absolute_dates(
        re: &Regex,
        text: &str,
        reference: LocalInstant,
        (hour, minute): (u32, u32),
        accept: fn(u32, u32) -> bool,
        out: &mut Vec<ExtractedMatch>,
    ) {
        let mut offsets = CharOffsets::new(text);
        for caps in re.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let (Ok(month), Ok(day)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
                continue;
            };
            if !accept(month, day) {
                continue;
            }
            match month_day_forward(month, day, hour, minute, reference) {
                Some(start) => {
                    debug!("Korean date parsed: '{}' -> {}", whole.as_str(), start);
                    out.push(ExtractedMatch::new(
                        whole.as_str(),
                        start,
                        offsets.at(whole.start()),
                    ));
                }
                None => debug!("Skipping impossible date '{}'", whole.as_str()),
            }
        }
    }
}

impl Recognizer for KoreanRecognizer {
    fn source(&self) -> Source {
        Source::Korean
    }

    fn recognize(&self, text: &str, reference: LocalInstant) -> Vec<ExtractedMatch> {
        let phrase = first_time_phrase(text);
        let time = phrase.map_or((self.default_hour, self.default_minute), |p| {
            (p.hour, p.minute)
        });

        let mut found = Vec::new();
        Self::day_words(text, reference, phrase, time, &mut found);
        Self::days_later(text, reference, time, &mut found);
        Self::next_week(text, reference, time, &mut found);
        Self::absolute_dates(&MONTH_DAY_RE, text, reference, time, |_, _| true, &mut found);
        Self::absolute_dates(
            &NUMERIC_DATE_RE,
            text,
            reference,
            time,
            plausible_month_day,
            &mut found,
        );
        found
    }
}
