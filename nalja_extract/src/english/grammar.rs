//! English date/time grammar.
//!
//! Recognizes casual day words, weekdays, relative offsets, month-name and
//! numeric dates, clock times and ranges between them. Every relative form
//! resolves forward from the reference instant. When a date carries no
//! time-of-day the grammar implies noon and flags the hour as implied.
//!
//! Scanning happens in three passes: date phrases, clock times that attach
//! to a neighbouring date (or stand alone), then ranges joining two
//! neighbouring results.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use nalja_core::util::static_regex as compile;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const MONTHS: &str = "january|jan|february|feb|march|mar|april|apr|may|june|jun|july|jul|august|aug|september|sept|sep|october|oct|november|nov|december|dec";
const COUNT: &str = r"[0-9]{1,3}|an|a|one|two|three|four|five|six|seven|eight|nine|ten";

/// Hour implied for a date with no time-of-day.
const IMPLIED_HOUR: u32 = 12;
const TONIGHT_HOUR: u32 = 22;

static DAY_WORD_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)\b(today|tonight|tomorrow|tmr)\b"));

static WEEKDAY_FULL_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)\b(?:(this|next|on)\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
});

// Abbreviations collide with ordinary words ("sat", "sun"), so they need a prefix.
static WEEKDAY_ABBR_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)\b(this|next|on)\s+(mon|tues|tue|wed|thurs|thur|thu|fri|sat|sun)\b\.?")
});

static IN_OFFSET_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"(?i)\bin\s+({COUNT})\s+(days?|weeks?)\b")));

static FROM_NOW_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"(?i)\b({COUNT})\s+(days?|weeks?)\s+from\s+now\b")));

static NEXT_WEEK_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)\bnext\s+week\b"));

static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"(?i)\b({MONTHS})\.?\s+([0-9]{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+([0-9]{{4}})\b)?"
    ))
});

static DAY_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"(?i)\b([0-9]{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTHS})\b(?:,?\s+([0-9]{{4}})\b)?"
    ))
});

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"\b([0-9]{4})-([0-9]{2})-([0-9]{2})(?:[T ]([0-9]{2}):([0-9]{2})(?::([0-9]{2}))?)?\b")
});

static SLASH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"\b([0-9]{1,2})/([0-9]{1,2})(?:/([0-9]{4}|[0-9]{2}))?\b"));

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)\b(?:at\s+)?(?:(?P<h>[0-9]{1,2})(?::(?P<m>[0-9]{2}))?\s*(?P<ap>[ap])\.?m\b|(?P<h24>[0-9]{1,2}):(?P<m24>[0-9]{2})\b|(?P<word>noon|midnight)\b)|\bat\s+(?P<hat>[0-9]{1,2})\b",
    )
});

static RANGE_JOINER_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^\s*(?:-|–|~|to|until|till|through)\s*$"));

static TRAILING_COMPACT_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^\s*(?:am|pm)[0-9]{1,2}"));

/// Date and time fields produced by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedComponents {
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// The text gave no time-of-day; `hour` is the implied noon.
    pub hour_implied: bool,
}

/// One recognized expression, with byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResult {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start: ParsedComponents,
    pub end: Option<ParsedComponents>,
}

impl ParsedResult {
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start_byte..self.end_byte]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockTime {
    hour: u32,
    minute: u32,
    second: u32,
}

impl ClockTime {
    const fn hm(hour: u32, minute: u32) -> Self {
        Self {
            hour,
            minute,
            second: 0,
        }
    }

    fn naive(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, self.second)
    }
}

/// How a dated piece moves when it resolves before the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Roll {
    /// Explicit year or a date already ahead of today.
    Fixed,
    /// Month and day with no year: same date next year.
    Year,
    /// Weekday without `next`: same weekday next week.
    Week,
    /// Today without a clock time: the reference time-of-day.
    SameDay,
}

#[derive(Debug, Clone, Copy)]
enum PieceKind {
    Dated {
        date: NaiveDate,
        roll: Roll,
        time: Option<ClockTime>,
        default_time: Option<ClockTime>,
    },
    TimeOnly(ClockTime),
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    start: usize,
    end: usize,
    kind: PieceKind,
}

impl Piece {
    const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Scan `text` and resolve every expression against `reference`.
#[must_use]
pub fn parse(text: &str, reference: NaiveDateTime) -> Vec<ParsedResult> {
    let today = reference.date();
    let dates = collect_dates(text, today);
    let times = drop_overlapping(collect_times(text), &dates);

    let pieces = attach_times(text, dates, times);
    let mut results = Vec::new();
    let mut i = 0;
    while i < pieces.len() {
        let left = pieces[i];
        let right = pieces
            .get(i + 1)
            .filter(|r| RANGE_JOINER_RE.is_match(&text[left.end..r.start]));

        let start_byte = match right {
            Some(_) => from_prefix_start(text, left.start).unwrap_or(left.start),
            None => left.start,
        };

        let Some(start) = resolve(left.kind, reference, None) else {
            i += 1;
            continue;
        };

        if let Some(right) = right {
            let end = resolve(right.kind, reference, Some(start));
            results.push(ParsedResult {
                start_byte,
                end_byte: right.end,
                start,
                end,
            });
            i += 2;
        } else {
            let end_byte = if start.hour_implied {
                absorb_compact_token(text, left.end)
            } else {
                left.end
            };
            results.push(ParsedResult {
                start_byte,
                end_byte,
                start,
                end: None,
            });
            i += 1;
        }
    }
    results
}

fn collect_dates(text: &str, today: NaiveDate) -> Vec<Piece> {
    type Rule = fn(&Captures<'_>, NaiveDate) -> Option<PieceKind>;
    let rules: [(&Regex, Rule); 9] = [
        (&*ISO_DATE_RE, iso_date),
        (&*MONTH_DAY_RE, month_day),
        (&*DAY_MONTH_RE, day_month),
        (&*SLASH_DATE_RE, slash_date),
        (&*DAY_WORD_RE, day_word),
        (&*WEEKDAY_FULL_RE, weekday),
        (&*WEEKDAY_ABBR_RE, weekday),
        (&*IN_OFFSET_RE, offset_days),
        (&*FROM_NOW_RE, offset_days),
    ];

    let mut found: Vec<Piece> = rules
        .iter()
        .flat_map(|(re, rule)| {
            re.captures_iter(text).filter_map(move |caps| {
                let whole = caps.get(0)?;
                rule(&caps, today).map(|kind| Piece {
                    start: whole.start(),
                    end: whole.end(),
                    kind,
                })
            })
        })
        .chain(NEXT_WEEK_RE.find_iter(text).filter_map(|m| {
            Some(Piece {
                start: m.start(),
                end: m.end(),
                kind: dated(today.checked_add_days(Days::new(7))?, Roll::Fixed),
            })
        }))
        .collect();

    keep_leftmost_longest(&mut found);
    found
}

fn collect_times(text: &str) -> Vec<Piece> {
    let mut found: Vec<Piece> = TIME_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            clock_time(&caps).map(|t| Piece {
                start: whole.start(),
                end: whole.end(),
                kind: PieceKind::TimeOnly(t),
            })
        })
        .collect();
    keep_leftmost_longest(&mut found);
    found
}

/// Sort by position and drop any piece overlapping an earlier (or, at the
/// same start, longer) one.
///
/// Kept pieces never overlap, so the last one kept has the furthest end and
/// is the only one a later piece can collide with.
fn keep_leftmost_longest(pieces: &mut Vec<Piece>) {
    pieces.sort_by_key(|p| (p.start, std::cmp::Reverse(p.end)));
    let mut kept: Vec<Piece> = Vec::with_capacity(pieces.len());
    for piece in pieces.drain(..) {
        if !kept.last().is_some_and(|k| k.overlaps(&piece)) {
            kept.push(piece);
        }
    }
    *pieces = kept;
}

/// Drop times that fall inside a date phrase. Both lists are sorted and
/// free of internal overlaps.
fn drop_overlapping(times: Vec<Piece>, dates: &[Piece]) -> Vec<Piece> {
    let mut d = 0;
    times
        .into_iter()
        .filter(|t| {
            while d < dates.len() && dates[d].end <= t.start {
                d += 1;
            }
            !dates.get(d).is_some_and(|date| date.overlaps(t))
        })
        .collect()
}

/// Fold each clock time into the date right after or right before it.
/// Times with no neighbouring date stay on their own.
///
/// Dates and times are sorted and disjoint, so a cursor over the times
/// finds both neighbours of each date without rescanning.
fn attach_times(text: &str, dates: Vec<Piece>, times: Vec<Piece>) -> Vec<Piece> {
    let mut used = vec![false; times.len()];
    let mut pieces = Vec::with_capacity(dates.len() + times.len());
    let mut cursor = 0;

    for mut date in dates {
        while cursor < times.len() && times[cursor].end <= date.start {
            cursor += 1;
        }
        if let PieceKind::Dated { time: None, .. } = date.kind {
            let after = times
                .get(cursor)
                .filter(|t| !used[cursor] && is_connector(&text[date.end..t.start]))
                .map(|_| cursor);
            let before = || {
                cursor
                    .checked_sub(1)
                    .filter(|&j| !used[j] && is_connector(&text[times[j].end..date.start]))
            };
            if let Some(j) = after.or_else(before) {
                used[j] = true;
                date.start = date.start.min(times[j].start);
                date.end = date.end.max(times[j].end);
                if let (PieceKind::Dated { time, .. }, PieceKind::TimeOnly(t)) =
                    (&mut date.kind, times[j].kind)
                {
                    *time = Some(t);
                }
            }
        }
        pieces.push(date);
    }

    pieces.extend(
        times
            .into_iter()
            .zip(used)
            .filter_map(|(t, was_used)| (!was_used).then_some(t)),
    );
    pieces.sort_by_key(|p| p.start);
    pieces
}

fn is_connector(gap: &str) -> bool {
    gap.chars().all(|c| c.is_whitespace() || c == ',')
}

/// Byte offset of a standalone `from` right before `start`, separated from
/// it by whitespace.
fn from_prefix_start(text: &str, start: usize) -> Option<usize> {
    let head = text[..start].trim_end();
    if head.len() == start {
        return None;
    }
    let word_start = head.len().checked_sub(4)?;
    let word = head.get(word_start..)?;
    let bounded = head[..word_start]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphanumeric() && c != '_');
    (bounded && word.eq_ignore_ascii_case("from")).then_some(word_start)
}

/// Turn a piece into concrete fields.
///
/// `anchor` is the resolved start when the piece is the right side of a
/// range; a time-only right side then lands on the anchor's date.
fn resolve(
    kind: PieceKind,
    reference: NaiveDateTime,
    anchor: Option<ParsedComponents>,
) -> Option<ParsedComponents> {
    match kind {
        PieceKind::TimeOnly(t) => {
            let base = anchor.map_or_else(|| reference.date(), |a| a.date);
            let mut at = base.and_time(t.naive()?);
            let floor = anchor.map_or(reference, |a| {
                a.date
                    .and_hms_opt(a.hour, a.minute, a.second)
                    .unwrap_or(reference)
            });
            if at < floor {
                at = at.checked_add_days(Days::new(1))?;
            }
            Some(components(at, false))
        }
        PieceKind::Dated {
            date,
            roll,
            time,
            default_time,
        } => {
            let (t, implied) = match (time, default_time) {
                (Some(t), _) | (None, Some(t)) => (t, false),
                (None, None) => (ClockTime::hm(IMPLIED_HOUR, 0), true),
            };
            let mut at = date.and_time(t.naive()?);
            if at < reference {
                at = match roll {
                    Roll::Year => at.with_year(at.year() + 1).unwrap_or(at),
                    Roll::Week => at.checked_add_days(Days::new(7))?,
                    Roll::SameDay if time.is_none() => reference.with_nanosecond(0)?,
                    Roll::Fixed | Roll::SameDay => at,
                };
            }
            Some(components(at, implied))
        }
    }
}

fn components(at: NaiveDateTime, hour_implied: bool) -> ParsedComponents {
    ParsedComponents {
        date: at.date(),
        hour: at.hour(),
        minute: at.minute(),
        second: at.second(),
        hour_implied,
    }
}

/// Extend a span over a directly following `am3`/`pm11` token, which the
/// grammar itself does not read.
fn absorb_compact_token(text: &str, end: usize) -> usize {
    let rest = &text[end..];
    TRAILING_COMPACT_RE.find(rest).map_or(end, |m| {
        let followed_by_digit = rest[m.end()..].starts_with(|c: char| c.is_ascii_digit());
        if followed_by_digit { end } else { end + m.end() }
    })
}

const fn dated(date: NaiveDate, roll: Roll) -> PieceKind {
    PieceKind::Dated {
        date,
        roll,
        time: None,
        default_time: None,
    }
}

fn day_word(caps: &Captures<'_>, today: NaiveDate) -> Option<PieceKind> {
    match caps[1].to_lowercase().as_str() {
        "today" => Some(dated(today, Roll::SameDay)),
        "tonight" => Some(PieceKind::Dated {
            date: today,
            roll: Roll::SameDay,
            time: None,
            default_time: Some(ClockTime::hm(TONIGHT_HOUR, 0)),
        }),
        "tomorrow" | "tmr" => Some(dated(today.checked_add_days(Days::new(1))?, Roll::Fixed)),
        _ => None,
    }
}

fn weekday(caps: &Captures<'_>, today: NaiveDate) -> Option<PieceKind> {
    let target = parse_weekday(&caps[2])?;
    let strictly_after = caps
        .get(1)
        .is_some_and(|p| p.as_str().eq_ignore_ascii_case("next"));

    let current = today.weekday().num_days_from_monday();
    let mut days = (target.num_days_from_monday() + 7 - current) % 7;
    if days == 0 && strictly_after {
        days = 7;
    }
    let roll = if days == 0 { Roll::Week } else { Roll::Fixed };
    Some(dated(today.checked_add_days(Days::new(u64::from(days)))?, roll))
}

fn offset_days(caps: &Captures<'_>, today: NaiveDate) -> Option<PieceKind> {
    let amount = parse_count(&caps[1])?;
    let unit = caps[2].to_lowercase();
    let days = if unit.starts_with("week") {
        amount.checked_mul(7)?
    } else {
        amount
    };
    let roll = if days == 0 { Roll::SameDay } else { Roll::Fixed };
    Some(dated(today.checked_add_days(Days::new(days))?, roll))
}

fn month_day(caps: &Captures<'_>, today: NaiveDate) -> Option<PieceKind> {
    let month = parse_month(&caps[1])?;
    let day = caps[2].parse().ok()?;
    calendar_date(caps.get(3).map(|y| y.as_str()), month, day, today)
}

fn day_month(caps: &Captures<'_>, today: NaiveDate) -> Option<PieceKind> {
    let day = caps[1].parse().ok()?;
    let month = parse_month(&caps[2])?;
    calendar_date(caps.get(3).map(|y| y.as_str()), month, day, today)
}

fn slash_date(caps: &Captures<'_>, today: NaiveDate) -> Option<PieceKind> {
    let month = caps[1].parse().ok()?;
    let day = caps[2].parse().ok()?;
    calendar_date(caps.get(3).map(|y| y.as_str()), month, day, today)
}

fn iso_date(caps: &Captures<'_>, _today: NaiveDate) -> Option<PieceKind> {
    let date = NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;
    let time = match (caps.get(4), caps.get(5)) {
        (Some(h), Some(m)) => Some(ClockTime {
            hour: h.as_str().parse().ok()?,
            minute: m.as_str().parse().ok()?,
            second: caps.get(6).map_or(Some(0), |s| s.as_str().parse().ok())?,
        }),
        _ => None,
    };
    if let Some(t) = time {
        t.naive()?;
    }
    Some(PieceKind::Dated {
        date,
        roll: Roll::Fixed,
        time,
        default_time: None,
    })
}

fn calendar_date(year: Option<&str>, month: u32, day: u32, today: NaiveDate) -> Option<PieceKind> {
    match year {
        Some(raw) => {
            let mut year: i32 = raw.parse().ok()?;
            if raw.len() == 2 {
                year += 2000;
            }
            Some(dated(NaiveDate::from_ymd_opt(year, month, day)?, Roll::Fixed))
        }
        None => Some(dated(
            NaiveDate::from_ymd_opt(today.year(), month, day)?,
            Roll::Year,
        )),
    }
}

fn clock_time(caps: &Captures<'_>) -> Option<ClockTime> {
    if let Some(h) = caps.name("h") {
        let hour: u32 = h.as_str().parse().ok()?;
        let minute: u32 = caps.name("m").map_or(Some(0), |m| m.as_str().parse().ok())?;
        if !(1..=12).contains(&hour) || minute > 59 {
            return None;
        }
        let is_pm = caps
            .name("ap")
            .is_some_and(|ap| ap.as_str().eq_ignore_ascii_case("p"));
        return Some(ClockTime::hm(to_24h(hour, is_pm), minute));
    }
    if let (Some(h), Some(m)) = (caps.name("h24"), caps.name("m24")) {
        let hour: u32 = h.as_str().parse().ok()?;
        let minute: u32 = m.as_str().parse().ok()?;
        return (hour <= 23 && minute <= 59).then_some(ClockTime::hm(hour, minute));
    }
    if let Some(word) = caps.name("word") {
        let hour = if word.as_str().eq_ignore_ascii_case("noon") {
            12
        } else {
            0
        };
        return Some(ClockTime::hm(hour, 0));
    }
    let hour: u32 = caps.name("hat")?.as_str().parse().ok()?;
    (hour <= 23).then_some(ClockTime::hm(hour, 0))
}

/// 12-hour clock to 24-hour: 12am is 0, 12pm is 12.
#[must_use]
pub const fn to_24h(hour: u32, is_pm: bool) -> u32 {
    match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    }
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_lowercase().trim_end_matches('.') {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tues" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thurs" | "thur" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_month(s: &str) -> Option<u32> {
    let lower = s.to_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn parse_count(s: &str) -> Option<u64> {
    match s.to_lowercase().as_str() {
        "a" | "an" | "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        other => other.parse().ok(),
    }
}
