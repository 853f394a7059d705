//! Local wall-clock instants.
//!
//! A [`LocalInstant`] is a calendar date plus time-of-day with no offset
//! attached. It is serialized as `YYYY-MM-DDTHH:mm:ss` and parsed back by
//! splitting that string into fields, so a value never drifts through an
//! implicit UTC conversion. Moving between wall-clock and absolute time is
//! done only through [`LocalInstant::from_zoned`] and [`LocalInstant::to_zoned`].

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::util::static_regex;

const LOCAL_ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static LOCAL_ISO_RE: Lazy<Regex> = Lazy::new(|| {
    static_regex(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})[Tt ]([0-9]{2}):([0-9]{2}):([0-9]{2})")
});

/// A point in time expressed purely as local wall-clock fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalInstant(NaiveDateTime);

impl LocalInstant {
    /// Build an instant from individual fields, `None` if they do not form a
    /// real calendar date and time.
    #[must_use]
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        Some(Self(date.and_time(time)))
    }

    /// Attach an hour and minute to a date; seconds are always zero.
    #[must_use]
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(Self(date.and_time(time)))
    }

    #[must_use]
    pub const fn naive(&self) -> NaiveDateTime {
        self.0
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    #[must_use]
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Same month, day and time one year later.
    ///
    /// `None` for February 29th when the following year has no such day.
    #[must_use]
    pub fn next_year(&self) -> Option<Self> {
        self.0.with_year(self.0.year() + 1).map(Self)
    }

    /// Take the wall-clock fields of an absolute instant, dropping its offset.
    #[must_use]
    pub fn from_zoned<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self(dt.naive_local())
    }

    /// Place these wall-clock fields in a timezone.
    ///
    /// Ambiguous local times (clocks turned back) resolve to the earlier
    /// instant; non-existent ones (clocks turned forward) yield `None`.
    #[must_use]
    pub fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        match tz.from_local_datetime(&self.0) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
            LocalResult::None => None,
        }
    }

    /// Render as `YYYY-MM-DDTHH:mm:ss` with no offset suffix.
    #[must_use]
    pub fn to_local_iso(&self) -> String {
        self.0.format(LOCAL_ISO_FORMAT).to_string()
    }

    /// Short list form, `M.D HH:mm` (e.g. `11.7 14:10`).
    #[must_use]
    pub fn format_compact(&self) -> String {
        format!(
            "{}.{} {:02}:{:02}",
            self.month(),
            self.day(),
            self.hour(),
            self.minute()
        )
    }

    /// Parse the local ISO form by splitting it into fields.
    ///
    /// The string must start with `YYYY-MM-DD` and `HH:mm:ss`, separated by
    /// `T`, `t` or a space. Any fraction or offset after the seconds is
    /// ignored, so `2024-01-02T15:00:00+09:00` and `2024-01-02T15:00:00.000Z`
    /// both read as 15:00.
    pub fn parse_local_iso(raw: &str) -> Result<Self> {
        let caps = LOCAL_ISO_RE.captures(raw).ok_or_else(|| {
            Error::InvalidInstant(format!("{raw}: expected YYYY-MM-DDTHH:mm:ss"))
        })?;
        let field = |i: usize| -> Result<u32> {
            caps[i]
                .parse::<u32>()
                .map_err(|e| Error::InvalidInstant(format!("{raw}: {e}")))
        };
        let year = caps[1]
            .parse::<i32>()
            .map_err(|e| Error::InvalidInstant(format!("{raw}: {e}")))?;
        Self::new(year, field(2)?, field(3)?, field(4)?, field(5)?, field(6)?)
            .ok_or_else(|| Error::InvalidInstant(format!("{raw}: out-of-range field")))
    }
}

impl fmt::Display for LocalInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LOCAL_ISO_FORMAT))
    }
}

impl FromStr for LocalInstant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_local_iso(s)
    }
}

impl Serialize for LocalInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocalInstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_local_iso(&raw).map_err(serde::de::Error::custom)
    }
}
