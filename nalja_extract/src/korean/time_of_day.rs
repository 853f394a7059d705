//! 오전/오후 time phrases.

use nalja_core::util::static_regex;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static TIME_PHRASE_RE: Lazy<Regex> =
    Lazy::new(|| static_regex(r"(오전|오후)\s?([0-9]{1,2})시?\s?(?:([0-9]{1,2})분)?"));

/// The first time phrase in a text, converted to a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePhrase<'t> {
    /// The phrase as written, e.g. `오후 3시 30분`, without trailing space.
    pub text: &'t str,
    pub hour: u32,
    pub minute: u32,
}

/// Find the first 오전/오후 phrase in `text`.
///
/// Only the first phrase counts; later ones are ignored. A phrase naming an
/// impossible time (오후 13시, 70분) is treated as absent.
#[must_use]
pub fn first_time_phrase(text: &str) -> Option<TimePhrase<'_>> {
    let caps = TIME_PHRASE_RE.captures(text)?;
    let is_pm = &caps[1] == "오후";
    let raw_hour: u32 = caps[2].parse().ok()?;
    let minute: u32 = caps.get(3).map_or(Some(0), |m| m.as_str().parse().ok())?;

    let hour = match (is_pm, raw_hour) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    };

    let phrase = caps.get(0)?.as_str().trim_end();
    if hour > 23 || minute > 59 {
        debug!("Ignoring out-of-range time phrase '{}'", phrase);
        return None;
    }

    debug!(
        "Time parsed: '{}' -> {:02}:{:02}",
        phrase, hour, minute
    );
    Some(TimePhrase {
        text: phrase,
        hour,
        minute,
    })
}
