//! Calendar arithmetic shared by the Korean rules.

use chrono::{NaiveDate, Weekday};
use nalja_core::LocalInstant;

/// Weekday named by the syllable before 요일.
#[must_use]
pub fn weekday_from_syllable(syllable: &str) -> Option<Weekday> {
    match syllable {
        "월" => Some(Weekday::Mon),
        "화" => Some(Weekday::Tue),
        "수" => Some(Weekday::Wed),
        "목" => Some(Weekday::Thu),
        "금" => Some(Weekday::Fri),
        "토" => Some(Weekday::Sat),
        "일" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Days from `today` to `target` in the following week: always 7..=13.
///
/// Weeks start on Sunday, so from a Saturday "다음 주 일요일" is 8 days out
/// and from a Sunday "다음 주 월요일" is 8 days out as well.
#[must_use]
pub fn days_until_next_week(target: Weekday, today: Weekday) -> u64 {
    let target = u64::from(target.num_days_from_sunday());
    let current = u64::from(today.num_days_from_sunday());
    ((target + 7 - current) % 7) + 7
}

/// A month/day in the reference year at the given time, pushed to the
/// following year when that is already in the past.
///
/// `None` when the pair is not a real calendar date in the year it lands in.
#[must_use]
pub fn month_day_forward(
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    reference: LocalInstant,
) -> Option<LocalInstant> {
    let date = NaiveDate::from_ymd_opt(reference.year(), month, day)?;
    let candidate = LocalInstant::at(date, hour, minute)?;
    if candidate < reference {
        candidate.next_year()
    } else {
        Some(candidate)
    }
}

/// Numeric dates are only read when month and day are in range.
#[must_use]
pub fn plausible_month_day(month: u32, day: u32) -> bool {
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn at(y: i32, m: u32, d: u32, h: u32) -> LocalInstant {
        LocalInstant::new(y, m, d, h, 0, 0).expect("valid instant")
    }

    #[test]
    fn test_next_week_is_always_seven_to_thirteen_days() {
        let days = [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        for today in days {
            for target in days {
                let n = days_until_next_week(target, today);
                assert!((7..=13).contains(&n), "{today:?} -> {target:?} gave {n}");
            }
        }
        // Monday 2024-01-01 to next Monday.
        assert_eq!(days_until_next_week(Weekday::Mon, Weekday::Mon), 7);
        assert_eq!(days_until_next_week(Weekday::Sun, Weekday::Sat), 8);
    }

    #[test]
    fn test_month_day_rolls_forward_when_past() {
        let reference = at(2024, 12, 1, 10);
        assert_eq!(
            month_day_forward(11, 5, 9, 0, reference).map(|i| i.to_local_iso()),
            Some("2025-11-05T09:00:00".to_string())
        );
        assert_eq!(
            month_day_forward(12, 25, 9, 0, reference).map(|i| i.to_local_iso()),
            Some("2024-12-25T09:00:00".to_string())
        );
    }

    #[test]
    fn test_same_day_earlier_time_rolls_forward() {
        let reference = at(2024, 11, 5, 10);
        assert_eq!(
            month_day_forward(11, 5, 9, 0, reference).map(|i| i.year()),
            Some(2025)
        );
        assert_eq!(
            month_day_forward(11, 5, 11, 0, reference).map(|i| i.year()),
            Some(2024)
        );
    }

    #[test]
    fn test_impossible_dates_are_skipped() {
        let reference = at(2024, 1, 1, 10);
        assert!(month_day_forward(2, 30, 9, 0, reference).is_none());
        assert!(month_day_forward(4, 31, 9, 0, reference).is_none());
        // Leap day already passed; 2025 has no Feb 29.
        assert!(month_day_forward(2, 29, 9, 0, at(2024, 3, 1, 10)).is_none());
    }

    #[test]
    fn test_plausible_month_day() {
        assert!(plausible_month_day(11, 5));
        assert!(plausible_month_day(12, 31));
        assert!(!plausible_month_day(13, 5));
        assert!(!plausible_month_day(0, 5));
        assert!(!plausible_month_day(3, 0));
        assert!(!plausible_month_day(3, 32));
    }
}
