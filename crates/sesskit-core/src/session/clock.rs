//! Wall-clock helpers for session timestamps
//!
//! Expiry stamps are built from the current UTC calendar fields with the
//! lifetime added to the minute component, so overflow rolls through
//! hours, days, months, and years as calendar arithmetic.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike, Utc};

/// Current unix timestamp (seconds, UTC)
pub fn unix_now() -> i64 {
    unix_now_offset_minutes(0)
}

/// Unix timestamp `minutes` from now (seconds, UTC)
pub fn unix_now_offset_minutes(minutes: u32) -> i64 {
    let now = Utc::now();
    reassemble(
        now.date_naive(),
        i64::from(now.hour()),
        i64::from(now.minute()) + i64::from(minutes),
        i64::from(now.second()),
    )
}

fn reassemble(date: NaiveDate, hours: i64, minutes: i64, seconds: i64) -> i64 {
    let stamp = date.and_time(NaiveTime::MIN)
        + Duration::hours(hours)
        + Duration::minutes(minutes)
        + Duration::seconds(seconds);
    stamp.and_utc().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn unix(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        date(y, m, d)
            .and_hms_opt(h, min, s)
            .unwrap()
            .and_utc()
            .timestamp()
    }

    #[test]
    fn test_reassemble_plain_fields() {
        assert_eq!(
            reassemble(date(2024, 6, 15), 10, 30, 45),
            unix(2024, 6, 15, 10, 30, 45)
        );
    }

    #[test]
    fn test_minute_overflow_rolls_into_hours() {
        // 10:59 + 125 minutes = 13:04
        assert_eq!(
            reassemble(date(2024, 6, 15), 10, 59 + 125, 0),
            unix(2024, 6, 15, 13, 4, 0)
        );
    }

    #[test]
    fn test_minute_overflow_rolls_into_next_day() {
        assert_eq!(
            reassemble(date(2024, 6, 15), 23, 59 + 1, 0),
            unix(2024, 6, 16, 0, 0, 0)
        );
    }

    #[test]
    fn test_minute_overflow_rolls_into_next_month() {
        assert_eq!(
            reassemble(date(2024, 4, 30), 23, 59 + 1, 0),
            unix(2024, 5, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_minute_overflow_rolls_into_next_year() {
        assert_eq!(
            reassemble(date(2024, 12, 31), 23, 59 + 1, 0),
            unix(2025, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_minute_overflow_respects_leap_day() {
        assert_eq!(
            reassemble(date(2024, 2, 28), 23, 59 + 1, 0),
            unix(2024, 2, 29, 0, 0, 0)
        );
    }

    #[test]
    fn test_offset_matches_now_plus_seconds() {
        let now = unix_now();
        let later = unix_now_offset_minutes(10);
        let delta = later - now;

        // Allow for the clock ticking between the two samples
        assert!((598..=602).contains(&delta), "delta was {}", delta);
    }

    #[test]
    fn test_zero_offset_is_now() {
        let now = Utc::now().timestamp();
        let computed = unix_now();
        assert!((computed - now).abs() <= 2);
    }
}
