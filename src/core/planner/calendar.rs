//! Day arithmetic and weekday labels

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Short weekday label ("Mon" .. "Sun") for a date
#[must_use]
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Whole days from `today` until `target` (negative when `target` is in the past)
#[must_use]
pub fn days_until(today: NaiveDate, target: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// The date `offset` days after `start`, saturating at the last representable date
#[must_use]
pub fn day_offset(start: NaiveDate, offset: usize) -> NaiveDate {
    start
        .checked_add_days(Days::new(offset as u64))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_labels_cycle() {
        let monday = date(2026, 10, 19);
        let labels: Vec<_> = (0..7).map(|i| weekday_label(day_offset(monday, i))).collect();
        assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        assert_eq!(weekday_label(day_offset(monday, 7)), "Mon");
    }

    #[test]
    fn test_days_until() {
        let today = date(2026, 10, 18);
        assert_eq!(days_until(today, date(2026, 10, 22)), 4);
        assert_eq!(days_until(today, today), 0);
        assert_eq!(days_until(today, date(2026, 10, 15)), -3);
        // Crosses a month boundary
        assert_eq!(days_until(today, date(2026, 11, 2)), 15);
    }
}
