//! Calendar helpers for the day selector.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Formats the header label shown above a day's list,
/// e.g. `2025년 01월 01일 수요일`.
pub fn display_label(date: NaiveDate) -> String {
    format!(
        "{}년 {:02}월 {:02}일 {}",
        date.year(),
        date.month(),
        date.day(),
        weekday_name(date.weekday())
    )
}

/// Moves `date` by `days`, saturating at the calendar bounds.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(date)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_zero_padded_with_weekday() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(display_label(date), "2025년 01월 01일 수요일");
    }

    #[test]
    fn shift_crosses_month_boundaries() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(shift_days(date, -1), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(shift_days(date, 31), NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(shift_days(date, 0), date);
    }
}
