use chrono::{Datelike, Duration, NaiveDate};

use super::task::Task;

/// Days generated for the day strip, starting at the beginning of the week.
pub const STRIP_SPAN_DAYS: i64 = 14;
/// Days actually shown in the strip.
pub const STRIP_VISIBLE_DAYS: usize = 7;

/// Tasks whose derived date equals `date`, in their original order.
pub fn filter_by_date(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| t.date == date).collect()
}

/// Sunday that starts the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as i64;
    date - Duration::days(back)
}

/// Fourteen consecutive days from the start of `selected`'s week.
pub fn week_days(selected: NaiveDate) -> Vec<NaiveDate> {
    let start = start_of_week(selected);
    (0..STRIP_SPAN_DAYS).map(|i| start + Duration::days(i)).collect()
}

/// "Wednesday"
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// "Wed"
pub fn weekday_short(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// "10"
pub fn day_number(date: NaiveDate) -> String {
    date.format("%-d").to_string()
}

/// "January 10, 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
