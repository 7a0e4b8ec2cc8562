// Date utility functions
// Calendar arithmetic and the fixed display formats used across the views

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Build a date from a zero-based month index (0 = January).
pub fn date_from_month_index(year: i32, month_index: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month_index + 1, day)
}

/// Number of days in a month. `month` is 1-based.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_of_next.pred_opt().map(|last| last.day())
}

/// Days in the month before `month` (1-based), wrapping into the previous year.
pub fn days_in_previous_month(year: i32, month: u32) -> Option<u32> {
    if month == 1 {
        days_in_month(year - 1, 12)
    } else {
        days_in_month(year, month - 1)
    }
}

/// Weekday of day 1 of `month` (1-based), 0 = Sunday .. 6 = Saturday.
pub fn first_weekday(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(weekday_index)
}

/// 0 = Sunday .. 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Shift a zero-based (year, month) pair by whole months.
pub fn shift_month_index(year: i32, month_index: u32, delta_months: i32) -> (i32, u32) {
    let total_months = (year * 12) + month_index as i32 + delta_months;
    (total_months.div_euclid(12), total_months.rem_euclid(12) as u32)
}

pub fn shift_day(date: NaiveDate, delta_days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(delta_days))
}

/// `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM` as used by the month listing query.
pub fn format_year_month(year: i32, month_index: u32) -> String {
    format!("{:04}-{:02}", year, month_index + 1)
}

/// `HH:MM`
pub fn format_hm(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

pub fn weekday_name(index: u32) -> &'static str {
    WEEKDAY_NAMES[(index % 7) as usize]
}

pub fn month_name(month_index: u32) -> String {
    format!("{}月", month_index % 12 + 1)
}

/// Header shown above the month grid, e.g. `2024年 2月`.
pub fn month_title(year: i32, month_index: u32) -> String {
    format!("{}年 {}", year, month_name(month_index))
}

/// Label of the selected day above the timeline, e.g. `2/14 Wed`.
pub fn selected_date_label(date: NaiveDate) -> String {
    format!(
        "{}/{} {}",
        date.month(),
        date.day(),
        weekday_name(weekday_index(date))
    )
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Parse a local wall-clock timestamp as sent by the listing endpoints.
pub fn parse_local_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    text.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M").ok())
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").ok())
}
