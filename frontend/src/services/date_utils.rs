use chrono::{Datelike, Weekday};
use shared::calendar::parse_iso_date;
use shared::month_name;

/// Current (year, month) from the browser clock, month 1-based
pub fn current_year_month() -> (i32, u32) {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    (year, month)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Format a YYYY-MM-DD date string for display, e.g. "Friday, March 8, 2024"
pub fn format_date_for_display(date_str: &str) -> String {
    match parse_iso_date(date_str) {
        Some(date) => format!(
            "{}, {} {}, {}",
            weekday_name(date.weekday()),
            month_name(date.month()),
            date.day(),
            date.year()
        ),
        None => date_str.to_string(),
    }
}
