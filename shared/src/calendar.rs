//! Calendar arithmetic and the month grid shown by the booking widget.
//!
//! The grid is a plain value: the UI layer only maps cells to elements and
//! never computes weekdays, month lengths or availability itself.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::availability::Availability;
use crate::month_name;

/// Day headers, week starting on Sunday
pub const DAY_HEADERS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Why a day can or cannot be picked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DayAvailability {
    Available,
    /// Saturday or Sunday
    Weekend,
    /// Every daily slot is taken
    FullyBooked,
}

impl DayAvailability {
    pub fn is_available(self) -> bool {
        self == DayAvailability::Available
    }
}

/// A single day of the displayed month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayCell {
    pub day: u32,
    /// YYYY-MM-DD
    pub date: String,
    pub availability: DayAvailability,
    pub is_selected: bool,
}

/// Grid cell: leading padding before the 1st, or a day of the month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CalendarCell {
    Blank,
    Day(DayCell),
}

/// Rendered month: headers plus leading blanks followed by one cell per day
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i64,
    pub month: u32,
    /// e.g. "March 2024"
    pub label: String,
    pub headers: [&'static str; 7],
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn blank_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, CalendarCell::Blank))
            .count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            CalendarCell::Day(day) => Some(day),
            CalendarCell::Blank => None,
        })
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|cell| cell.day == day)
    }
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Get days in a month (accounting for leap years)
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) { 29 } else { 28 }
        }
        _ => 0,
    }
}

/// Weekday of the 1st of the month, 0 = Sunday. `None` outside chrono's date range.
pub fn first_weekday_of_month(year: i64, month: u32) -> Option<u32> {
    first_of_month(year, month).map(|date| date.weekday().num_days_from_sunday())
}

fn first_of_month(year: i64, month: u32) -> Option<NaiveDate> {
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, 1))
}

/// Zero-padded ISO date string
pub fn iso_date(year: i64, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Parse a strict `YYYY-MM-DD` string
pub fn parse_iso_date(date_str: &str) -> Option<NaiveDate> {
    if date_str.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

/// Check if a `HH:MM` string is a valid wall-clock time
pub fn is_valid_time_slot(time_str: &str) -> bool {
    time_str.len() == 5 && chrono::NaiveTime::parse_from_str(time_str, "%H:%M").is_ok()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Shift a (year, month) pair by `delta` months, wrapping across years.
///
/// `month` may lie outside 1..=12; it is folded into the year first.
/// Results past the `i64` year range saturate.
pub fn shift_month(year: i64, month: u32, delta: i64) -> (i64, u32) {
    let index = i128::from(year) * 12 + i128::from(month) - 1 + i128::from(delta);
    let min_index = i128::from(i64::MIN) * 12;
    let max_index = i128::from(i64::MAX) * 12 + 11;
    let index = index.clamp(min_index, max_index);
    (index.div_euclid(12) as i64, index.rem_euclid(12) as u32 + 1)
}

/// Build the grid for `year`/`month`, marking weekends and fully booked days.
///
/// `selected` is only highlighted when it falls on an available day.
pub fn build_month_grid(
    year: i64,
    month: u32,
    availability: &Availability,
    selected: Option<&str>,
) -> MonthGrid {
    let label = format!("{} {}", month_name(month), year);
    let mut cells = Vec::new();

    if let Some(first) = first_of_month(year, month) {
        for _ in 0..first.weekday().num_days_from_sunday() {
            cells.push(CalendarCell::Blank);
        }

        for date in first.iter_days().take_while(|date| date.month() == month) {
            let day = date.day();
            let date_str = iso_date(year, month, day);
            let day_availability = availability.day_availability(date, &date_str);
            let is_selected =
                day_availability.is_available() && selected == Some(date_str.as_str());

            cells.push(CalendarCell::Day(DayCell {
                day,
                date: date_str,
                availability: day_availability,
                is_selected,
            }));
        }
    }

    MonthGrid {
        year,
        month,
        label,
        headers: DAY_HEADERS,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(times: &[&str]) -> Vec<String> {
        times.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31); // January
        assert_eq!(days_in_month(2025, 4), 30); // April
        assert_eq!(days_in_month(2025, 2), 28); // February (non-leap)
        assert_eq!(days_in_month(2024, 2), 29); // February (leap year)
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(!is_leap_year(2025));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn test_days_in_month_agrees_with_chrono() {
        for year in 1999..=2030 {
            for month in 1..=12 {
                let (next_year, next_month) = shift_month(year, month, 1);
                let first = first_of_month(year, month).unwrap();
                let next = first_of_month(next_year, next_month).unwrap();
                assert_eq!(
                    days_in_month(year, month) as i64,
                    (next - first).num_days(),
                    "{}-{}",
                    year,
                    month
                );
            }
        }
    }

    #[test]
    fn test_first_weekday_of_month() {
        // March 1, 2024 was a Friday
        assert_eq!(first_weekday_of_month(2024, 3), Some(5));
        // September 1, 2024 was a Sunday
        assert_eq!(first_weekday_of_month(2024, 9), Some(0));
        assert_eq!(first_weekday_of_month(2024, 13), None);
    }

    #[test]
    fn test_iso_date_is_zero_padded() {
        assert_eq!(iso_date(2024, 3, 8), "2024-03-08");
        assert_eq!(iso_date(2024, 12, 25), "2024-12-25");
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-03-08"), NaiveDate::from_ymd_opt(2024, 3, 8));
        assert_eq!(parse_iso_date("2024-3-8"), None);
        assert_eq!(parse_iso_date("2024-02-30"), None);
        assert_eq!(parse_iso_date("not-a-date"), None);
    }

    #[test]
    fn test_is_valid_time_slot() {
        assert!(is_valid_time_slot("08:00"));
        assert!(is_valid_time_slot("15:00"));
        assert!(!is_valid_time_slot("8:00"));
        assert!(!is_valid_time_slot("25:00"));
        assert!(!is_valid_time_slot(""));
    }

    #[test]
    fn test_shift_month_wraps_years() {
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 6, 0), (2024, 6));
        assert_eq!(shift_month(2024, 6, 30), (2026, 12));
        assert_eq!(shift_month(2024, 6, -30), (2021, 12));
        assert_eq!(shift_month(0, 1, -1), (-1, 12));
    }

    #[test]
    fn test_shift_month_folds_large_months() {
        assert_eq!(shift_month(2024, 13, 0), (2025, 1));
        assert_eq!(shift_month(2024, u32::MAX, 0), (357_915_965, 3));
    }

    #[test]
    fn test_shift_month_crosses_i32_years() {
        let max = i64::from(i32::MAX);
        assert_eq!(shift_month(max, 12, 1), (max + 1, 1));
        assert_eq!(shift_month(max + 1, 1, -1), (max, 12));
        assert_eq!(shift_month(i64::MAX, 12, 1), (i64::MAX, 12));
    }

    #[test]
    fn test_grid_cell_count_matches_blanks_plus_days() {
        let availability = Availability::new();
        for year in [1900, 2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                let grid = build_month_grid(year, month, &availability, None);
                let blanks = first_weekday_of_month(year, month).unwrap() as usize;
                assert_eq!(grid.blank_count(), blanks);
                assert_eq!(grid.days().count(), days_in_month(year, month) as usize);
                assert_eq!(grid.cells.len(), blanks + days_in_month(year, month) as usize);
            }
        }
    }

    #[test]
    fn test_grid_blanks_come_first() {
        let grid = build_month_grid(2024, 3, &Availability::new(), None);
        assert!(grid.cells[..5].iter().all(|c| matches!(c, CalendarCell::Blank)));
        assert!(matches!(&grid.cells[5], CalendarCell::Day(d) if d.day == 1));
        assert_eq!(grid.headers, DAY_HEADERS);
        assert_eq!(grid.label, "March 2024");
    }

    #[test]
    fn test_leap_february_has_29_days() {
        let grid = build_month_grid(2024, 2, &Availability::new(), None);
        assert_eq!(grid.days().count(), 29);
        assert_eq!(grid.day(29).map(|d| d.date.as_str()), Some("2024-02-29"));
    }

    #[test]
    fn test_weekends_are_unavailable() {
        let grid = build_month_grid(2024, 3, &Availability::new(), None);
        assert_eq!(grid.day(9).unwrap().availability, DayAvailability::Weekend); // Saturday
        assert_eq!(grid.day(10).unwrap().availability, DayAvailability::Weekend); // Sunday
        assert_eq!(grid.day(11).unwrap().availability, DayAvailability::Available); // Monday
    }

    #[test]
    fn test_fully_booked_weekday_is_unavailable() {
        let mut availability = Availability::new();
        availability.replace_booked_date_times([(
            "2024-03-08".to_string(),
            slots(&["08:00", "09:00", "10:00", "11:00", "13:00", "14:00", "15:00"]),
        )]);

        let grid = build_month_grid(2024, 3, &availability, None);
        assert_eq!(grid.day(8).unwrap().availability, DayAvailability::FullyBooked);
        assert_eq!(grid.day(7).unwrap().availability, DayAvailability::Available);
    }

    #[test]
    fn test_unavailable_iff_weekend_or_full() {
        let mut availability = Availability::new();
        availability.replace_booked_date_times([
            ("2024-04-02".to_string(), slots(&["08:00", "09:00", "10:00", "11:00", "13:00", "14:00"])),
            ("2024-04-03".to_string(), slots(&["08:00", "09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00"])),
            ("2024-04-06".to_string(), slots(&["08:00"])),
        ]);

        let grid = build_month_grid(2024, 4, &availability, None);
        for cell in grid.days() {
            let date = parse_iso_date(&cell.date).unwrap();
            let expected_unavailable = is_weekend(date)
                || availability.booked_slots(&cell.date).len() >= crate::DAILY_SLOT_CAPACITY;
            assert_eq!(!cell.availability.is_available(), expected_unavailable, "{}", cell.date);
        }
        assert!(grid.day(2).unwrap().availability.is_available());
        assert_eq!(grid.day(3).unwrap().availability, DayAvailability::FullyBooked);
    }

    #[test]
    fn test_selection_only_highlights_available_days() {
        let grid = build_month_grid(2024, 3, &Availability::new(), Some("2024-03-07"));
        assert!(grid.day(7).unwrap().is_selected);
        assert_eq!(grid.days().filter(|d| d.is_selected).count(), 1);

        let grid = build_month_grid(2024, 3, &Availability::new(), Some("2024-03-09"));
        assert_eq!(grid.days().filter(|d| d.is_selected).count(), 0);
    }

    #[test]
    fn test_out_of_range_month_renders_no_cells() {
        let grid = build_month_grid(300_000, 1, &Availability::new(), None);
        assert!(grid.cells.is_empty());
        assert_eq!(grid.label, "January 300000");

        let grid = build_month_grid(i64::from(i32::MAX) + 1, 1, &Availability::new(), None);
        assert!(grid.cells.is_empty());
    }
}
