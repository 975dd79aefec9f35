//! State of the booking calendar widget.
//!
//! `BookingCalendar` owns the displayed month, the availability data and the
//! visitor's date/time selection. Every UI event maps onto one method here;
//! the UI re-renders from `render()` and `time_options()` afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::availability::Availability;
use crate::calendar::{build_month_grid, shift_month, MonthGrid};
use crate::month_name;

/// Bookable meeting slots offered by the time selector
pub const DEFAULT_TIME_SLOTS: [&str; 7] =
    ["08:00", "09:00", "10:00", "11:00", "13:00", "14:00", "15:00"];

/// One entry of the time selector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeOption {
    /// HH:MM
    pub value: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingCalendar {
    year: i64,
    month: u32,
    availability: Availability,
    has_availability: bool,
    selected_date: Option<String>,
    selected_time: Option<String>,
    time_options: Vec<TimeOption>,
}

impl BookingCalendar {
    /// Widget showing `year`/`month` with the default time slots
    pub fn new(year: i32, month: u32) -> Self {
        Self::with_time_slots(year, month, DEFAULT_TIME_SLOTS)
    }

    /// Widget with a custom set of time slots. Out-of-range months are normalized.
    pub fn with_time_slots<I, S>(year: i32, month: u32, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (year, month) = shift_month(i64::from(year), month, 0);
        Self {
            year,
            month,
            availability: Availability::new(),
            has_availability: false,
            selected_date: None,
            selected_time: None,
            time_options: slots
                .into_iter()
                .map(|slot| TimeOption { value: slot.into(), disabled: false })
                .collect(),
        }
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Month/year label, e.g. "March 2024"
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// True once either availability response has been applied
    pub fn has_availability(&self) -> bool {
        self.has_availability
    }

    pub fn selected_date(&self) -> Option<&str> {
        self.selected_date.as_deref()
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    pub fn time_options(&self) -> &[TimeOption] {
        &self.time_options
    }

    /// Both a date and a time are chosen
    pub fn is_complete(&self) -> bool {
        self.selected_date.is_some() && self.selected_time.is_some()
    }

    /// Apply the coarse `/api/booked_dates` response
    pub fn set_booked_dates(&mut self, dates: Vec<String>) {
        self.availability.replace_booked_dates(dates);
        self.has_availability = true;
    }

    /// Apply the `/api/booked_dates_times` response and refresh the time options.
    /// A selected date that is now fully booked is dropped.
    pub fn set_booked_date_times(&mut self, date_times: BTreeMap<String, Vec<String>>) {
        self.availability.replace_booked_date_times(date_times);
        self.has_availability = true;
        if let Some(date) = self.selected_date.as_deref() {
            if !self.availability.is_selectable(date) {
                self.selected_date = None;
            }
        }
        self.update_time_options();
    }

    /// Grid for the displayed month
    pub fn render(&self) -> MonthGrid {
        self.render_month(self.year, self.month)
    }

    pub fn render_month(&self, year: i64, month: u32) -> MonthGrid {
        build_month_grid(year, month, &self.availability, self.selected_date.as_deref())
    }

    /// Move the displayed month by `delta` months; unbounded in both directions
    pub fn navigate(&mut self, delta: i32) {
        let (year, month) = shift_month(self.year, self.month, i64::from(delta));
        self.year = year;
        self.month = month;
    }

    /// Select an available date. Weekends, fully booked days and malformed
    /// strings are refused and leave the state untouched.
    pub fn select_date(&mut self, date: &str) -> bool {
        if !self.availability.is_selectable(date) {
            return false;
        }
        self.selected_date = Some(date.to_string());
        self.update_time_options();
        true
    }

    /// Select a time slot; an empty value clears the selection.
    /// Unknown or disabled slots are refused.
    pub fn select_time(&mut self, time: &str) -> bool {
        if time.is_empty() {
            self.selected_time = None;
            return true;
        }
        let selectable = self
            .time_options
            .iter()
            .any(|option| option.value == time && !option.disabled);
        if selectable {
            self.selected_time = Some(time.to_string());
        }
        selectable
    }

    /// Recompute disabled time options for the selected date only, and drop
    /// the chosen time if it is no longer offered.
    pub fn update_time_options(&mut self) {
        let Some(date) = self.selected_date.as_deref() else {
            for option in &mut self.time_options {
                option.disabled = false;
            }
            self.selected_time = None;
            return;
        };

        let booked = self.availability.booked_slots(date);
        for option in &mut self.time_options {
            option.disabled = booked.contains(&option.value);
        }

        let chosen_disabled = self.selected_time.as_ref().is_some_and(|time| {
            self.time_options
                .iter()
                .any(|option| option.disabled && &option.value == time)
        });
        if chosen_disabled {
            self.selected_time = None;
        }
    }
}
