//! Booking availability as reported by the backend.
//!
//! Responses are sanitized before use: anything that does not have the
//! expected shape is dropped, so a malformed body reads as "no bookings known".

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::calendar::{is_weekend, parse_iso_date, DayAvailability};

/// Number of bookable slots per day
pub const DAILY_SLOT_CAPACITY: usize = 7;

/// Result of sanitizing a response body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sanitized<T> {
    pub data: T,
    /// Number of entries (or whole bodies) that were discarded
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Availability {
    /// Coarse list from `/api/booked_dates`
    booked_dates: BTreeSet<String>,
    /// Per-date booked slots from `/api/booked_dates_times`
    booked_date_times: BTreeMap<String, Vec<String>>,
}

impl Availability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the coarse booked-dates list wholesale
    pub fn replace_booked_dates<I>(&mut self, dates: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.booked_dates = dates.into_iter().collect();
    }

    /// Replace the date -> booked slots mapping wholesale
    pub fn replace_booked_date_times<I>(&mut self, date_times: I)
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        self.booked_date_times = date_times.into_iter().collect();
    }

    pub fn booked_dates(&self) -> impl Iterator<Item = &str> {
        self.booked_dates.iter().map(String::as_str)
    }

    /// Booked `HH:MM` slots for a date, empty when none are known
    pub fn booked_slots(&self, date: &str) -> &[String] {
        self.booked_date_times
            .get(date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_slot_booked(&self, date: &str, time: &str) -> bool {
        self.booked_slots(date).iter().any(|slot| slot == time)
    }

    pub fn is_fully_booked(&self, date: &str) -> bool {
        self.booked_slots(date).len() >= DAILY_SLOT_CAPACITY
    }

    /// Availability of a calendar day; weekends win over fully booked
    pub fn day_availability(&self, date: NaiveDate, date_str: &str) -> DayAvailability {
        if is_weekend(date) {
            DayAvailability::Weekend
        } else if self.is_fully_booked(date_str) {
            DayAvailability::FullyBooked
        } else {
            DayAvailability::Available
        }
    }

    /// Whether an ISO date string can be picked by a visitor
    pub fn is_selectable(&self, date_str: &str) -> bool {
        parse_iso_date(date_str)
            .map(|date| self.day_availability(date, date_str).is_available())
            .unwrap_or(false)
    }

    /// Sanitize a `/api/booked_dates` body: a JSON array of ISO date strings
    pub fn parse_booked_dates(body: &str) -> Sanitized<Vec<String>> {
        let Ok(Value::Array(items)) = serde_json::from_str::<Value>(body) else {
            return Sanitized { data: Vec::new(), rejected: 1 };
        };

        let mut sanitized: Sanitized<Vec<String>> = Sanitized::default();
        for item in items {
            match item {
                Value::String(date) if parse_iso_date(&date).is_some() => sanitized.data.push(date),
                _ => sanitized.rejected += 1,
            }
        }
        sanitized
    }

    /// Sanitize a `/api/booked_dates_times` body: a JSON object of date -> `HH:MM` array
    pub fn parse_booked_date_times(body: &str) -> Sanitized<BTreeMap<String, Vec<String>>> {
        let Ok(Value::Object(entries)) = serde_json::from_str::<Value>(body) else {
            return Sanitized { data: BTreeMap::new(), rejected: 1 };
        };

        let mut sanitized: Sanitized<BTreeMap<String, Vec<String>>> = Sanitized::default();
        for (date, times) in entries {
            let Value::Array(times) = times else {
                sanitized.rejected += 1;
                continue;
            };
            if parse_iso_date(&date).is_none() {
                sanitized.rejected += 1;
                continue;
            }

            let mut slots = Vec::with_capacity(times.len());
            for time in times {
                match time {
                    Value::String(time) => slots.push(time),
                    _ => sanitized.rejected += 1,
                }
            }
            sanitized.data.insert(date, slots);
        }
        sanitized
    }
}
