use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod availability;
pub mod calendar;
pub mod widget;

pub use availability::{Availability, DAILY_SLOT_CAPACITY};
pub use calendar::{CalendarCell, DayAvailability, DayCell, MonthGrid, DAY_HEADERS};
pub use widget::{BookingCalendar, TimeOption, DEFAULT_TIME_SLOTS};

/// Response body of `GET /api/booked_dates`: one `YYYY-MM-DD` entry per booking
pub type BookedDatesResponse = Vec<String>;

/// Response body of `GET /api/booked_dates_times`: date -> booked `HH:MM` slots
pub type BookedDateTimesResponse = BTreeMap<String, Vec<String>>;

/// Request to book a demo meeting. Absent fields deserialize as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DemoBookingRequest {
    pub firm_name: String,
    pub company_type: String,
    pub person_name: String,
    pub title: String,
    pub email: String,
    pub team_size: String,
    /// Meeting date in YYYY-MM-DD format
    pub meeting_date: String,
    /// Meeting time in HH:MM format, one of the bookable slots
    pub meeting_time: String,
}

impl DemoBookingRequest {
    /// Names of the required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("firm_name", &self.firm_name),
            ("company_type", &self.company_type),
            ("person_name", &self.person_name),
            ("title", &self.title),
            ("email", &self.email),
            ("team_size", &self.team_size),
            ("meeting_date", &self.meeting_date),
            ("meeting_time", &self.meeting_time),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Response after a demo booking was accepted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoBookingResponse {
    pub success: bool,
    pub message: String,
    pub meeting_link: String,
}

/// Log entry forwarded from the browser to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

/// Returns the month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> DemoBookingRequest {
        DemoBookingRequest {
            firm_name: "Acme Capital".to_string(),
            company_type: "Venture".to_string(),
            person_name: "Sam Lee".to_string(),
            title: "Partner".to_string(),
            email: "sam@acme.test".to_string(),
            team_size: "11-50".to_string(),
            meeting_date: "2024-03-07".to_string(),
            meeting_time: "09:00".to_string(),
        }
    }

    #[test]
    fn test_missing_fields_empty_for_complete_request() {
        assert!(complete_request().missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_reports_blank_values() {
        let request = DemoBookingRequest {
            email: "   ".to_string(),
            meeting_time: String::new(),
            ..complete_request()
        };
        assert_eq!(request.missing_fields(), vec!["email", "meeting_time"]);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Invalid Month");
    }

    #[test]
    fn test_booking_request_wire_format() {
        let json = serde_json::to_value(complete_request()).unwrap();
        assert_eq!(json["meeting_date"], "2024-03-07");
        assert_eq!(json["meeting_time"], "09:00");
        assert_eq!(json["firm_name"], "Acme Capital");
    }
}
