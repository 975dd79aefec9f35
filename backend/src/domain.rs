use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use shared::calendar::{is_weekend, parse_iso_date};
use shared::{DemoBookingRequest, DemoBookingResponse, DEFAULT_TIME_SLOTS};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::email::EmailService;
use crate::storage::{BookingStorage, DemoBooking};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),
    #[error("Selected date and time is already booked ({date} {time}). Please choose another slot.")]
    SlotTaken { date: String, time: String },
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Booking rules on top of a `BookingStorage`
#[derive(Clone)]
pub struct BookingService {
    storage: Arc<dyn BookingStorage>,
    /// Held across the duplicate check and the write
    write_lock: Arc<Mutex<()>>,
    meeting_link_base: String,
    email: EmailService,
}

impl BookingService {
    pub fn new(storage: Arc<dyn BookingStorage>, meeting_link_base: impl Into<String>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
            meeting_link_base: meeting_link_base.into(),
            email: EmailService::disabled(),
        }
    }

    pub fn with_email(mut self, email: EmailService) -> Self {
        self.email = email;
        self
    }

    /// One date per stored booking, in insertion order
    pub async fn booked_dates(&self) -> Result<Vec<String>, BookingError> {
        let bookings = self.storage.list_bookings().await?;
        Ok(bookings.into_iter().map(|b| b.meeting_date).collect())
    }

    /// Booked times grouped by date
    pub async fn booked_date_times(&self) -> Result<BTreeMap<String, Vec<String>>, BookingError> {
        let bookings = self.storage.list_bookings().await?;
        let mut result: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for booking in bookings {
            result
                .entry(booking.meeting_date)
                .or_default()
                .push(booking.meeting_time);
        }
        Ok(result)
    }

    pub async fn book_demo(&self, request: DemoBookingRequest) -> Result<DemoBookingResponse, BookingError> {
        validate_request(&request)?;

        let guard = self.write_lock.lock().await;

        let existing = self.storage.list_bookings().await?;
        let taken = existing.iter().any(|b| {
            b.meeting_date == request.meeting_date && b.meeting_time == request.meeting_time
        });
        if taken {
            warn!("Rejected booking for taken slot {} {}", request.meeting_date, request.meeting_time);
            return Err(BookingError::SlotTaken {
                date: request.meeting_date,
                time: request.meeting_time,
            });
        }

        let meeting_link = meeting_link(&self.meeting_link_base, &request.meeting_date, &request.meeting_time);
        let booking = DemoBooking {
            id: uuid::Uuid::new_v4().to_string(),
            firm_name: request.firm_name.trim().to_string(),
            company_type: request.company_type.trim().to_string(),
            person_name: request.person_name.trim().to_string(),
            title: request.title.trim().to_string(),
            email: request.email.trim().to_string(),
            team_size: request.team_size.trim().to_string(),
            meeting_date: request.meeting_date,
            meeting_time: request.meeting_time,
            meeting_link: meeting_link.clone(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.storage.store_booking(&booking).await?;
        drop(guard);

        info!("Booked demo {} on {} at {}", booking.id, booking.meeting_date, booking.meeting_time);
        self.email.notify_booked(&booking).await;

        Ok(DemoBookingResponse {
            success: true,
            message: format!(
                "Demo booked successfully for {} at {}. We will send you the meeting link shortly before your scheduled time.",
                booking.meeting_date, booking.meeting_time
            ),
            meeting_link,
        })
    }
}

fn validate_request(request: &DemoBookingRequest) -> Result<(), BookingError> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(BookingError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    if !request.email.contains('@') {
        return Err(BookingError::Validation(format!("Invalid email address: {}", request.email)));
    }

    let date = parse_iso_date(&request.meeting_date).ok_or_else(|| {
        BookingError::Validation(format!("Invalid meeting date: {}", request.meeting_date))
    })?;
    if is_weekend(date) {
        return Err(BookingError::Validation(format!(
            "Meetings cannot be booked on weekends: {}",
            request.meeting_date
        )));
    }

    if !DEFAULT_TIME_SLOTS.contains(&request.meeting_time.as_str()) {
        return Err(BookingError::Validation(format!(
            "Invalid meeting time: {}",
            request.meeting_time
        )));
    }

    Ok(())
}

/// `{base}-{YYYYMMDD}-{HHMM}`
pub fn meeting_link(base: &str, date: &str, time: &str) -> String {
    format!("{}-{}-{}", base, date.replace('-', ""), time.replace(':', ""))
}
