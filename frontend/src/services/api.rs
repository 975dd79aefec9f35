use gloo::net::http::{Request, Response};
use shared::availability::Sanitized;
use shared::{Availability, DemoBookingRequest, DemoBookingResponse, LogRequest};
use std::collections::BTreeMap;

/// API client for the booking backend. Requests are relative to the page origin,
/// which is where the backend serves the frontend from.
#[derive(Clone, Default, PartialEq)]
pub struct ApiClient;

impl ApiClient {
    pub fn new() -> Self {
        Self
    }

    /// Get the coarse list of booked dates
    pub async fn get_booked_dates(&self) -> Result<Sanitized<Vec<String>>, String> {
        let body = self.get_text("/api/booked_dates").await?;
        Ok(Availability::parse_booked_dates(&body))
    }

    /// Get booked time slots grouped by date
    pub async fn get_booked_dates_times(&self) -> Result<Sanitized<BTreeMap<String, Vec<String>>>, String> {
        let body = self.get_text("/api/booked_dates_times").await?;
        Ok(Availability::parse_booked_date_times(&body))
    }

    /// Book a demo meeting
    pub async fn book_demo(&self, request: &DemoBookingRequest) -> Result<DemoBookingResponse, String> {
        let response = Request::post("/api/book_demo")
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if response.ok() {
            response
                .json::<DemoBookingResponse>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        } else {
            Err(error_text(response).await)
        }
    }

    /// Forward a log entry to the backend
    pub async fn send_log(&self, request: &LogRequest) -> Result<(), String> {
        Request::post("/api/logs")
            .json(request)
            .map_err(|e| format!("Failed to serialize log: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Ok(())
    }

    /// Body of a successful GET; network failures and error statuses are errors.
    /// Shape checking is left to the caller.
    async fn get_text(&self, path: &str) -> Result<String, String> {
        let response = Request::get(path)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch {}: {}", path, e))?;

        if !response.ok() {
            return Err(error_text(response).await);
        }
        response
            .text()
            .await
            .map_err(|e| format!("Failed to read {}: {}", path, e))
    }
}

async fn error_text(response: Response) -> String {
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    if text.is_empty() {
        format!("Server error {}", status)
    } else {
        text
    }
}
