use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shared::{DemoBookingRequest, LogRequest, LogResponse};
use tracing::{debug, error, info, warn};

use crate::domain::{BookingError, BookingService};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub booking_service: BookingService,
}

impl AppState {
    pub fn new(booking_service: BookingService) -> Self {
        Self { booking_service }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match &self {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::SlotTaken { .. } => StatusCode::CONFLICT,
            BookingError::Storage(e) => {
                error!("Storage error: {:?}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response();
            }
        };
        (status, self.to_string()).into_response()
    }
}

/// Routes under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/booked_dates", get(get_booked_dates))
        .route("/booked_dates_times", get(get_booked_dates_times))
        .route("/book_demo", post(book_demo))
        .route("/logs", post(receive_log))
}

/// Axum handler function for GET /api/booked_dates
pub async fn get_booked_dates(State(state): State<AppState>) -> Result<impl IntoResponse, BookingError> {
    info!("GET /api/booked_dates");
    let dates = state.booking_service.booked_dates().await?;
    Ok(Json(dates))
}

/// Axum handler function for GET /api/booked_dates_times
pub async fn get_booked_dates_times(State(state): State<AppState>) -> Result<impl IntoResponse, BookingError> {
    info!("GET /api/booked_dates_times");
    let date_times = state.booking_service.booked_date_times().await?;
    Ok(Json(date_times))
}

/// Axum handler function for POST /api/book_demo
pub async fn book_demo(
    State(state): State<AppState>,
    Json(request): Json<DemoBookingRequest>,
) -> Result<impl IntoResponse, BookingError> {
    info!("POST /api/book_demo - {} {}", request.meeting_date, request.meeting_time);
    let response = state.booking_service.book_demo(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Axum handler function for POST /api/logs
pub async fn receive_log(Json(request): Json<LogRequest>) -> impl IntoResponse {
    let component = request.component.as_deref().unwrap_or("frontend");
    match request.level.as_str() {
        "error" => error!(target: "frontend", "[{}] {}", component, request.message),
        "warn" => warn!(target: "frontend", "[{}] {}", component, request.message),
        "debug" => debug!(target: "frontend", "[{}] {}", component, request.message),
        _ => info!(target: "frontend", "[{}] {}", component, request.message),
    }
    Json(LogResponse { success: true })
}
