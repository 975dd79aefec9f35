use std::sync::Arc;

use axum::{http::HeaderValue, http::Method, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod email;
mod rest;
mod storage;

use config::Config;
use domain::BookingService;
use email::EmailService;
use rest::AppState;
use storage::CsvBookingStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!("Starting with config: {:?}", config);

    let storage = CsvBookingStorage::new(&config.data_dir)?;
    info!("Storing bookings in {}", storage.file_path().display());

    let email = EmailService::from_config(config.smtp.as_ref())?;
    let booking_service =
        BookingService::new(Arc::new(storage), config.meeting_link_base.clone()).with_email(email);
    let state = AppState::new(booking_service);

    // CORS setup to allow the dev frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", rest::api_router())
        .fallback_service(ServeDir::new(&config.frontend_dist))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Listening on {}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
