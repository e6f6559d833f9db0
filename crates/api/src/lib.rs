//! # Shiftbook API
//!
//! The web server of the Shiftbook booking backend. It exposes CRUD endpoints
//! for clients, employees, services and appointments, plus the availability
//! query.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into repository calls or into calls on the
//!   scheduling core's [`BookingService`]
//! - **Middleware**: Error to HTTP response mapping
//! - **Config**: Environment configuration, including working hours and the
//!   business UTC offset
//!
//! Appointment writes always go through [`BookingService`], so every create
//! and update passes the same conflict validator.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling for handlers and the middleware stack
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr};
use shiftbook_core::service::BookingService;
use shiftbook_db::PgBookingStore;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for the CRUD repositories
    pub db_pool: PgPool,
    /// Scheduling core used for appointment writes and availability
    pub booking: BookingService,
}

impl ApiState {
    /// State whose scheduling core persists through `db_pool`.
    pub fn new(db_pool: PgPool, config: &config::ApiConfig) -> Self {
        let booking = BookingService::new(Arc::new(PgBookingStore::new(db_pool.clone())))
            .with_hours(config.working_hours.clone())
            .with_offset(config.business_offset);

        Self { db_pool, booking }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Entity management endpoints
        .merge(routes::clients::routes())
        .merge(routes::employees::routes())
        .merge(routes::services::routes())
        // Appointment endpoints, validated by the scheduling core
        .merge(routes::appointments::routes())
        // Free slot queries
        .merge(routes::availability::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("Invalid API_CORS_ORIGINS value")?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins))
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = shiftbook_api::config::ApiConfig::from_env()?;
/// let db_pool = shiftbook_db::create_pool(&config.database_url).await?;
/// shiftbook_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(db_pool, &config));
    info!(
        offset = %state.booking.offset(),
        default_hours = %state.booking.hours().default_window(),
        "Scheduling configuration loaded"
    );

    let app = router(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(
                middleware::error_handling::handle_middleware_error,
            ))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
