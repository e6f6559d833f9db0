//! # Error Handling Middleware
//!
//! Maps [`BookingError`] values to HTTP status codes and JSON error bodies of
//! the form `{"error": "<message>", "kind": "<kind>"}`.
//!
//! Store failures are logged with their full report and answered with an
//! opaque message, so database details never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use shiftbook_core::errors::BookingError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use shiftbook_api::middleware::error_handling::AppError;
/// use shiftbook_core::errors::{BookingError, Entity};
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(BookingError::NotFound(Entity::Client)));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::InvalidTimeFormat(_) => StatusCode::BAD_REQUEST,
            BookingError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::ScheduleConflict { .. } => StatusCode::CONFLICT,
            BookingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self.0 {
            BookingError::Store(report) => {
                error!(error = ?report, "Store failure while handling request");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({ "error": message, "kind": self.0.kind() }));

        (status, body).into_response()
    }
}

/// Allows `?` on `BookingResult` inside handlers.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as store errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Store(err))
    }
}

/// Maps a BookingError to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}

/// Turns failures of the tower middleware stack, such as a request timeout,
/// into the same JSON error shape handlers use.
pub async fn handle_middleware_error(err: tower::BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        let body = Json(json!({ "error": "Request timed out", "kind": "timeout" }));
        return (StatusCode::REQUEST_TIMEOUT, body).into_response();
    }

    error!(error = %err, "Unhandled middleware error");
    let body = Json(json!({ "error": "Internal server error", "kind": "internal" }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
