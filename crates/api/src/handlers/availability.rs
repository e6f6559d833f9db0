//! # Availability Handlers
//!
//! `GET /api/availability?employee_id=&service_id=&date=` answers with the
//! free slots of one employee for one service on one date. All three query
//! parameters are required; a missing one is a validation error.

use axum::{
    Json,
    extract::{Query, State},
};
use shiftbook_core::{
    errors::BookingError,
    models::availability::{AvailabilityQuery, AvailabilityResponse},
};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

fn required<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| {
        AppError(BookingError::Validation(format!(
            "missing required query parameter '{name}'"
        )))
    })
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let employee_id = required(query.employee_id, "employee_id")?;
    let service_id = required(query.service_id, "service_id")?;
    let date = required(query.date, "date")?;

    let response = state
        .booking
        .compute_available_slots(employee_id, service_id, &date)
        .await?;

    tracing::debug!(
        "Availability computed: employee_id={}, service_id={}, date={}, slots={}",
        employee_id,
        service_id,
        response.date,
        response.slots.len()
    );
    Ok(Json(response))
}
