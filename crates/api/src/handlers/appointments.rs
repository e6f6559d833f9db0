use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shiftbook_core::{
    errors::{BookingError, Entity},
    models::{
        DeleteResponse,
        appointment::{Appointment, AppointmentRequest},
    },
};
use shiftbook_db::repositories::appointment;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let rows = appointment::list_appointments(&state.db_pool).await?;
    Ok(Json(rows.into_iter().map(Appointment::from).collect()))
}

/// Books an appointment after running it through the conflict validator.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let created = state.booking.create_appointment(&payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<Appointment>, AppError> {
    let row = appointment::get_appointment_by_id(&state.db_pool, id)
        .await?
        .ok_or(BookingError::NotFound(Entity::Appointment))?;
    Ok(Json(row.into()))
}

/// Replaces an appointment. The new values are validated exactly like a
/// create, ignoring the appointment's own current booking.
#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
    Json(payload): Json<AppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let updated = state.booking.update_appointment(id, &payload).await?;
    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, AppError> {
    if appointment::delete_appointment(&state.db_pool, id).await? == 0 {
        return Err(AppError(BookingError::NotFound(Entity::Appointment)));
    }
    tracing::info!("Appointment deleted: id={}", id);
    Ok(Json(DeleteResponse { id, deleted: true }))
}
