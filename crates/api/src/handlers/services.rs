use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shiftbook_core::{
    errors::{BookingError, Entity},
    models::{
        DeleteResponse,
        service::{Service, ServiceRequest},
    },
};
use shiftbook_db::repositories::service;
use std::sync::Arc;

use crate::{ApiState, handlers::ensure_unreferenced, middleware::error_handling::AppError};

/// A service sizes availability slots, so its duration must be positive.
fn validate(payload: &ServiceRequest) -> Result<(), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "service name must not be empty".to_string(),
        )));
    }
    if payload.duration_min <= 0 {
        return Err(AppError(BookingError::Validation(format!(
            "service duration must be positive, got {} minutes",
            payload.duration_min
        ))));
    }
    if payload.price < 0.0 {
        return Err(AppError(BookingError::Validation(
            "service price must not be negative".to_string(),
        )));
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = service::list_services(&state.db_pool).await?;
    Ok(Json(services.into_iter().map(Service::from).collect()))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    validate(&payload)?;
    let created = service::create_service(&state.db_pool, &payload).await?;
    tracing::info!("Service created: id={}", created.id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<Service>, AppError> {
    let found = service::get_service_by_id(&state.db_pool, id)
        .await?
        .ok_or(BookingError::NotFound(Entity::Service))?;
    Ok(Json(found.into()))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
    Json(payload): Json<ServiceRequest>,
) -> Result<Json<Service>, AppError> {
    validate(&payload)?;
    let updated = service::update_service(&state.db_pool, id, &payload)
        .await?
        .ok_or(BookingError::NotFound(Entity::Service))?;
    Ok(Json(updated.into()))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, AppError> {
    ensure_unreferenced(&state, Entity::Service, id).await?;
    if service::delete_service(&state.db_pool, id).await? == 0 {
        return Err(AppError(BookingError::NotFound(Entity::Service)));
    }
    Ok(Json(DeleteResponse { id, deleted: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, duration_min: i32, price: f64) -> ServiceRequest {
        ServiceRequest {
            name: name.to_string(),
            duration_min,
            price,
        }
    }

    #[test]
    fn test_service_payload_validation() {
        assert!(validate(&request("Corte", 30, 10.0)).is_ok());
        assert!(validate(&request("  ", 30, 10.0)).is_err());
        assert!(validate(&request("Corte", 0, 10.0)).is_err());
        assert!(validate(&request("Corte", 30, -1.0)).is_err());
    }
}
