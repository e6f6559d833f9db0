use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shiftbook_core::{
    errors::{BookingError, Entity},
    models::{
        DeleteResponse,
        employee::{Employee, EmployeeRequest},
    },
};
use shiftbook_db::repositories::employee;
use std::sync::Arc;

use crate::{ApiState, handlers::ensure_unreferenced, middleware::error_handling::AppError};

fn validate(payload: &EmployeeRequest) -> Result<(), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "employee name must not be empty".to_string(),
        )));
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn list_employees(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = employee::list_employees(&state.db_pool).await?;
    Ok(Json(employees.into_iter().map(Employee::from).collect()))
}

#[axum::debug_handler]
pub async fn create_employee(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<EmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    validate(&payload)?;
    let created = employee::create_employee(&state.db_pool, &payload).await?;
    tracing::info!("Employee created: id={}", created.id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[axum::debug_handler]
pub async fn get_employee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<Employee>, AppError> {
    let found = employee::get_employee_by_id(&state.db_pool, id)
        .await?
        .ok_or(BookingError::NotFound(Entity::Employee))?;
    Ok(Json(found.into()))
}

#[axum::debug_handler]
pub async fn update_employee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
    Json(payload): Json<EmployeeRequest>,
) -> Result<Json<Employee>, AppError> {
    validate(&payload)?;
    let updated = employee::update_employee(&state.db_pool, id, &payload)
        .await?
        .ok_or(BookingError::NotFound(Entity::Employee))?;
    Ok(Json(updated.into()))
}

#[axum::debug_handler]
pub async fn delete_employee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, AppError> {
    ensure_unreferenced(&state, Entity::Employee, id).await?;
    if employee::delete_employee(&state.db_pool, id).await? == 0 {
        return Err(AppError(BookingError::NotFound(Entity::Employee)));
    }
    Ok(Json(DeleteResponse { id, deleted: true }))
}
