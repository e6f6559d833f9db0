use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shiftbook_core::{
    errors::{BookingError, Entity},
    models::{
        DeleteResponse,
        appointment::Appointment,
        client::{Client, ClientRequest},
    },
};
use shiftbook_db::repositories::{appointment, client};
use std::sync::Arc;

use crate::{ApiState, handlers::ensure_unreferenced, middleware::error_handling::AppError};

fn validate(payload: &ClientRequest) -> Result<(), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "client name must not be empty".to_string(),
        )));
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn list_clients(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Client>>, AppError> {
    let clients = client::list_clients(&state.db_pool).await?;
    Ok(Json(clients.into_iter().map(Client::from).collect()))
}

#[axum::debug_handler]
pub async fn create_client(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ClientRequest>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    validate(&payload)?;
    let created = client::create_client(&state.db_pool, &payload).await?;
    tracing::info!("Client created: id={}", created.id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[axum::debug_handler]
pub async fn get_client(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<Client>, AppError> {
    let found = client::get_client_by_id(&state.db_pool, id)
        .await?
        .ok_or(BookingError::NotFound(Entity::Client))?;
    Ok(Json(found.into()))
}

#[axum::debug_handler]
pub async fn update_client(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
    Json(payload): Json<ClientRequest>,
) -> Result<Json<Client>, AppError> {
    validate(&payload)?;
    let updated = client::update_client(&state.db_pool, id, &payload)
        .await?
        .ok_or(BookingError::NotFound(Entity::Client))?;
    Ok(Json(updated.into()))
}

#[axum::debug_handler]
pub async fn delete_client(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, AppError> {
    ensure_unreferenced(&state, Entity::Client, id).await?;
    if client::delete_client(&state.db_pool, id).await? == 0 {
        return Err(AppError(BookingError::NotFound(Entity::Client)));
    }
    Ok(Json(DeleteResponse { id, deleted: true }))
}

#[axum::debug_handler]
pub async fn list_client_appointments(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    if !client::client_exists(&state.db_pool, id).await? {
        return Err(AppError(BookingError::NotFound(Entity::Client)));
    }
    let rows = appointment::list_appointments_by_client(&state.db_pool, id).await?;
    Ok(Json(rows.into_iter().map(Appointment::from).collect()))
}
