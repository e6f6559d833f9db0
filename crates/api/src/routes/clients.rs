use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::clients};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/api/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/api/clients/:id/appointments",
            get(clients::list_client_appointments),
        )
}
