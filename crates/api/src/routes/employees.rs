use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::employees};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/api/employees/:id",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
}
