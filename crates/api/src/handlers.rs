pub mod appointments;
pub mod availability;
pub mod clients;
pub mod employees;
pub mod services;

use shiftbook_core::errors::{BookingError, Entity};
use shiftbook_db::repositories::appointment;

use crate::{ApiState, middleware::error_handling::AppError};

/// Refuses to delete an entity that appointments still point at.
pub(crate) async fn ensure_unreferenced(
    state: &ApiState,
    entity: Entity,
    id: i32,
) -> Result<(), AppError> {
    let count = appointment::count_referencing(&state.db_pool, entity, id).await?;
    if count > 0 {
        return Err(AppError(BookingError::Validation(format!(
            "{entity} {id} is referenced by {count} appointment(s) and cannot be deleted"
        ))));
    }
    Ok(())
}
