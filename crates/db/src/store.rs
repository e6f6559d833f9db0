use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Report;
use shiftbook_core::errors::{BookingError, BookingResult, Entity};
use shiftbook_core::models::appointment::{AppointmentStatus, BookedSlot, NewAppointment};
use shiftbook_core::store::BookingStore;
use tracing::warn;

use crate::DbPool;
use crate::models::parse_status;
use crate::repositories::{appointment, client, employee, service};

/// SQLSTATE raised by the `no_double_booking` exclusion constraint.
const EXCLUSION_VIOLATION: &str = "23P01";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// [`BookingStore`] backed by the PostgreSQL schema in [`crate::schema`].
#[derive(Debug, Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Domain error for a constraint violation raised by a write, if any.
fn constraint_error(err: &Report, appointment: &NewAppointment) -> Option<BookingError> {
    let db_err = err.downcast_ref::<sqlx::Error>()?.as_database_error()?;

    match &*db_err.code()? {
        EXCLUSION_VIOLATION => {
            warn!(
                employee_id = appointment.employee_id,
                date = %appointment.date,
                "Double-booking rejected by the database"
            );
            Some(BookingError::ScheduleConflict {
                employee_id: appointment.employee_id,
                date: appointment.date,
                start: appointment.start_time,
                end: appointment.end_time,
            })
        }
        FOREIGN_KEY_VIOLATION => {
            let constraint = db_err.constraint()?;
            let entity = if constraint.contains("client_id") {
                Entity::Client
            } else if constraint.contains("employee_id") {
                Entity::Employee
            } else if constraint.contains("service_id") {
                Entity::Service
            } else {
                return None;
            };
            Some(BookingError::NotFound(entity))
        }
        _ => None,
    }
}

fn map_write_error(err: Report, appointment: &NewAppointment) -> BookingError {
    constraint_error(&err, appointment).unwrap_or_else(|| BookingError::Store(err))
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn client_exists(&self, id: i32) -> BookingResult<bool> {
        Ok(client::client_exists(&self.pool, id).await?)
    }

    async fn employee_exists(&self, id: i32) -> BookingResult<bool> {
        Ok(employee::employee_exists(&self.pool, id).await?)
    }

    async fn service_exists(&self, id: i32) -> BookingResult<bool> {
        Ok(service::get_service_by_id(&self.pool, id).await?.is_some())
    }

    async fn appointment_exists(&self, id: i32) -> BookingResult<bool> {
        Ok(appointment::appointment_exists(&self.pool, id).await?)
    }

    async fn get_service_duration(&self, id: i32) -> BookingResult<i32> {
        service::get_service_duration(&self.pool, id)
            .await?
            .ok_or(BookingError::NotFound(Entity::Service))
    }

    async fn list_appointments(
        &self,
        employee_id: i32,
        date: NaiveDate,
        exclude_statuses: &[AppointmentStatus],
    ) -> BookingResult<Vec<BookedSlot>> {
        let rows = appointment::list_booked_slots(&self.pool, employee_id, date).await?;

        Ok(rows
            .into_iter()
            .map(|row| BookedSlot {
                status: parse_status(row.id, &row.status),
                id: row.id,
                start_time: row.start_time,
                end_time: row.end_time,
            })
            .filter(|slot| !exclude_statuses.contains(&slot.status))
            .collect())
    }

    async fn insert_appointment(&self, new: &NewAppointment) -> BookingResult<i32> {
        appointment::create_appointment(&self.pool, new)
            .await
            .map(|row| row.id)
            .map_err(|e| map_write_error(e, new))
    }

    async fn update_appointment(&self, id: i32, new: &NewAppointment) -> BookingResult<u64> {
        appointment::update_appointment(&self.pool, id, new)
            .await
            .map_err(|e| map_write_error(e, new))
    }
}
