//! # Persistence Collaborator
//!
//! The scheduling core never talks to a database directly. It reads and writes
//! through [`BookingStore`], which the `shiftbook-db` crate implements on top of
//! PostgreSQL and which tests replace with mocks or in-memory fakes.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::BookingResult;
use crate::models::appointment::{AppointmentStatus, BookedSlot, NewAppointment};

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn client_exists(&self, id: i32) -> BookingResult<bool>;

    async fn employee_exists(&self, id: i32) -> BookingResult<bool>;

    async fn service_exists(&self, id: i32) -> BookingResult<bool>;

    async fn appointment_exists(&self, id: i32) -> BookingResult<bool>;

    /// Duration of a service in minutes.
    ///
    /// Fails with `NotFound(Entity::Service)` when the service does not exist.
    async fn get_service_duration(&self, id: i32) -> BookingResult<i32>;

    /// Appointments of `employee_id` on `date`, ordered by start time, leaving
    /// out any whose status is in `exclude_statuses`.
    async fn list_appointments(
        &self,
        employee_id: i32,
        date: NaiveDate,
        exclude_statuses: &[AppointmentStatus],
    ) -> BookingResult<Vec<BookedSlot>>;

    /// Persists a validated appointment and returns its id.
    ///
    /// Implementations must reject an insert that would double-book the
    /// employee with `ScheduleConflict`, even when a concurrent request passed
    /// validation at the same time.
    async fn insert_appointment(&self, appointment: &NewAppointment) -> BookingResult<i32>;

    /// Overwrites appointment `id` and returns the number of rows affected.
    async fn update_appointment(&self, id: i32, appointment: &NewAppointment)
        -> BookingResult<u64>;
}
