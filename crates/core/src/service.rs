use std::sync::Arc;

use chrono::FixedOffset;
use tracing::info;

use crate::availability::{Slot, compute_available_slots};
use crate::errors::{BookingError, BookingResult, Entity};
use crate::hours::WorkingHours;
use crate::models::appointment::{Appointment, AppointmentRequest, NewAppointment};
use crate::models::availability::AvailabilityResponse;
use crate::store::BookingStore;
use crate::time::{default_offset, parse_date};
use crate::validator;

/// Entry point of the scheduling core.
///
/// Owns the persistence collaborator and the scheduling configuration, and
/// runs the same validator in front of every create and update.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    hours: WorkingHours,
    offset: FixedOffset,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self {
            store,
            hours: WorkingHours::default(),
            offset: default_offset(),
        }
    }

    pub fn with_hours(mut self, hours: WorkingHours) -> Self {
        self.hours = hours;
        self
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn hours(&self) -> &WorkingHours {
        &self.hours
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub async fn validate_appointment(
        &self,
        candidate: &AppointmentRequest,
    ) -> BookingResult<NewAppointment> {
        validator::validate_appointment(self.store.as_ref(), candidate, None, self.offset).await
    }

    pub async fn compute_available_slots(
        &self,
        employee_id: i32,
        service_id: i32,
        date: &str,
    ) -> BookingResult<AvailabilityResponse> {
        let date = parse_date(date)?;
        let slots: Vec<Slot> = compute_available_slots(
            self.store.as_ref(),
            &self.hours,
            self.offset,
            employee_id,
            service_id,
            date,
        )
        .await?;

        Ok(AvailabilityResponse {
            employee_id,
            service_id,
            date,
            slots,
        })
    }

    pub async fn create_appointment(
        &self,
        candidate: &AppointmentRequest,
    ) -> BookingResult<Appointment> {
        let validated = self.validate_appointment(candidate).await?;
        let id = self.store.insert_appointment(&validated).await?;

        info!(
            appointment_id = id,
            employee_id = validated.employee_id,
            date = %validated.date,
            start = %validated.start_time,
            end = %validated.end_time,
            "Appointment created"
        );
        Ok(validated.into_appointment(id))
    }

    pub async fn update_appointment(
        &self,
        id: i32,
        candidate: &AppointmentRequest,
    ) -> BookingResult<Appointment> {
        if !self.store.appointment_exists(id).await? {
            return Err(BookingError::NotFound(Entity::Appointment));
        }
        let validated =
            validator::validate_appointment(self.store.as_ref(), candidate, Some(id), self.offset)
                .await?;
        let rows = self.store.update_appointment(id, &validated).await?;
        if rows == 0 {
            return Err(BookingError::NotFound(Entity::Appointment));
        }

        info!(appointment_id = id, status = %validated.status, "Appointment updated");
        Ok(validated.into_appointment(id))
    }
}
