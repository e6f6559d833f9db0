//! # Conflict Validator
//!
//! Decides whether a candidate appointment may be committed. Checks run in a
//! fixed order and stop at the first failure:
//!
//! 1. the client exists
//! 2. the employee exists
//! 3. the service exists
//! 4. date, start and end parse (a missing end is derived from the service duration)
//! 5. end is strictly after start
//! 6. no non-cancelled appointment of the same employee on the same date overlaps
//!
//! A candidate whose own status is non-blocking skips step 6, matching the
//! stores, which only enforce the rule between blocking appointments.
//!
//! The validator only reads. Persisting is the caller's job, and the store is
//! expected to re-check overlap atomically on write.

use chrono::{DateTime, Duration, FixedOffset};
use tracing::{debug, warn};

use crate::errors::{BookingError, BookingResult, Entity};
use crate::models::appointment::{AppointmentRequest, AppointmentStatus, NewAppointment};
use crate::store::BookingStore;
use crate::time::{Interval, TimeOfDay, anchor, parse_date, parse_time_of_day};

/// Statuses that never block a time range.
pub const NON_BLOCKING_STATUSES: &[AppointmentStatus] = &[AppointmentStatus::Cancelled];

async fn require<F>(exists: F, entity: Entity) -> BookingResult<()>
where
    F: std::future::Future<Output = BookingResult<bool>>,
{
    if exists.await? {
        Ok(())
    } else {
        Err(BookingError::NotFound(entity))
    }
}

fn end_from_duration(start: TimeOfDay, minutes: i32) -> BookingResult<TimeOfDay> {
    let (end, wrapped) = start
        .as_naive()
        .overflowing_add_signed(Duration::minutes(i64::from(minutes)));
    let end = TimeOfDay::from_naive(end);
    if wrapped != 0 || minutes <= 0 {
        return Err(BookingError::InvalidRange { start, end });
    }
    Ok(end)
}

/// Validates `candidate`, returning the parsed appointment ready to persist.
///
/// `appointment_id` is the id of the appointment being updated, if any; that
/// appointment is ignored by the overlap check.
pub async fn validate_appointment<S>(
    store: &S,
    candidate: &AppointmentRequest,
    appointment_id: Option<i32>,
    offset: FixedOffset,
) -> BookingResult<NewAppointment>
where
    S: BookingStore + ?Sized,
{
    require(store.client_exists(candidate.client_id), Entity::Client).await?;
    require(store.employee_exists(candidate.employee_id), Entity::Employee).await?;
    require(store.service_exists(candidate.service_id), Entity::Service).await?;

    let date = parse_date(&candidate.date)?;
    let start = parse_time_of_day(&candidate.start_time)?;
    let end = match &candidate.end_time {
        Some(end) => parse_time_of_day(end)?,
        None => end_from_duration(start, store.get_service_duration(candidate.service_id).await?)?,
    };

    if end <= start {
        return Err(BookingError::InvalidRange { start, end });
    }

    let validated = NewAppointment {
        client_id: candidate.client_id,
        employee_id: candidate.employee_id,
        service_id: candidate.service_id,
        date,
        start_time: start,
        end_time: end,
        status: candidate.status,
        duration_min: (end.minutes_since_midnight() - start.minutes_since_midnight()) as i32,
    };

    if NON_BLOCKING_STATUSES.contains(&candidate.status) {
        return Ok(validated);
    }

    let requested = Interval::new(anchor(date, start, offset), anchor(date, end, offset));
    let booked = store
        .list_appointments(candidate.employee_id, date, NON_BLOCKING_STATUSES)
        .await?;

    for slot in booked.iter().filter(|slot| Some(slot.id) != appointment_id) {
        let existing = match slot.interval(date, offset) {
            Ok(interval) => interval,
            Err(e) => {
                warn!(appointment_id = slot.id, error = %e, "Skipping unreadable stored appointment");
                continue;
            }
        };

        if requested.overlaps(&existing) {
            debug!(
                employee_id = candidate.employee_id,
                %date,
                conflicting_id = slot.id,
                "Candidate appointment overlaps an existing booking"
            );
            return Err(BookingError::ScheduleConflict {
                employee_id: candidate.employee_id,
                date,
                start: time_of(existing.start),
                end: time_of(existing.end),
            });
        }
    }

    Ok(validated)
}

fn time_of(instant: DateTime<FixedOffset>) -> TimeOfDay {
    TimeOfDay::from_naive(instant.time())
}
