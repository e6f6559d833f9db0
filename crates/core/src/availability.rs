//! # Availability Calculator
//!
//! Computes the free slots of one employee for one service on one date.
//!
//! The working window of the day is cut into consecutive slots of exactly the
//! service's duration, starting at the window's opening time. A trailing
//! remainder shorter than the duration is never offered. Any slot that
//! intersects a non-cancelled appointment of the employee on that date is
//! dropped; the rest are returned in increasing time order.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use tracing::{debug, warn};

use crate::errors::{BookingError, BookingResult, Entity};
use crate::hours::WorkingHours;
use crate::store::BookingStore;
use crate::time::{Interval, TimeOfDay, anchor};
use crate::validator::NON_BLOCKING_STATUSES;

/// A free interval of exactly one service's duration.
pub type Slot = Interval<TimeOfDay>;

pub async fn compute_available_slots<S>(
    store: &S,
    hours: &WorkingHours,
    offset: FixedOffset,
    employee_id: i32,
    service_id: i32,
    date: NaiveDate,
) -> BookingResult<Vec<Slot>>
where
    S: BookingStore + ?Sized,
{
    let duration = store.get_service_duration(service_id).await?;
    if duration <= 0 {
        return Err(BookingError::Validation(format!(
            "service {service_id} has a non-positive duration of {duration} minutes"
        )));
    }
    if !store.employee_exists(employee_id).await? {
        return Err(BookingError::NotFound(Entity::Employee));
    }

    let booked: Vec<Interval<DateTime<FixedOffset>>> = store
        .list_appointments(employee_id, date, NON_BLOCKING_STATUSES)
        .await?
        .iter()
        .filter_map(|slot| match slot.interval(date, offset) {
            Ok(interval) => Some(interval),
            Err(e) => {
                warn!(appointment_id = slot.id, error = %e, "Skipping unreadable stored appointment");
                None
            }
        })
        .collect();

    let Some(window) = hours.window_for(employee_id, date) else {
        debug!(employee_id, %date, "No working hours on this date");
        return Ok(Vec::new());
    };

    let step = Duration::minutes(i64::from(duration));
    let work_end = anchor(date, window.end, offset);
    let mut cursor = anchor(date, window.start, offset);
    let mut slots = Vec::new();

    while cursor + step <= work_end {
        let candidate = Interval::new(cursor, cursor + step);
        if !booked.iter().any(|b| candidate.overlaps(b)) {
            slots.push(Interval::new(
                TimeOfDay::from_naive(candidate.start.time()),
                TimeOfDay::from_naive(candidate.end.time()),
            ));
        }
        cursor = candidate.end;
    }

    debug!(
        employee_id,
        service_id,
        %date,
        booked = booked.len(),
        free = slots.len(),
        "Computed available slots"
    );
    Ok(slots)
}
