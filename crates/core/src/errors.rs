use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::TimeOfDay;

/// Entities an appointment may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Client,
    Employee,
    Service,
    Appointment,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Client => "client",
            Entity::Employee => "employee",
            Entity::Service => "service",
            Entity::Appointment => "appointment",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(Entity),

    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Invalid time range: end {end} must be after start {start}")]
    InvalidRange { start: TimeOfDay, end: TimeOfDay },

    #[error("Schedule conflict: employee {employee_id} is already booked on {date} between {start} and {end}")]
    ScheduleConflict {
        employee_id: i32,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] eyre::Report),
}

impl BookingError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::NotFound(_) => "not_found",
            BookingError::InvalidTimeFormat(_) => "invalid_time_format",
            BookingError::InvalidRange { .. } => "invalid_range",
            BookingError::ScheduleConflict { .. } => "schedule_conflict",
            BookingError::Validation(_) => "validation",
            BookingError::Store(_) => "store",
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
