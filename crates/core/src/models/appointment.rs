use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::time::{Interval, TimeOfDay, normalize_stored};

/// Lifecycle state of an appointment.
///
/// Values written by the Spanish-language frontend (`pendiente`,
/// `confirmado`, `cancelado`, `completado`) are accepted as aliases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    #[serde(alias = "pendiente")]
    Pending,
    #[serde(alias = "confirmado")]
    Confirmed,
    #[serde(alias = "cancelado")]
    Cancelled,
    #[serde(alias = "completado")]
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" | "pendiente" => Ok(AppointmentStatus::Pending),
            "confirmed" | "confirmado" => Ok(AppointmentStatus::Confirmed),
            "cancelled" | "canceled" | "cancelado" => Ok(AppointmentStatus::Cancelled),
            "completed" | "completado" => Ok(AppointmentStatus::Completed),
            other => Err(BookingError::Validation(format!(
                "unknown appointment status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i32,
    pub client_id: i32,
    pub employee_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: AppointmentStatus,
    pub duration_min: i32,
}

/// A candidate appointment as submitted by a caller, before validation.
///
/// `end_time` may be omitted, in which case it is derived from the service's
/// duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub client_id: i32,
    pub employee_id: i32,
    pub service_id: i32,
    pub date: String,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// An appointment that passed validation and may be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub client_id: i32,
    pub employee_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: AppointmentStatus,
    pub duration_min: i32,
}

impl NewAppointment {
    pub fn into_appointment(self, id: i32) -> Appointment {
        Appointment {
            id,
            client_id: self.client_id,
            employee_id: self.employee_id,
            service_id: self.service_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status,
            duration_min: self.duration_min,
        }
    }
}

/// An existing appointment as listed by the store for overlap checks.
///
/// Times are kept as stored text; older rows may hold full timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    pub id: i32,
    pub start_time: String,
    pub end_time: String,
    pub status: AppointmentStatus,
}

impl BookedSlot {
    /// The booked interval as instants, bare stored times anchored on `date`.
    pub fn interval(
        &self,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> BookingResult<Interval<DateTime<FixedOffset>>> {
        let start = normalize_stored(date, &self.start_time, offset)?;
        let end = normalize_stored(date, &self.end_time, offset)?;
        Ok(Interval::new(start, end))
    }
}
