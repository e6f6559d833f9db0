use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shiftbook_core::models::{
    appointment::{Appointment, AppointmentStatus},
    client::Client,
    employee::Employee,
    service::Service,
};
use shiftbook_core::time::TimeOfDay;
use sqlx::FromRow;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClient {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<DbClient> for Client {
    fn from(row: DbClient) -> Self {
        Client {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: i32,
    pub name: String,
    pub specialty: Option<String>,
}

impl From<DbEmployee> for Employee {
    fn from(row: DbEmployee) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            specialty: row.specialty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: i32,
    pub name: String,
    pub duration_min: i32,
    pub price: f64,
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            name: row.name,
            duration_min: row.duration_min,
            price: row.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i32,
    pub client_id: i32,
    pub employee_id: i32,
    pub service_id: i32,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub duration_min: i32,
}

/// Parses a stored status, treating unknown values as blocking.
pub fn parse_status(id: i32, status: &str) -> AppointmentStatus {
    status.parse().unwrap_or_else(|_| {
        warn!(appointment_id = id, status, "Unknown stored status, treating as pending");
        AppointmentStatus::Pending
    })
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Appointment {
            id: row.id,
            client_id: row.client_id,
            employee_id: row.employee_id,
            service_id: row.service_id,
            date: row.appointment_date,
            start_time: TimeOfDay::from_naive(row.start_time),
            end_time: TimeOfDay::from_naive(row.end_time),
            status: parse_status(row.id, &row.status),
            duration_min: row.duration_min,
        }
    }
}

/// One row of an employee's day, with times rendered as text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookedSlot {
    pub id: i32,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
}
