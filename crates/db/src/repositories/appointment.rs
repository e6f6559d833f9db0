use crate::models::{DbAppointment, DbBookedSlot};
use chrono::NaiveDate;
use eyre::{Result, bail};
use shiftbook_core::errors::Entity;
use shiftbook_core::models::appointment::NewAppointment;
use sqlx::{Pool, Postgres};

const SELECT_COLUMNS: &str = "id, client_id, employee_id, service_id, appointment_date, \
     start_time, end_time, status, duration_min";

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
) -> Result<DbAppointment> {
    tracing::debug!(
        "Creating appointment: employee_id={}, date={}, start={}, end={}",
        appointment.employee_id,
        appointment.date,
        appointment.start_time,
        appointment.end_time
    );

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments
            (client_id, employee_id, service_id, appointment_date, start_time, end_time, status, duration_min)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {SELECT_COLUMNS}
        "#
    ))
    .bind(appointment.client_id)
    .bind(appointment.employee_id)
    .bind(appointment.service_id)
    .bind(appointment.date)
    .bind(appointment.start_time.as_naive())
    .bind(appointment.end_time.as_naive())
    .bind(appointment.status.as_str())
    .bind(appointment.duration_min)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: i32,
) -> Result<Option<DbAppointment>> {
    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {SELECT_COLUMNS} FROM appointments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn appointment_exists(pool: &Pool<Postgres>, id: i32) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM appointments WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

pub async fn list_appointments(pool: &Pool<Postgres>) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {SELECT_COLUMNS} FROM appointments ORDER BY appointment_date, start_time, id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_appointments_by_client(
    pool: &Pool<Postgres>,
    client_id: i32,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {SELECT_COLUMNS}
        FROM appointments
        WHERE client_id = $1
        ORDER BY appointment_date, start_time, id
        "#
    ))
    .bind(client_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Every appointment of an employee on one date, times rendered as `HH:MM`.
pub async fn list_booked_slots(
    pool: &Pool<Postgres>,
    employee_id: i32,
    date: NaiveDate,
) -> Result<Vec<DbBookedSlot>> {
    let rows = sqlx::query_as::<_, DbBookedSlot>(
        r#"
        SELECT id,
               to_char(start_time, 'HH24:MI') AS start_time,
               to_char(end_time, 'HH24:MI') AS end_time,
               status
        FROM appointments
        WHERE employee_id = $1 AND appointment_date = $2
        ORDER BY 2, id
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update_appointment(
    pool: &Pool<Postgres>,
    id: i32,
    appointment: &NewAppointment,
) -> Result<u64> {
    tracing::debug!("Updating appointment: id={}", id);

    let result = sqlx::query(
        r#"
        UPDATE appointments
        SET client_id = $2,
            employee_id = $3,
            service_id = $4,
            appointment_date = $5,
            start_time = $6,
            end_time = $7,
            status = $8,
            duration_min = $9
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(appointment.client_id)
    .bind(appointment.employee_id)
    .bind(appointment.service_id)
    .bind(appointment.date)
    .bind(appointment.start_time.as_naive())
    .bind(appointment.end_time.as_naive())
    .bind(appointment.status.as_str())
    .bind(appointment.duration_min)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_appointment(pool: &Pool<Postgres>, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Number of appointments pointing at a client, employee or service.
pub async fn count_referencing(pool: &Pool<Postgres>, entity: Entity, id: i32) -> Result<i64> {
    let query = match entity {
        Entity::Client => "SELECT COUNT(*) FROM appointments WHERE client_id = $1",
        Entity::Employee => "SELECT COUNT(*) FROM appointments WHERE employee_id = $1",
        Entity::Service => "SELECT COUNT(*) FROM appointments WHERE service_id = $1",
        Entity::Appointment => bail!("appointments are not referenced by other appointments"),
    };

    let count = sqlx::query_scalar::<_, i64>(query)
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
