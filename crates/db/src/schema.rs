use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Needed for the employee equality operator inside the exclusion constraint
    pool.execute("CREATE EXTENSION IF NOT EXISTS btree_gist;")
        .await?;

    // Create clients table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NULL,
            email VARCHAR(255) NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create employees table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            specialty VARCHAR(255) NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            duration_min INTEGER NOT NULL,
            price DOUBLE PRECISION NOT NULL DEFAULT 0,
            CONSTRAINT positive_duration CHECK (duration_min > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. The exclusion constraint makes the store the
    // final arbiter against double-booking, even when two requests pass
    // validation concurrently.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id SERIAL PRIMARY KEY,
            client_id INTEGER NOT NULL REFERENCES clients(id),
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            service_id INTEGER NOT NULL REFERENCES services(id),
            appointment_date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'pending',
            duration_min INTEGER NOT NULL,
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT no_double_booking EXCLUDE USING gist (
                employee_id WITH =,
                tsrange(appointment_date + start_time, appointment_date + end_time, '[)') WITH &&
            ) WHERE (status <> 'cancelled')
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_employee_date ON appointments(employee_id, appointment_date);
        CREATE INDEX IF NOT EXISTS idx_appointments_client_id ON appointments(client_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_service_id ON appointments(service_id);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
