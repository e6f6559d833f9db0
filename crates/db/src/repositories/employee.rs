use crate::models::DbEmployee;
use eyre::Result;
use shiftbook_core::models::employee::EmployeeRequest;
use sqlx::{Pool, Postgres};

pub async fn create_employee(
    pool: &Pool<Postgres>,
    request: &EmployeeRequest,
) -> Result<DbEmployee> {
    tracing::debug!("Creating employee: name={}", request.name);

    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        INSERT INTO employees (name, specialty)
        VALUES ($1, $2)
        RETURNING id, name, specialty
        "#,
    )
    .bind(&request.name)
    .bind(&request.specialty)
    .fetch_one(pool)
    .await?;

    Ok(employee)
}

pub async fn get_employee_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, name, specialty
        FROM employees
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn list_employees(pool: &Pool<Postgres>) -> Result<Vec<DbEmployee>> {
    let employees = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, name, specialty
        FROM employees
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(employees)
}

pub async fn update_employee(
    pool: &Pool<Postgres>,
    id: i32,
    request: &EmployeeRequest,
) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        UPDATE employees
        SET name = $2, specialty = $3
        WHERE id = $1
        RETURNING id, name, specialty
        "#,
    )
    .bind(id)
    .bind(&request.name)
    .bind(&request.specialty)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn delete_employee(pool: &Pool<Postgres>, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn employee_exists(pool: &Pool<Postgres>, id: i32) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM employees WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}
