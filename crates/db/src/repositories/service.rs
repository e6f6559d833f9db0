use crate::models::DbService;
use eyre::Result;
use shiftbook_core::models::service::ServiceRequest;
use sqlx::{Pool, Postgres};

pub async fn create_service(pool: &Pool<Postgres>, request: &ServiceRequest) -> Result<DbService> {
    tracing::debug!(
        "Creating service: name={}, duration_min={}",
        request.name,
        request.duration_min
    );

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (name, duration_min, price)
        VALUES ($1, $2, $3)
        RETURNING id, name, duration_min, price
        "#,
    )
    .bind(&request.name)
    .bind(request.duration_min)
    .bind(request.price)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration_min, price
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn list_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration_min, price
        FROM services
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn update_service(
    pool: &Pool<Postgres>,
    id: i32,
    request: &ServiceRequest,
) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        UPDATE services
        SET name = $2, duration_min = $3, price = $4
        WHERE id = $1
        RETURNING id, name, duration_min, price
        "#,
    )
    .bind(id)
    .bind(&request.name)
    .bind(request.duration_min)
    .bind(request.price)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn delete_service(pool: &Pool<Postgres>, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn get_service_duration(pool: &Pool<Postgres>, id: i32) -> Result<Option<i32>> {
    let duration = sqlx::query_scalar::<_, i32>("SELECT duration_min FROM services WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(duration)
}
