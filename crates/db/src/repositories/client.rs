use crate::models::DbClient;
use eyre::Result;
use shiftbook_core::models::client::ClientRequest;
use sqlx::{Pool, Postgres};

pub async fn create_client(pool: &Pool<Postgres>, request: &ClientRequest) -> Result<DbClient> {
    tracing::debug!("Creating client: name={}", request.name);

    let client = sqlx::query_as::<_, DbClient>(
        r#"
        INSERT INTO clients (name, phone, email)
        VALUES ($1, $2, $3)
        RETURNING id, name, phone, email
        "#,
    )
    .bind(&request.name)
    .bind(&request.phone)
    .bind(&request.email)
    .fetch_one(pool)
    .await?;

    Ok(client)
}

pub async fn get_client_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbClient>> {
    let client = sqlx::query_as::<_, DbClient>(
        r#"
        SELECT id, name, phone, email
        FROM clients
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(client)
}

pub async fn list_clients(pool: &Pool<Postgres>) -> Result<Vec<DbClient>> {
    let clients = sqlx::query_as::<_, DbClient>(
        r#"
        SELECT id, name, phone, email
        FROM clients
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(clients)
}

/// Returns `None` when no client has the given id.
pub async fn update_client(
    pool: &Pool<Postgres>,
    id: i32,
    request: &ClientRequest,
) -> Result<Option<DbClient>> {
    let client = sqlx::query_as::<_, DbClient>(
        r#"
        UPDATE clients
        SET name = $2, phone = $3, email = $4
        WHERE id = $1
        RETURNING id, name, phone, email
        "#,
    )
    .bind(id)
    .bind(&request.name)
    .bind(&request.phone)
    .bind(&request.email)
    .fetch_optional(pool)
    .await?;

    Ok(client)
}

pub async fn delete_client(pool: &Pool<Postgres>, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn client_exists(pool: &Pool<Postgres>, id: i32) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::create_test_pool;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_client_crud() {
        let pool = create_test_pool().await;
        let request = ClientRequest {
            name: "Ana".to_string(),
            phone: Some("555-0101".to_string()),
            email: None,
        };

        let created = create_client(&pool, &request).await.unwrap();
        assert!(client_exists(&pool, created.id).await.unwrap());

        let renamed = ClientRequest {
            name: "Ana María".to_string(),
            ..request
        };
        let updated = update_client(&pool, created.id, &renamed).await.unwrap().unwrap();
        assert_eq!(updated.name, "Ana María");

        assert_eq!(delete_client(&pool, created.id).await.unwrap(), 1);
        assert!(get_client_by_id(&pool, created.id).await.unwrap().is_none());
        assert!(update_client(&pool, created.id, &renamed).await.unwrap().is_none());
    }
}
