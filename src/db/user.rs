use crate::db::StorageError;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

/// First sight of a provider identity creates the local user row; later
/// sightings refresh name and email.
pub async fn upsert(
    pg_pool: &PgPool,
    google_id: &str,
    name: &str,
    email: &str,
) -> Result<models::User, StorageError> {
    let query_span = tracing::info_span!("Upserting user from provider profile.");

    sqlx::query_as::<_, models::User>(
        r#"
        INSERT INTO users (name, email, google_id, created_at, updated_at)
        VALUES ($1, lower($2), $3, NOW(), NOW())
        ON CONFLICT (google_id)
        DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(google_id)
    .fetch_one(pg_pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute upsert query: {:?}", e);
        StorageError::Database(e)
    })
}
