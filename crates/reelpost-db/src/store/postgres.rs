use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reelpost_core::DocumentBackend;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;

use super::{stamp_server_timestamps, validate_segment, DocumentStore};
use crate::error::DocumentStoreResult;

const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    data JSONB NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (collection, id)
)
"#;

/// Document store backed by a PostgreSQL `documents` table (JSONB payloads)
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and make sure the `documents` table exists.
    pub async fn connect(database_url: &str) -> DocumentStoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(CONNECTION_TIMEOUT_SECS))
            .connect(database_url)
            .await?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the `documents` table if it does not exist
    pub async fn ensure_schema(&self) -> DocumentStoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[tracing::instrument(skip(self, data, server_timestamps), fields(db.table = "documents", db.collection = %collection, db.record_id = %id))]
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        mut data: JsonValue,
        server_timestamps: &[&str],
    ) -> DocumentStoreResult<JsonValue> {
        validate_segment("collection", collection)?;
        validate_segment("id", id)?;

        let mut tx = self.pool.begin().await?;

        // Timestamps come from the database clock, not the client's.
        let now: DateTime<Utc> = sqlx::query_scalar("SELECT now()")
            .fetch_one(&mut *tx)
            .await?;
        stamp_server_timestamps(&mut data, server_timestamps, now)?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (collection, id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(&data))
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(data)
    }

    #[tracing::instrument(skip(self), fields(db.table = "documents"))]
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> DocumentStoreResult<Option<JsonValue>> {
        validate_segment("collection", collection)?;
        validate_segment("id", id)?;

        let row = sqlx::query("SELECT data FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let Json(data): Json<JsonValue> = row.try_get("data")?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "documents"))]
    async fn delete_document(&self, collection: &str, id: &str) -> DocumentStoreResult<()> {
        validate_segment("collection", collection)?;
        validate_segment("id", id)?;

        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_ids(&self, collection: &str) -> DocumentStoreResult<Vec<String>> {
        validate_segment("collection", collection)?;

        let ids: Vec<String> =
            sqlx::query_scalar("SELECT id FROM documents WHERE collection = $1 ORDER BY id")
                .bind(collection)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    fn backend_type(&self) -> DocumentBackend {
        DocumentBackend::Postgres
    }
}
