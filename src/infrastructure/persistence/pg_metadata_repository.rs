//! PostgreSQL implementation of the metadata repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::MetadataRepository;
use crate::error::StorageError;

/// Key/value metadata stored in the `link_meta` table.
pub struct PgMetadataRepository {
    pool: Arc<PgPool>,
}

impl PgMetadataRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetadataRepository for PgMetadataRepository {
    async fn get(&self, entity_id: i64, key: &str) -> Result<Option<String>, StorageError> {
        let value: Option<String> = sqlx::query_scalar(
            r#"
            SELECT meta_value
            FROM link_meta
            WHERE link_id = $1 AND meta_key = $2
            "#,
        )
        .bind(entity_id)
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(value)
    }

    async fn set(&self, entity_id: i64, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO link_meta (link_id, meta_key, meta_value)
            VALUES ($1, $2, $3)
            ON CONFLICT (link_id, meta_key)
            DO UPDATE SET meta_value = EXCLUDED.meta_value
            "#,
        )
        .bind(entity_id)
        .bind(key)
        .bind(value)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn delete(&self, entity_id: i64, key: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            DELETE FROM link_meta
            WHERE link_id = $1 AND meta_key = $2
            "#,
        )
        .bind(entity_id)
        .bind(key)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
