//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{LinkStatus, TrackedLink};
use crate::domain::repositories::LinkRepository;
use crate::error::StorageError;

const LINKS_TABLE: &str = "links";

/// Read-only PostgreSQL view of the link table.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn link_from_row(row: &PgRow) -> Result<TrackedLink, StorageError> {
    let status: String = row.try_get("status")?;
    Ok(TrackedLink::new(
        row.try_get("id")?,
        row.try_get("slug")?,
        row.try_get("target_url")?,
        LinkStatus::parse(&status),
        row.try_get("content_id")?,
        row.try_get("created_at")?,
    ))
}

/// Distinguishes a dropped table (undefined_table, 42P01) from other
/// database failures.
fn map_db_error(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(ref db) = e
        && db.code().as_deref() == Some("42P01")
    {
        return StorageError::TableMissing(LINKS_TABLE.to_string());
    }
    StorageError::Database(e)
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_enabled_by_slug(&self, slug: &str) -> Result<Option<TrackedLink>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, slug, target_url, status, content_id, created_at
            FROM links
            WHERE slug = $1 AND status = 'enabled'
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_db_error)?;

        row.as_ref().map(link_from_row).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TrackedLink>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, slug, target_url, status, content_id, created_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_db_error)?;

        row.as_ref().map(link_from_row).transpose()
    }

    async fn table_exists(&self) -> Result<bool, StorageError> {
        let exists: bool =
            sqlx::query_scalar("SELECT to_regclass('public.links') IS NOT NULL")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }
}
