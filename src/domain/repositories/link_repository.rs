//! Repository trait for read-only access to the link store.

use crate::domain::entities::TrackedLink;
use crate::error::StorageError;
use async_trait::async_trait;

/// Read-only interface to the short-link table.
///
/// The redirect core only reads link records; writes belong to whatever
/// system owns the table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds an enabled link by its slug.
    ///
    /// Disabled links are not returned; a miss is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing table is missing or the
    /// database is unreachable.
    async fn find_enabled_by_slug(&self, slug: &str) -> Result<Option<TrackedLink>, StorageError>;

    /// Finds a link by id regardless of status. Used by the admin surface.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<TrackedLink>, StorageError>;

    /// Reports whether the backing link table exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the database is unreachable.
    async fn table_exists(&self) -> Result<bool, StorageError>;
}
