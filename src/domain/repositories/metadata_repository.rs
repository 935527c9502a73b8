//! Repository trait for per-entity metadata.

use crate::error::StorageError;
use async_trait::async_trait;

/// Metadata key under which a link's software selection is stored.
pub const SOFTWARE_META_KEY: &str = "software";

/// Key/value metadata attached to a link or content entity.
///
/// The redirect core reads the software selection through this interface;
/// the admin surface writes it. An empty stored value is treated the same
/// as an absent one by callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    /// Reads a metadata value for an entity. A miss is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on database errors.
    async fn get(&self, entity_id: i64, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes (inserts or replaces) a metadata value for an entity.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on database errors.
    async fn set(&self, entity_id: i64, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a metadata value. Removing an absent value is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on database errors.
    async fn delete(&self, entity_id: i64, key: &str) -> Result<(), StorageError>;
}
