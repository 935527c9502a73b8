//! PostgreSQL repository implementations.

mod pg_link_repository;
mod pg_metadata_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_metadata_repository::PgMetadataRepository;
