//! Repository traits abstracting the storage collaborators.

mod link_repository;
mod metadata_repository;

pub use link_repository::LinkRepository;
pub use metadata_repository::{MetadataRepository, SOFTWARE_META_KEY};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use metadata_repository::MockMetadataRepository;
