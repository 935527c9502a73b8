//! Per-link software selection management for the admin surface.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::repositories::{LinkRepository, MetadataRepository, SOFTWARE_META_KEY};
use crate::domain::software_map::SoftwareMap;
use crate::error::AppError;

/// A link's software selection as seen by the admin API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSoftware {
    pub link_id: i64,
    pub slug: String,
    /// Effective selection: link-level metadata first, content-level second.
    pub software: Option<String>,
    /// The template the selection maps to, when the key is known.
    pub template: Option<String>,
}

/// Reads and writes the per-link software selection.
///
/// Writes always target the link id; the content-id fallback exists only for
/// selections made by external tooling.
pub struct SoftwareService {
    links: Arc<dyn LinkRepository>,
    metadata: Arc<dyn MetadataRepository>,
    software_map: Arc<SoftwareMap>,
}

impl SoftwareService {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        metadata: Arc<dyn MetadataRepository>,
        software_map: Arc<SoftwareMap>,
    ) -> Self {
        Self {
            links,
            metadata,
            software_map,
        }
    }

    pub fn software_map(&self) -> &SoftwareMap {
        &self.software_map
    }

    /// Returns the effective selection for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the link does not exist and
    /// [`AppError::Internal`] on storage errors.
    pub async fn get_selection(&self, link_id: i64) -> Result<LinkSoftware, AppError> {
        let link = self.require_link(link_id).await?;

        let mut software = self
            .metadata
            .get(link.id, SOFTWARE_META_KEY)
            .await?
            .filter(|v| !v.is_empty());

        if software.is_none()
            && let Some(content_id) = link.content_id
        {
            software = self
                .metadata
                .get(content_id, SOFTWARE_META_KEY)
                .await?
                .filter(|v| !v.is_empty());
        }

        let template = software
            .as_deref()
            .and_then(|key| self.software_map.template_for(key))
            .map(|t| t.as_str().to_string());

        Ok(LinkSoftware {
            link_id: link.id,
            slug: link.slug,
            software,
            template,
        })
    }

    /// Sets the selection for a link, validated against the software map.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for keys without a template,
    /// [`AppError::NotFound`] for missing links, [`AppError::Internal`] on
    /// storage errors.
    pub async fn set_selection(&self, link_id: i64, software: &str) -> Result<(), AppError> {
        if !self.software_map.contains(software) {
            return Err(AppError::bad_request(
                "Unknown software key",
                json!({ "software": software }),
            ));
        }

        let link = self.require_link(link_id).await?;
        self.metadata
            .set(link.id, SOFTWARE_META_KEY, software)
            .await?;

        info!(link_id = link.id, software = %software, "software selection saved");
        Ok(())
    }

    /// Clears the link-level selection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for missing links and
    /// [`AppError::Internal`] on storage errors.
    pub async fn clear_selection(&self, link_id: i64) -> Result<(), AppError> {
        let link = self.require_link(link_id).await?;
        self.metadata.delete(link.id, SOFTWARE_META_KEY).await?;

        info!(link_id = link.id, "software selection cleared");
        Ok(())
    }

    async fn require_link(
        &self,
        link_id: i64,
    ) -> Result<crate::domain::entities::TrackedLink, AppError> {
        self.links
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "link_id": link_id })))
    }
}
