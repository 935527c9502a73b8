//! The redirect core: request interception and tracked-URL building.
//!
//! Two cooperating halves, both stateless across requests. The intercept
//! half decides whether a request path names an enabled tracked link with a
//! software selection; the builder half substitutes a fresh click id into
//! that software's parameter template and appends it to the target URL.
//!
//! Failures never escape: every miss or storage problem collapses into a
//! logged [`SkipReason`] and the caller falls through to normal routing.

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::TrackedLink;
use crate::domain::repositories::{LinkRepository, MetadataRepository, SOFTWARE_META_KEY};
use crate::domain::software_map::SoftwareMap;
use crate::utils::{click_id, request_path};

/// Result of running the intercept pipeline for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptOutcome {
    /// An augmented redirect should be issued and request handling halted.
    Redirect(RedirectDecision),
    /// No redirect; the caller continues normal routing.
    Fallthrough(SkipReason),
}

/// A resolved redirect: where to send the visitor and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDecision {
    pub location: String,
    pub link_id: i64,
    pub software: String,
}

/// Why the intercept pipeline declined to redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The path is excluded up front (empty, reserved, feed-like, dotted).
    NotACandidate,
    /// The link store errored or its table is missing.
    StorageUnavailable,
    /// No enabled link matches the slug.
    NoMatchingLink,
    /// The link has no software selection.
    NoSoftwareConfigured,
    /// The stored selection has no template in the map.
    UnknownSoftware,
}

/// Intercept trigger and redirect builder over the storage collaborators.
pub struct RedirectService {
    links: Arc<dyn LinkRepository>,
    metadata: Arc<dyn MetadataRepository>,
    software_map: Arc<SoftwareMap>,
}

impl RedirectService {
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

    /// Runs the full intercept pipeline for a raw request path.
    ///
    /// Never errors: lookup misses are silent no-ops and storage failures
    /// are logged and absorbed, so the platform keeps serving.
    pub async fn intercept(&self, raw_path: &str) -> InterceptOutcome {
        let Some(slug) = request_path::candidate_slug(raw_path) else {
            return InterceptOutcome::Fallthrough(SkipReason::NotACandidate);
        };

        debug!(slug = %slug, "checking potential tracked link");

        let link = match self.links.find_enabled_by_slug(&slug).await {
            Ok(Some(link)) => link,
            Ok(None) => {
                debug!(slug = %slug, "no enabled link for slug");
                return InterceptOutcome::Fallthrough(SkipReason::NoMatchingLink);
            }
            Err(err) => {
                warn!(slug = %slug, error = %err, "link store unavailable");
                return InterceptOutcome::Fallthrough(SkipReason::StorageUnavailable);
            }
        };

        let Some(software) = self.resolve_software(&link).await else {
            debug!(link_id = link.id, "no software configured for link");
            return InterceptOutcome::Fallthrough(SkipReason::NoSoftwareConfigured);
        };

        let location = self.build(&link.target_url, &software);
        if location == link.target_url {
            // Unknown key: build already logged the mismatch.
            return InterceptOutcome::Fallthrough(SkipReason::UnknownSoftware);
        }

        debug!(link_id = link.id, software = %software, location = %location, "redirect resolved");

        InterceptOutcome::Redirect(RedirectDecision {
            location,
            link_id: link.id,
            software,
        })
    }

    /// Appends a freshly tagged tracking parameter to `target_url`.
    ///
    /// An unknown software key returns the URL unchanged; that signals a
    /// configuration mismatch and is logged, not fatal.
    pub fn build(&self, target_url: &str, software_key: &str) -> String {
        let Some(template) = self.software_map.template_for(software_key) else {
            warn!(software = %software_key, "unknown software key, leaving target URL unmodified");
            return target_url.to_string();
        };

        let fragment = template.apply(&click_id::generate());
        append_query(target_url, &fragment)
    }

    /// Secondary entry point for an external redirect pipeline.
    ///
    /// Given the target URL it is about to redirect to and the link record
    /// it resolved, returns the possibly augmented URL. Guaranteed not to
    /// fail: any internal problem returns the input unchanged.
    pub async fn filter_redirect_url(&self, target_url: &str, link: &TrackedLink) -> String {
        let Some(software) = self.resolve_software(link).await else {
            debug!(link_id = link.id, "filter: no software for link");
            return target_url.to_string();
        };

        self.build(target_url, &software)
    }

    /// Resolves the software selection for a link.
    ///
    /// Primary lookup is by link id; when empty and the link carries a
    /// content id, a secondary lookup runs against that id. Storage errors
    /// degrade to "not configured".
    async fn resolve_software(&self, link: &TrackedLink) -> Option<String> {
        match self.lookup_meta(link.id).await {
            Some(software) => Some(software),
            None => {
                let content_id = link.content_id?;
                debug!(link_id = link.id, content_id, "falling back to content metadata");
                self.lookup_meta(content_id).await
            }
        }
    }

    async fn lookup_meta(&self, entity_id: i64) -> Option<String> {
        match self.metadata.get(entity_id, SOFTWARE_META_KEY).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                warn!(entity_id, error = %err, "metadata lookup failed");
                None
            }
        }
    }
}

/// Appends `fragment` to `target_url`, choosing `?` or `&` by whether the
/// URL already carries a query string.
fn append_query(target_url: &str, fragment: &str) -> String {
    let has_query = match Url::parse(target_url) {
        Ok(url) => url.query().is_some(),
        // Not parseable as an absolute URL; fall back to a substring check.
        Err(_) => target_url.contains('?'),
    };

    let glue = if has_query { '&' } else { '?' };
    format!("{}{}{}", target_url, glue, fragment)
}
