//! Tracked link entity: a short-link record owned by the link store.

use chrono::{DateTime, Utc};

/// Enabled/disabled state of a tracked link.
///
/// Only enabled links are eligible for interception; anything else falls
/// through to normal routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Enabled,
    Disabled,
}

impl LinkStatus {
    /// Parses the stored status column. Unknown values are treated as disabled.
    pub fn parse(s: &str) -> Self {
        match s {
            "enabled" => Self::Enabled,
            _ => Self::Disabled,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

/// A short-link record with its redirect target.
///
/// The redirect core reads these and never mutates them. `content_id` is an
/// optional reference to an associated content entity; per-link metadata may
/// be attached to either id, with the link id taking precedence.
#[derive(Debug, Clone)]
pub struct TrackedLink {
    pub id: i64,
    pub slug: String,
    pub target_url: String,
    pub status: LinkStatus,
    pub content_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl TrackedLink {
    pub fn new(
        id: i64,
        slug: String,
        target_url: String,
        status: LinkStatus,
        content_id: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            slug,
            target_url,
            status,
            content_id,
            created_at,
        }
    }

    /// Returns true if the link may be redirected.
    pub fn is_enabled(&self) -> bool {
        self.status == LinkStatus::Enabled
    }
}
