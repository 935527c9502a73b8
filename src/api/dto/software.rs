//! DTOs for the software-selection endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for software key validation.
static SOFTWARE_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").unwrap());

/// Request to set a link's software selection.
#[derive(Debug, Deserialize, Validate)]
pub struct SetSoftwareRequest {
    /// Software key; must exist in the software map.
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*SOFTWARE_KEY_REGEX"))]
    pub software: String,
}

/// A link's current software selection.
#[derive(Debug, Serialize)]
pub struct LinkSoftwareResponse {
    pub link_id: i64,
    pub slug: String,
    pub software: Option<String>,
    /// Template the selection maps to; absent when the stored key is not in
    /// the map (a configuration mismatch worth surfacing).
    pub template: Option<String>,
}

/// One entry of the software map.
#[derive(Debug, Serialize)]
pub struct SoftwareEntry {
    pub key: String,
    pub param: String,
    pub template: String,
}

/// The full software map, in key order.
#[derive(Debug, Serialize)]
pub struct SoftwareListResponse {
    pub software: Vec<SoftwareEntry>,
}
