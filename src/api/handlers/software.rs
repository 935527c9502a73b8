//! Handlers for the software map and per-link selections.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::software::{
    LinkSoftwareResponse, SetSoftwareRequest, SoftwareEntry, SoftwareListResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the software map.
///
/// # Endpoint
///
/// `GET /api/software`
pub async fn software_map_handler(State(state): State<AppState>) -> Json<SoftwareListResponse> {
    let software = state
        .software_service
        .software_map()
        .entries()
        .map(|(key, template)| SoftwareEntry {
            key: key.to_string(),
            param: template.param_name().to_string(),
            template: template.as_str().to_string(),
        })
        .collect();

    Json(SoftwareListResponse { software })
}

/// Returns a link's effective software selection.
///
/// # Endpoint
///
/// `GET /api/links/{id}/software`
///
/// # Errors
///
/// Returns 404 when the link does not exist.
pub async fn get_link_software_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<LinkSoftwareResponse>, AppError> {
    let selection = state.software_service.get_selection(id).await?;

    Ok(Json(LinkSoftwareResponse {
        link_id: selection.link_id,
        slug: selection.slug,
        software: selection.software,
        template: selection.template,
    }))
}

/// Sets a link's software selection.
///
/// # Endpoint
///
/// `PUT /api/links/{id}/software`
///
/// # Errors
///
/// Returns 400 for malformed or unmapped keys, 404 for missing links.
pub async fn set_link_software_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<SetSoftwareRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate().map_err(|e| {
        AppError::bad_request("Invalid software key", json!({ "errors": e.to_string() }))
    })?;

    state
        .software_service
        .set_selection(id, &payload.software)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Clears a link's software selection.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}/software`
///
/// # Errors
///
/// Returns 404 when the link does not exist.
pub async fn clear_link_software_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.software_service.clear_selection(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
