//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: link-table existence probe
/// 2. **Software map**: entry count
/// 3. **Log sink**: configured destination
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let map_check = check_software_map(&state);
    let log_check = check_log_sink(&state);

    let all_healthy =
        db_check.status == "ok" && map_check.status == "ok" && log_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            software_map: map_check,
            log_sink: log_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity and the presence of the link table.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.link_repository.table_exists().await {
        Ok(true) => CheckStatus {
            status: "ok".to_string(),
            message: Some("Connected, links table present".to_string()),
        },
        Ok(false) => CheckStatus {
            status: "error".to_string(),
            message: Some("links table is missing".to_string()),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {}", e)),
        },
    }
}

/// Reports the size of the software map.
fn check_software_map(state: &AppState) -> CheckStatus {
    let len = state.software_service.software_map().len();
    if len == 0 {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Software map is empty".to_string()),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{} software entries", len)),
        }
    }
}

/// Reports where diagnostics are being written.
fn check_log_sink(state: &AppState) -> CheckStatus {
    let message = match &state.log_file {
        Some(path) => format!("Writing to {}", path.display()),
        None => "Writing to stdout".to_string(),
    };
    CheckStatus {
        status: "ok".to_string(),
        message: Some(message),
    }
}
